//! Ownership header
//!
//! The first line of every generated barrel. It is the only ownership marker:
//! a file is ours iff its content starts with this exact line.

/// Header line, newline included
pub const OWNERSHIP_HEADER: &str = "// @generated by barrelsmith. Do not edit by hand.\n";

/// Whether `content` was written by barrelsmith
pub fn is_owned(content: &str) -> bool {
    content.starts_with(OWNERSHIP_HEADER)
}
