//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod extension_mode;
mod fingerprint;
pub mod globs;
mod header;
pub mod namespace;

pub use extension_mode::{ExtensionMode, ExtensionSetting};
pub use fingerprint::ConfigFingerprint;
pub use globs::{DirGlob, ExcludeSet, IncludeGlob};
pub use header::{is_owned, OWNERSHIP_HEADER};
pub use namespace::{check_collisions, namespace_identifier, pascal_case, strip_extension};
