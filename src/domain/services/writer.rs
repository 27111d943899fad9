//! Writer planning
//!
//! Decides what to do with one barrel path from its current content alone.
//! No I/O happens here.

use std::path::Path;

use crate::domain::entities::{Action, ConflictReason, SkipReason};
use crate::domain::value_objects::is_owned;

/// Classify a target.
///
/// 1. no file -> Create
/// 2. file without the ownership header -> Conflict
/// 3. identical content -> Skip
/// 4. otherwise -> Update
pub fn plan_write(path: &Path, existing: Option<&str>, rendered: &str) -> Action {
    let path = path.to_path_buf();
    match existing {
        None => Action::Create {
            path,
            content: rendered.to_string(),
        },
        Some(current) if !is_owned(current) => Action::Conflict {
            path,
            reason: ConflictReason::HandWritten,
        },
        Some(current) if current == rendered => Action::Skip {
            path,
            reason: SkipReason::UpToDate,
        },
        Some(_) => Action::Update {
            path,
            content: rendered.to_string(),
        },
    }
}
