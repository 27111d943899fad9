//! ChangeSource port - filesystem change notifications
//!
//! The watch loop never talks to `notify` directly. It subscribes through this
//! trait, which lets routing and debouncing run against synthetic events.

use std::path::{Path, PathBuf};

use crate::error::BarrelResult;

/// What happened to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

/// A single raw change event (absolute path)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// A batch of events, or a backend error message
pub type ChangeBatch = Result<Vec<ChangeEvent>, String>;

/// Receives batches from the backend thread
pub type ChangeCallback = Box<dyn Fn(ChangeBatch) + Send + Sync + 'static>;

/// Live subscription; dropping it also stops delivery
pub trait Subscription: Send {
    fn unsubscribe(self: Box<Self>);
}

/// Subscribe to changes below `root`, skipping paths that match `ignore` globs
pub trait ChangeSource {
    fn subscribe(
        &self,
        root: &Path,
        ignore: &[String],
        callback: ChangeCallback,
    ) -> BarrelResult<Box<dyn Subscription>>;
}
