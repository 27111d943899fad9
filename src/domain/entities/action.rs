//! Action entity - what a run intends to do with one barrel file

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Why an action is a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Existing content already matches
    UpToDate,
}

/// Why a target is left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictReason {
    /// File exists without the ownership header
    HandWritten,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UpToDate => f.write_str("up-to-date"),
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::HandWritten => f.write_str("hand-written"),
        }
    }
}

/// Discriminant of [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Update,
    Skip,
    Conflict,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Create => "CREATE",
            ActionKind::Update => "UPDATE",
            ActionKind::Skip => "SKIP",
            ActionKind::Conflict => "CONFLICT",
        }
    }
}

/// The planned outcome for a single barrel path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create { path: PathBuf, content: String },
    Update { path: PathBuf, content: String },
    Skip { path: PathBuf, reason: SkipReason },
    Conflict { path: PathBuf, reason: ConflictReason },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Create { .. } => ActionKind::Create,
            Action::Update { .. } => ActionKind::Update,
            Action::Skip { .. } => ActionKind::Skip,
            Action::Conflict { .. } => ActionKind::Conflict,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Action::Create { path, .. }
            | Action::Update { path, .. }
            | Action::Skip { path, .. }
            | Action::Conflict { path, .. } => path,
        }
    }

    /// Content to write, for writable actions only
    pub fn content(&self) -> Option<&str> {
        match self {
            Action::Create { content, .. } | Action::Update { content, .. } => Some(content),
            Action::Skip { .. } | Action::Conflict { .. } => None,
        }
    }

    /// Create and Update are the only actions that touch disk
    pub fn is_writable(&self) -> bool {
        matches!(self, Action::Create { .. } | Action::Update { .. })
    }

    /// Human-readable reason for Skip and Conflict
    pub fn reason(&self) -> Option<String> {
        match self {
            Action::Skip { reason, .. } => Some(reason.to_string()),
            Action::Conflict { reason, .. } => Some(reason.to_string()),
            _ => None,
        }
    }
}
