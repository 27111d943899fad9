//! PlanResult entity - actions and per-directory errors of one planning pass

use std::path::PathBuf;

use super::action::{Action, ActionKind};
use crate::error::BarrelError;

/// A directory (or rule) that failed without stopping the pass
#[derive(Debug)]
pub struct PlanError {
    /// Directory that failed, or the rule's dir glob when the rule itself failed
    pub directory: PathBuf,
    pub error: BarrelError,
}

/// Outcome of planning every rule
#[derive(Debug, Default)]
pub struct PlanResult {
    pub actions: Vec<Action>,
    pub errors: Vec<PlanError>,
}

impl PlanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn push_error(&mut self, directory: impl Into<PathBuf>, error: BarrelError) {
        self.errors.push(PlanError {
            directory: directory.into(),
            error,
        });
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }

    /// Create and Update actions, in plan order
    pub fn stale(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.is_writable())
    }

    pub fn is_stale(&self) -> bool {
        self.actions.iter().any(Action::is_writable)
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(|a| a.kind() == ActionKind::Conflict)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
