//! Change routing
//!
//! Turns one batch of raw change events into either a config reload or the
//! set of affected rule directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::{ResolvedConfig, CONFIG_FILE_NAMES};
use crate::domain::ports::ChangeEvent;
use crate::domain::value_objects::DirGlob;
use crate::infrastructure::fs::TEMP_FILE_PREFIX;

use super::tracker::SelfWriteTracker;

/// What a batch asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Nothing relevant (self-writes, unmatched paths)
    Nothing,
    ConfigChanged,
    Directories(BTreeSet<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct Router {
    root: PathBuf,
    config_files: Vec<PathBuf>,
}

impl Router {
    /// Router for `root`; `config_path` replaces the default config names
    pub fn new(root: &Path, config_path: Option<&Path>) -> Self {
        let config_files = match config_path {
            Some(path) if path.is_absolute() => vec![path.to_path_buf()],
            Some(path) => vec![root.join(path)],
            None => CONFIG_FILE_NAMES.iter().map(|name| root.join(name)).collect(),
        };
        Self {
            root: root.to_path_buf(),
            config_files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn route(
        &self,
        events: &[ChangeEvent],
        tracker: &SelfWriteTracker,
        config: &ResolvedConfig,
    ) -> Routed {
        let globs: Vec<DirGlob> = config
            .rules
            .iter()
            .filter_map(|rule| DirGlob::new(&rule.dirs).ok())
            .collect();

        let mut config_changed = false;
        let mut affected = BTreeSet::new();

        for event in events {
            if tracker.consume(&event.path) {
                tracing::trace!(path = %event.path.display(), "suppressed self-write");
                continue;
            }
            if is_temp_file(&event.path) {
                continue;
            }
            if self.config_files.contains(&event.path) {
                config_changed = true;
                continue;
            }
            if let Some(dir) = self.affected_directory(&event.path, &globs) {
                affected.insert(dir);
            }
        }

        if config_changed {
            Routed::ConfigChanged
        } else if affected.is_empty() {
            Routed::Nothing
        } else {
            Routed::Directories(affected)
        }
    }

    /// Deepest ancestor of `path` (strictly below the root) matching a rule
    fn affected_directory(&self, path: &Path, globs: &[DirGlob]) -> Option<PathBuf> {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == self.root || !dir.starts_with(&self.root) {
                return None;
            }
            if globs.iter().any(|glob| glob.matches_dir(&self.root, dir)) {
                return Some(dir.to_path_buf());
            }
            current = dir.parent();
        }
        None
    }
}

fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(TEMP_FILE_PREFIX))
}
