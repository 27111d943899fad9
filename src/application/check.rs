//! Check Use Case
//!
//! Plans without writing and reports which barrels would change. Used by CI
//! to fail builds with stale barrels.

use std::path::{Path, PathBuf};

use crate::config::ResolvedConfig;
use crate::domain::entities::{Action, ActionKind, PlanResult};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::services::plan;
use crate::error::BarrelResult;

/// Options for the check operation
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Collect old and new content for each stale barrel
    pub diff: bool,
}

/// A barrel that `generate` would create or rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleBarrel {
    pub path: PathBuf,
    pub kind: ActionKind,
    /// Current content (empty when the file does not exist yet)
    pub old: String,
    pub new: String,
}

/// Result of the check operation
#[derive(Debug)]
pub struct CheckResult {
    pub plan: PlanResult,
    /// Filled only when `CheckOptions::diff` is set
    pub stale: Vec<StaleBarrel>,
}

impl CheckResult {
    /// Up to date when nothing would be created or updated
    pub fn is_up_to_date(&self) -> bool {
        !self.plan.is_stale()
    }

    pub fn stale_paths(&self) -> impl Iterator<Item = &Path> {
        self.plan.stale().map(Action::path)
    }
}

/// Check use case
pub struct CheckUseCase<FS: FileSystem> {
    fs: FS,
    cwd: PathBuf,
}

impl<FS: FileSystem> CheckUseCase<FS> {
    pub fn new(fs: FS, cwd: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            cwd: cwd.into(),
        }
    }

    pub fn execute(
        &self,
        config: &ResolvedConfig,
        options: CheckOptions,
    ) -> BarrelResult<CheckResult> {
        let plan = plan(config, &self.cwd, &self.fs);
        let mut stale = Vec::new();

        if options.diff {
            for action in plan.stale() {
                let Some(new) = action.content() else {
                    continue;
                };
                let old = match self.fs.read(action.path()) {
                    Ok(content) => content,
                    Err(FsError::NotFound(_)) => String::new(),
                    Err(e) => return Err(e.into()),
                };
                stale.push(StaleBarrel {
                    path: action.path().to_path_buf(),
                    kind: action.kind(),
                    old,
                    new: new.to_string(),
                });
            }
        }

        Ok(CheckResult { plan, stale })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedRule;
    use crate::domain::ports::MockFileSystem;
    use crate::domain::value_objects::{ExtensionSetting, OWNERSHIP_HEADER};

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            extensions: ExtensionSetting::None,
            rules: vec![ResolvedRule::new("src/**")],
            ..ResolvedConfig::default()
        }
    }

    #[test]
    fn stale_when_barrel_missing() {
        let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
        let result = CheckUseCase::new(fs.clone(), "/p")
            .execute(&config(), CheckOptions { diff: true })
            .unwrap();

        assert!(!result.is_up_to_date());
        assert_eq!(result.stale.len(), 1);
        assert_eq!(result.stale[0].kind, ActionKind::Create);
        assert_eq!(result.stale[0].old, "");
        assert!(result.stale[0].new.contains("export * from './a';"));
        assert!(fs.writes().is_empty());
    }

    #[test]
    fn update_carries_old_content() {
        let old = format!("{OWNERSHIP_HEADER}export * from './gone';\n");
        let fs = MockFileSystem::new()
            .with_file("/p/src/a.ts", "")
            .with_file("/p/src/index.ts", &old);
        let result = CheckUseCase::new(fs, "/p")
            .execute(&config(), CheckOptions { diff: true })
            .unwrap();

        assert_eq!(result.stale[0].kind, ActionKind::Update);
        assert_eq!(result.stale[0].old, old);
        assert_eq!(
            result.stale_paths().collect::<Vec<_>>(),
            vec![Path::new("/p/src/index.ts")]
        );
    }

    #[test]
    fn up_to_date_and_conflicts_are_not_stale() {
        let fs = MockFileSystem::new()
            .with_file("/p/src/a.ts", "")
            .with_file("/p/src/index.ts", "export * from './a';\n");
        let result = CheckUseCase::new(fs, "/p")
            .execute(&config(), CheckOptions::default())
            .unwrap();

        assert!(result.is_up_to_date());
        assert_eq!(result.plan.conflicts().count(), 1);
        assert!(result.stale.is_empty());
    }
}
