//! Generate Use Case
//!
//! Plan every rule (reusing the scan cache unless disabled), write the stale
//! barrels, save the cache for the next run and hand the written files to the
//! project's formatter.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{FormatterTool, ResolvedConfig};
use crate::domain::entities::{ActionKind, PlanResult};
use crate::domain::ports::FileSystem;
use crate::domain::services::{execute, plan_cached};
use crate::error::BarrelResult;
use crate::infrastructure::formatter::{format_or_warn, resolve_formatter};
use crate::infrastructure::repositories::JsonCacheRepository;

/// Options for the generate operation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Plan and report without writing
    pub dry_run: bool,
    /// Read and write the scan cache
    pub use_cache: bool,
    /// Run the configured formatter on written files
    pub format: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            use_cache: true,
            format: true,
        }
    }
}

/// Result of a generate run
#[derive(Debug)]
pub struct GenerateResult {
    pub plan: PlanResult,
    /// Barrels written, in plan order (empty on a dry run)
    pub written: Vec<PathBuf>,
    /// Formatter that ran successfully on `written`
    pub formatted_with: Option<FormatterTool>,
    pub elapsed: Duration,
}

impl GenerateResult {
    pub fn created(&self) -> usize {
        self.plan.count(ActionKind::Create)
    }

    pub fn updated(&self) -> usize {
        self.plan.count(ActionKind::Update)
    }

    pub fn is_success(&self) -> bool {
        !self.plan.has_errors()
    }
}

/// Generate use case
pub struct GenerateUseCase<FS: FileSystem> {
    fs: FS,
    cwd: PathBuf,
}

impl<FS: FileSystem> GenerateUseCase<FS> {
    pub fn new(fs: FS, cwd: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            cwd: cwd.into(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn execute(
        &self,
        config: &ResolvedConfig,
        options: &GenerateOptions,
    ) -> BarrelResult<GenerateResult> {
        let started = Instant::now();
        let cache_repo = JsonCacheRepository::with_fs(&self.fs, &self.cwd);
        let previous = if options.use_cache {
            cache_repo.load()
        } else {
            None
        };

        let (plan, next_cache) = plan_cached(config, &self.cwd, &self.fs, previous.as_ref());

        if options.dry_run {
            return Ok(GenerateResult {
                plan,
                written: Vec::new(),
                formatted_with: None,
                elapsed: started.elapsed(),
            });
        }

        let written = execute(&plan, &self.fs, None)?;
        if options.use_cache {
            cache_repo.save_or_warn(&next_cache);
        }

        let mut formatted_with = None;
        if options.format && !written.is_empty() {
            if let Some(tool) = resolve_formatter(config.formatter, &self.cwd, &self.fs) {
                if format_or_warn(tool, &written, &self.cwd) {
                    formatted_with = Some(tool);
                }
            }
        }

        tracing::info!(
            written = written.len(),
            errors = plan.errors.len(),
            "generate complete"
        );
        Ok(GenerateResult {
            plan,
            written,
            formatted_with,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FormatterSetting, ResolvedRule};
    use crate::domain::ports::MockFileSystem;
    use crate::domain::value_objects::ExtensionSetting;
    use crate::infrastructure::repositories::CACHE_RELATIVE_PATH;

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            extensions: ExtensionSetting::None,
            formatter: FormatterSetting::Disabled,
            rules: vec![ResolvedRule::new("src/**")],
            ..ResolvedConfig::default()
        }
    }

    fn project() -> MockFileSystem {
        MockFileSystem::new()
            .with_file("/p/src/a.ts", "export const a = 1;")
            .with_file("/p/src/b.ts", "export const b = 2;")
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            format: false,
            ..GenerateOptions::default()
        }
    }

    #[test]
    fn writes_barrels_and_cache() {
        let fs = project();
        let result = GenerateUseCase::new(fs.clone(), "/p")
            .execute(&config(), &options())
            .unwrap();

        assert_eq!(result.created(), 1);
        assert_eq!(result.written, vec![PathBuf::from("/p/src/index.ts")]);
        assert!(result.is_success());
        assert!(fs
            .content("/p/src/index.ts")
            .unwrap()
            .contains("export * from './a';"));
        assert!(fs.content(&format!("/p/{CACHE_RELATIVE_PATH}")).is_some());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let fs = project();
        let result = GenerateUseCase::new(fs.clone(), "/p")
            .execute(
                &config(),
                &GenerateOptions {
                    dry_run: true,
                    ..options()
                },
            )
            .unwrap();

        assert_eq!(result.created(), 1);
        assert!(result.written.is_empty());
        assert!(fs.content("/p/src/index.ts").is_none());
        assert!(fs.content(&format!("/p/{CACHE_RELATIVE_PATH}")).is_none());
    }

    #[test]
    fn no_cache_skips_cache_file() {
        let fs = project();
        GenerateUseCase::new(fs.clone(), "/p")
            .execute(
                &config(),
                &GenerateOptions {
                    use_cache: false,
                    ..options()
                },
            )
            .unwrap();
        assert!(fs.content(&format!("/p/{CACHE_RELATIVE_PATH}")).is_none());
    }

    #[test]
    fn second_run_is_all_skips() {
        let fs = project();
        let use_case = GenerateUseCase::new(fs.clone(), "/p");
        use_case.execute(&config(), &options()).unwrap();

        let second = use_case.execute(&config(), &options()).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.plan.count(ActionKind::Skip), 1);
    }
}
