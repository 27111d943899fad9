//! Doctor Use Case
//!
//! Health checks for a project: configuration, environment, lint and
//! suggestions. Any `Fail` makes the command exit non-zero.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{FormatterSetting, LoadedConfig, ResolvedConfig};
use crate::domain::entities::{ActionKind, PlanResult};
use crate::domain::ports::FileSystem;
use crate::domain::services::{plan, resolve_extension_mode};
use crate::domain::value_objects::globs::relative_slash_path;
use crate::domain::value_objects::{is_owned, DirGlob, ExtensionMode};
use crate::error::{BarrelError, BarrelResult};
use crate::infrastructure::formatter::detect_formatter;
use crate::infrastructure::repositories::JsonCacheRepository;

/// Directories searched for unmanaged modules
const UNMANAGED_SEARCH: &str = "src/**";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Setup,
    Environment,
    Lint,
    Suggestion,
}

impl CheckCategory {
    pub const ALL: [CheckCategory; 4] = [
        CheckCategory::Setup,
        CheckCategory::Environment,
        CheckCategory::Lint,
        CheckCategory::Suggestion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CheckCategory::Setup => "Setup",
            CheckCategory::Environment => "Environment",
            CheckCategory::Lint => "Lint",
            CheckCategory::Suggestion => "Suggestions",
        }
    }
}

/// Outcome of a single doctor check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DoctorCheck {
    Pass {
        category: CheckCategory,
        message: String,
    },
    Fail {
        category: CheckCategory,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fix: Option<String>,
    },
    Suggestion {
        category: CheckCategory,
        message: String,
    },
}

impl DoctorCheck {
    pub fn pass(category: CheckCategory, message: impl Into<String>) -> Self {
        DoctorCheck::Pass {
            category,
            message: message.into(),
        }
    }

    pub fn fail(category: CheckCategory, message: impl Into<String>, fix: Option<&str>) -> Self {
        DoctorCheck::Fail {
            category,
            message: message.into(),
            fix: fix.map(str::to_string),
        }
    }

    pub fn suggestion(message: impl Into<String>) -> Self {
        DoctorCheck::Suggestion {
            category: CheckCategory::Suggestion,
            message: message.into(),
        }
    }

    pub fn category(&self) -> CheckCategory {
        match self {
            DoctorCheck::Pass { category, .. }
            | DoctorCheck::Fail { category, .. }
            | DoctorCheck::Suggestion { category, .. } => *category,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DoctorCheck::Pass { message, .. }
            | DoctorCheck::Fail { message, .. }
            | DoctorCheck::Suggestion { message, .. } => message,
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, DoctorCheck::Fail { .. })
    }
}

/// All checks of one doctor run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
    /// Some barrel would be created or updated by `generate`
    pub stale: bool,
}

impl DoctorReport {
    pub fn passed(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c, DoctorCheck::Pass { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|c| c.is_fail()).count()
    }

    pub fn suggestions(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c, DoctorCheck::Suggestion { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn in_category(&self, category: CheckCategory) -> impl Iterator<Item = &DoctorCheck> {
        self.checks.iter().filter(move |c| c.category() == category)
    }
}

/// Doctor use case
pub struct DoctorUseCase<FS: FileSystem> {
    fs: FS,
    cwd: PathBuf,
}

impl<FS: FileSystem> DoctorUseCase<FS> {
    pub fn new(fs: FS, cwd: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            cwd: cwd.into(),
        }
    }

    /// Run every check against the outcome of config loading
    pub fn run(&self, loaded: &BarrelResult<LoadedConfig>) -> DoctorReport {
        let mut report = DoctorReport::default();
        let fallback = ResolvedConfig::default();

        let config = match loaded {
            Ok(loaded) => {
                report.checks.extend(config_checks(loaded, &self.cwd));
                &loaded.config
            }
            Err(e) => {
                report.checks.push(config_failure(e));
                &fallback
            }
        };

        report.checks.push(rules_exist(config));
        for rule in &config.rules {
            report.checks.push(self.rule_matches(&rule.dirs));
        }

        report.checks.push(self.extension_mode(config));
        report.checks.push(self.formatter(config));
        report.checks.push(self.cache_health());

        if !config.rules.is_empty() {
            let plan = plan(config, &self.cwd, &self.fs);
            report.stale = plan.is_stale();
            report.checks.push(staleness(&plan));
            report.checks.extend(plan_errors(&plan, &self.cwd));
            report.checks.extend(self.hand_written_barrels(&plan));
        }

        report.checks.extend(self.unmanaged_directories(config));
        report
    }

    fn rule_matches(&self, dirs: &str) -> DoctorCheck {
        let glob = match DirGlob::new(dirs) {
            Ok(glob) => glob,
            Err(e) => {
                return DoctorCheck::fail(
                    CheckCategory::Setup,
                    format!("Rule \"{dirs}\": {e}"),
                    Some("Fix the glob syntax in `dirs`"),
                )
            }
        };
        let count = glob.expand(&self.cwd, &self.fs).len();
        if count == 0 {
            DoctorCheck::fail(
                CheckCategory::Setup,
                format!("Rule \"{dirs}\" matches 0 directories"),
                Some("Check the path pattern; does it match existing directories?"),
            )
        } else {
            DoctorCheck::pass(
                CheckCategory::Setup,
                format!("Rule \"{dirs}\" matches {count} directories"),
            )
        }
    }

    fn extension_mode(&self, config: &ResolvedConfig) -> DoctorCheck {
        let mode = resolve_extension_mode(config, &self.cwd, &self.fs);
        let source = if config.extensions.fixed().is_some() {
            "config"
        } else {
            "tsconfig.json"
        };
        let shown = match mode {
            ExtensionMode::None => "none (no extensions)".to_string(),
            other => other.to_string(),
        };
        DoctorCheck::pass(
            CheckCategory::Environment,
            format!("Extension mode: {shown} ({source})"),
        )
    }

    fn formatter(&self, config: &ResolvedConfig) -> DoctorCheck {
        match config.formatter {
            FormatterSetting::Disabled => {
                DoctorCheck::pass(CheckCategory::Environment, "Formatter: disabled (config)")
            }
            FormatterSetting::Tool(tool) => {
                DoctorCheck::pass(CheckCategory::Environment, format!("Formatter: {tool} (config)"))
            }
            FormatterSetting::Auto => match detect_formatter(&self.cwd, &self.fs) {
                Some(tool) => {
                    DoctorCheck::pass(CheckCategory::Environment, format!("Formatter: {tool}"))
                }
                None => DoctorCheck::fail(
                    CheckCategory::Environment,
                    "No formatter detected; generated files won't be auto-formatted",
                    Some("Set `formatter = false` in the config to silence this"),
                ),
            },
        }
    }

    fn cache_health(&self) -> DoctorCheck {
        let repo = JsonCacheRepository::with_fs(&self.fs, &self.cwd);
        match repo.try_load() {
            Ok(None) => DoctorCheck::pass(CheckCategory::Environment, "Cache: not created yet"),
            Ok(Some(cache)) => {
                let kb = self.fs.size(repo.path()).unwrap_or(0).div_ceil(1024);
                DoctorCheck::pass(
                    CheckCategory::Environment,
                    format!("Cache: {kb}KB, {} directories", cache.len()),
                )
            }
            Err(e) => DoctorCheck::fail(
                CheckCategory::Environment,
                format!("Cache: {e}"),
                Some("Delete node_modules/.cache/barrelsmith/ (it is rebuilt on the next run)"),
            ),
        }
    }

    fn hand_written_barrels(&self, plan: &PlanResult) -> Vec<DoctorCheck> {
        plan.conflicts()
            .filter_map(|action| {
                let content = self.fs.read(action.path()).ok()?;
                if is_owned(&content) || !looks_like_barrel(&content) {
                    return None;
                }
                Some(DoctorCheck::suggestion(format!(
                    "{} looks like a hand-written barrel; delete it to let barrelsmith manage it",
                    display_relative(&self.cwd, action.path())
                )))
            })
            .collect()
    }

    fn unmanaged_directories(&self, config: &ResolvedConfig) -> Vec<DoctorCheck> {
        let Ok(search) = DirGlob::new(UNMANAGED_SEARCH) else {
            return Vec::new();
        };
        let managed: Vec<DirGlob> = config
            .rules
            .iter()
            .filter_map(|rule| DirGlob::new(&rule.dirs).ok())
            .collect();

        let mut suggestions = Vec::new();
        for dir in search.expand(&self.cwd, &self.fs) {
            if managed.iter().any(|glob| glob.matches_dir(&self.cwd, &dir)) {
                continue;
            }
            if self.fs.exists(&dir.join(&config.barrel_file)) {
                continue;
            }
            let Ok(entries) = self.fs.read_dir(&dir) else {
                continue;
            };
            let ts_files = entries
                .iter()
                .filter(|e| !e.is_dir())
                .filter(|e| e.name.ends_with(".ts") || e.name.ends_with(".tsx"))
                .count();
            if ts_files > 0 {
                suggestions.push(DoctorCheck::suggestion(format!(
                    "{}/ has {ts_files} .ts files with no {}; consider adding a rule",
                    display_relative(&self.cwd, &dir),
                    config.barrel_file
                )));
            }
        }
        suggestions
    }
}

fn config_checks(loaded: &LoadedConfig, cwd: &Path) -> Vec<DoctorCheck> {
    let mut checks = vec![
        DoctorCheck::pass(
            CheckCategory::Setup,
            format!("Config file found: {}", display_relative(cwd, &loaded.path)),
        ),
        DoctorCheck::pass(
            CheckCategory::Setup,
            format!("Config valid ({} rules)", loaded.config.rules.len()),
        ),
    ];
    checks.extend(
        loaded
            .warnings
            .iter()
            .map(|w| DoctorCheck::suggestion(w.to_string())),
    );
    checks
}

fn config_failure(error: &BarrelError) -> DoctorCheck {
    match error {
        BarrelError::ConfigNotFound { .. } => DoctorCheck::fail(
            CheckCategory::Setup,
            "No config file found",
            Some("Run `barrelsmith init` to create one"),
        ),
        other => DoctorCheck::fail(
            CheckCategory::Setup,
            format!("Config parse error: {other}"),
            None,
        ),
    }
}

fn rules_exist(config: &ResolvedConfig) -> DoctorCheck {
    match config.rules.len() {
        0 => DoctorCheck::fail(
            CheckCategory::Setup,
            "0 rules configured; nothing will be generated",
            Some("Add at least one [[rules]] table to your config"),
        ),
        n => DoctorCheck::pass(CheckCategory::Setup, format!("{n} rules configured")),
    }
}

fn staleness(plan: &PlanResult) -> DoctorCheck {
    let created = plan.count(ActionKind::Create);
    let updated = plan.count(ActionKind::Update);
    let stale = created + updated;
    if stale == 0 {
        let managed = plan.count(ActionKind::Skip);
        return DoctorCheck::pass(
            CheckCategory::Lint,
            format!("{managed} managed barrels, all up-to-date"),
        );
    }

    let mut parts = Vec::new();
    if created > 0 {
        parts.push(format!("{created} to create"));
    }
    if updated > 0 {
        parts.push(format!("{updated} to update"));
    }
    DoctorCheck::fail(
        CheckCategory::Lint,
        format!("{stale} barrels are stale ({})", parts.join(", ")),
        Some("Run `barrelsmith generate` to fix"),
    )
}

fn plan_errors(plan: &PlanResult, cwd: &Path) -> Vec<DoctorCheck> {
    let mut checks = Vec::new();
    let mut collisions = 0;
    for err in &plan.errors {
        let dir = display_relative(cwd, &err.directory);
        match &err.error {
            BarrelError::NamespaceCollision {
                first,
                second,
                derived,
            } => {
                collisions += 1;
                checks.push(DoctorCheck::fail(
                    CheckCategory::Lint,
                    format!("Namespace collision in {dir}: {first} and {second} both map to {derived}"),
                    Some("Rename one of the files"),
                ));
            }
            other => checks.push(DoctorCheck::fail(
                CheckCategory::Lint,
                format!("{dir}: {other}"),
                None,
            )),
        }
    }
    if collisions == 0 {
        checks.push(DoctorCheck::pass(CheckCategory::Lint, "No namespace collisions"));
    }
    checks
}

/// Every non-empty, non-comment line is an export statement
pub fn looks_like_barrel(content: &str) -> bool {
    let mut lines = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//"))
        .peekable();
    lines.peek().is_some() && lines.all(|l| l.starts_with("export "))
}

fn display_relative(cwd: &Path, path: &Path) -> String {
    relative_slash_path(cwd, path).unwrap_or_else(|| path.display().to_string())
}
