//! Configuration discovery and loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ExtensionSetting;
use crate::error::{BarrelError, BarrelResult};

use super::types::{FormatterSetting, RawConfig, ResolvedConfig};

/// Config filenames looked up in the working directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["barrelsmith.toml", ".barrelsmith.toml"];

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// A loaded and resolved configuration
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: ResolvedConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// First config file present in `cwd`
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file())
}

/// Discover (or use `explicit`), parse, apply env overrides and resolve.
pub fn load_config(cwd: &Path, explicit: Option<&Path>) -> BarrelResult<LoadedConfig> {
    let path = match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => find_config(cwd).ok_or_else(|| BarrelError::ConfigNotFound {
            cwd: cwd.to_path_buf(),
            searched: CONFIG_FILE_NAMES.iter().map(|s| s.to_string()).collect(),
        })?,
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BarrelError::ConfigNotFound {
                cwd: cwd.to_path_buf(),
                searched: vec![path.display().to_string()],
            }
        } else {
            BarrelError::ConfigInvalid {
                path: path.clone(),
                message: e.to_string(),
            }
        }
    })?;

    let (raw, warnings) = parse_with_warnings(&content, &path)?;
    let raw = with_env_overrides(raw, |key| std::env::var(key).ok());
    let config = raw.resolve(&path)?;

    for warning in &warnings {
        tracing::warn!(key = %warning.key, file = %warning.file.display(), "unknown config key");
    }
    tracing::debug!(path = %path.display(), rules = config.rules.len(), "config loaded");

    Ok(LoadedConfig {
        path,
        config,
        warnings,
    })
}

/// Parse TOML and collect unknown keys as warnings
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> BarrelResult<(RawConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: RawConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BarrelError::ConfigInvalid {
        path: path.to_path_buf(),
        message: e.to_string().trim().to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (BARRELSMITH_* prefix)
pub fn with_env_overrides<F>(mut config: RawConfig, lookup: F) -> RawConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("BARRELSMITH_EXTENSIONS") {
        match value.parse::<ExtensionSetting>() {
            Ok(setting) => config.extensions = setting,
            Err(e) => tracing::warn!("ignoring BARRELSMITH_EXTENSIONS: {e}"),
        }
    }

    if let Some(value) = lookup("BARRELSMITH_FORMATTER") {
        match value.parse::<FormatterSetting>() {
            Ok(setting) => config.formatter = setting,
            Err(e) => tracing::warn!("ignoring BARRELSMITH_FORMATTER: {e}"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "extensions",
        "exclude",
        "barrel_file",
        "formatter",
        "rules",
        "dirs",
        "modules",
        "default_style",
        "include",
        "style",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
