//! External formatter support
//!
//! Detects the project's formatter from its config files (then from
//! `package.json` devDependencies) and runs it through `npx` on the barrels
//! that were just written.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{FormatterSetting, FormatterTool};
use crate::domain::ports::FileSystem;
use crate::error::{BarrelError, BarrelResult};

/// Config files that identify a formatter, checked in order
const CONFIG_FILES: &[(FormatterTool, &[&str])] = &[
    (FormatterTool::Biome, &["biome.json", "biome.jsonc"]),
    (FormatterTool::Dprint, &["dprint.json", ".dprint.json"]),
    (
        FormatterTool::Prettier,
        &[
            ".prettierrc",
            ".prettierrc.json",
            ".prettierrc.yml",
            ".prettierrc.yaml",
            ".prettierrc.js",
            ".prettierrc.cjs",
            ".prettierrc.mjs",
            "prettier.config.js",
            "prettier.config.cjs",
            "prettier.config.mjs",
        ],
    ),
];

const DEV_DEPENDENCIES: &[(&str, FormatterTool)] = &[
    ("@biomejs/biome", FormatterTool::Biome),
    ("dprint", FormatterTool::Dprint),
    ("prettier", FormatterTool::Prettier),
];

/// Detect a formatter in `cwd`
pub fn detect_formatter<F: FileSystem>(cwd: &Path, fs: &F) -> Option<FormatterTool> {
    for (tool, files) in CONFIG_FILES {
        if files.iter().any(|file| fs.exists(&cwd.join(file))) {
            return Some(*tool);
        }
    }

    let raw = fs.read(&cwd.join("package.json")).ok()?;
    let pkg: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(pkg) => pkg,
        Err(e) => {
            tracing::debug!("unreadable package.json: {e}");
            return None;
        }
    };
    let dev = pkg.get("devDependencies")?.as_object()?;
    DEV_DEPENDENCIES
        .iter()
        .find(|(name, _)| dev.contains_key(*name))
        .map(|(_, tool)| *tool)
}

/// Formatter to run for this config, if any
pub fn resolve_formatter<F: FileSystem>(
    setting: FormatterSetting,
    cwd: &Path,
    fs: &F,
) -> Option<FormatterTool> {
    match setting {
        FormatterSetting::Disabled => None,
        FormatterSetting::Tool(tool) => Some(tool),
        FormatterSetting::Auto => detect_formatter(cwd, fs),
    }
}

/// `npx` arguments for formatting `files` in place
pub fn npx_args(tool: FormatterTool, files: &[PathBuf]) -> Vec<String> {
    let mut args: Vec<String> = match tool {
        FormatterTool::Biome => vec!["biome".into(), "format".into(), "--write".into()],
        FormatterTool::Dprint => vec!["dprint".into(), "fmt".into()],
        FormatterTool::Prettier => vec!["prettier".into(), "--write".into()],
        FormatterTool::Oxfmt => vec!["oxfmt".into()],
    };
    args.extend(files.iter().map(|f| f.display().to_string()));
    args
}

/// Run `tool` on `files` from `cwd`
pub fn run_formatter(tool: FormatterTool, files: &[PathBuf], cwd: &Path) -> BarrelResult<()> {
    if files.is_empty() {
        return Ok(());
    }
    let output = Command::new("npx")
        .args(npx_args(tool, files))
        .current_dir(cwd)
        .output()
        .map_err(|e| BarrelError::Formatter {
            tool: tool.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BarrelError::Formatter {
            tool: tool.to_string(),
            message: match output.status.code() {
                Some(code) => format!("exit code {code}: {}", stderr.trim()),
                None => format!("terminated by signal: {}", stderr.trim()),
            },
        });
    }
    tracing::debug!(%tool, files = files.len(), "formatted");
    Ok(())
}

/// Run the formatter, downgrading failure to a warning. Returns whether it ran.
pub fn format_or_warn(tool: FormatterTool, files: &[PathBuf], cwd: &Path) -> bool {
    match run_formatter(tool, files, cwd) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockFileSystem;

    #[test]
    fn detects_from_config_file() {
        let fs = MockFileSystem::new().with_file("/p/biome.jsonc", "{}");
        assert_eq!(detect_formatter(Path::new("/p"), &fs), Some(FormatterTool::Biome));

        let fs = MockFileSystem::new().with_file("/p/.prettierrc.yaml", "");
        assert_eq!(detect_formatter(Path::new("/p"), &fs), Some(FormatterTool::Prettier));
    }

    #[test]
    fn config_file_order_wins() {
        let fs = MockFileSystem::new()
            .with_file("/p/.prettierrc", "{}")
            .with_file("/p/dprint.json", "{}");
        assert_eq!(detect_formatter(Path::new("/p"), &fs), Some(FormatterTool::Dprint));
    }

    #[test]
    fn detects_from_dev_dependencies() {
        let fs = MockFileSystem::new().with_file(
            "/p/package.json",
            r#"{ "devDependencies": { "prettier": "^3", "dprint": "^0.45" } }"#,
        );
        assert_eq!(detect_formatter(Path::new("/p"), &fs), Some(FormatterTool::Dprint));
    }

    #[test]
    fn nothing_detected() {
        let fs = MockFileSystem::new().with_file("/p/package.json", r#"{ "dependencies": {} }"#);
        assert_eq!(detect_formatter(Path::new("/p"), &fs), None);

        let fs = MockFileSystem::new().with_file("/p/package.json", "not json");
        assert_eq!(detect_formatter(Path::new("/p"), &fs), None);
    }

    #[test]
    fn setting_overrides_detection() {
        let fs = MockFileSystem::new().with_file("/p/biome.json", "{}");
        let cwd = Path::new("/p");
        assert_eq!(resolve_formatter(FormatterSetting::Disabled, cwd, &fs), None);
        assert_eq!(
            resolve_formatter(FormatterSetting::Tool(FormatterTool::Oxfmt), cwd, &fs),
            Some(FormatterTool::Oxfmt)
        );
        assert_eq!(
            resolve_formatter(FormatterSetting::Auto, cwd, &fs),
            Some(FormatterTool::Biome)
        );
    }

    #[test]
    fn npx_arguments() {
        let files = vec![PathBuf::from("src/index.ts")];
        assert_eq!(
            npx_args(FormatterTool::Biome, &files),
            vec!["biome", "format", "--write", "src/index.ts"]
        );
        assert_eq!(npx_args(FormatterTool::Dprint, &files), vec!["dprint", "fmt", "src/index.ts"]);
        assert_eq!(
            npx_args(FormatterTool::Prettier, &files),
            vec!["prettier", "--write", "src/index.ts"]
        );
        assert_eq!(npx_args(FormatterTool::Oxfmt, &files), vec!["oxfmt", "src/index.ts"]);
    }

    #[test]
    fn empty_file_list_is_a_no_op() {
        assert!(run_formatter(FormatterTool::Prettier, &[], Path::new("/nonexistent")).is_ok());
    }
}
