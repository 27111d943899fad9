//! Extension mode detection from `tsconfig.json`
//!
//! Only `moduleResolution`, `allowImportingTsExtensions`, `noEmit` and
//! `emitDeclarationOnly` matter. Relative `extends` chains are followed;
//! package-name bases are not resolved.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde_json::{Map, Value};

use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::ExtensionMode;
use crate::error::{BarrelError, BarrelResult};

pub const TSCONFIG_FILE: &str = "tsconfig.json";

const MAX_EXTENDS_DEPTH: usize = 8;

/// Detect the extension mode for the project at `cwd`.
///
/// A missing tsconfig means no extensions; an unreadable one logs a warning
/// and also means no extensions.
pub fn detect_extension_mode<F: FileSystem>(cwd: &Path, fs: &F) -> ExtensionMode {
    let path = cwd.join(TSCONFIG_FILE);
    match load_compiler_options(&path, fs, 0) {
        Ok(options) => {
            let mode = mode_from_options(&options);
            tracing::debug!(%mode, "detected extension mode from tsconfig.json");
            mode
        }
        Err(BarrelError::Fs(FsError::NotFound(_))) => {
            tracing::debug!("no tsconfig.json, using no extensions");
            ExtensionMode::None
        }
        Err(e) => {
            tracing::warn!("could not read tsconfig.json, defaulting to no extensions: {e}");
            ExtensionMode::None
        }
    }
}

/// Modification time of `tsconfig.json` in milliseconds since the epoch
pub fn tsconfig_mtime<F: FileSystem>(cwd: &Path, fs: &F) -> Option<u64> {
    fs.modified(&cwd.join(TSCONFIG_FILE))
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
}

/// Decide the mode from merged `compilerOptions`
pub fn mode_from_options(options: &Map<String, Value>) -> ExtensionMode {
    let flag = |key: &str| options.get(key).and_then(Value::as_bool) == Some(true);
    let resolution = options
        .get("moduleResolution")
        .and_then(Value::as_str)
        .map(str::to_lowercase);

    match resolution.as_deref() {
        Some("node16") | Some("nodenext") => {
            if flag("allowImportingTsExtensions") && (flag("noEmit") || flag("emitDeclarationOnly")) {
                ExtensionMode::Ts
            } else {
                ExtensionMode::Js
            }
        }
        _ => ExtensionMode::None,
    }
}

fn load_compiler_options<F: FileSystem>(
    path: &Path,
    fs: &F,
    depth: usize,
) -> BarrelResult<Map<String, Value>> {
    let content = fs.read(path)?;
    let json: Value =
        serde_json::from_str(&strip_jsonc(&content)).map_err(|e| BarrelError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut merged = Map::new();
    if depth < MAX_EXTENDS_DEPTH {
        for base in extends_targets(&json, path) {
            match load_compiler_options(&base, fs, depth + 1) {
                Ok(options) => merged.extend(options),
                Err(e) => tracing::debug!(base = %base.display(), "skipping tsconfig base: {e}"),
            }
        }
    } else {
        tracing::debug!(path = %path.display(), "tsconfig extends chain too deep");
    }

    if let Some(Value::Object(own)) = json.get("compilerOptions") {
        merged.extend(own.clone());
    }
    Ok(merged)
}

/// Relative `extends` entries resolved against the extending file
fn extends_targets(json: &Value, path: &Path) -> Vec<PathBuf> {
    let entries: Vec<&str> = match json.get("extends") {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    entries
        .into_iter()
        .filter(|e| e.starts_with("./") || e.starts_with("../"))
        .map(|e| {
            let target = dir.join(e);
            if target.extension().is_some_and(|ext| ext == "json") {
                target
            } else {
                target.with_file_name(format!(
                    "{}.json",
                    target.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
                ))
            }
        })
        .collect()
}

/// Strip `//` and `/* */` comments and trailing commas outside strings
pub fn strip_jsonc(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            in_string = c != '"';
            i += 1;
            continue;
        }

        match (c, chars.get(i + 1)) {
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                    i += 1;
                }
                i += 2;
            }
            _ => {
                in_string = c == '"';
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        in_string = c == '"';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockFileSystem;

    fn detect(fs: &MockFileSystem) -> ExtensionMode {
        detect_extension_mode(Path::new("/p"), fs)
    }

    #[test]
    fn missing_tsconfig_means_none() {
        assert_eq!(detect(&MockFileSystem::new()), ExtensionMode::None);
    }

    #[test]
    fn bundler_resolution_means_none() {
        let fs = MockFileSystem::new().with_file(
            "/p/tsconfig.json",
            r#"{ "compilerOptions": { "moduleResolution": "bundler" } }"#,
        );
        assert_eq!(detect(&fs), ExtensionMode::None);
    }

    #[test]
    fn nodenext_means_js() {
        let fs = MockFileSystem::new().with_file(
            "/p/tsconfig.json",
            r#"{ "compilerOptions": { "moduleResolution": "NodeNext" } }"#,
        );
        assert_eq!(detect(&fs), ExtensionMode::Js);
    }

    #[test]
    fn ts_extensions_need_no_emit() {
        let fs = MockFileSystem::new().with_file(
            "/p/tsconfig.json",
            r#"{ "compilerOptions": {
                "moduleResolution": "node16",
                "allowImportingTsExtensions": true,
                "noEmit": true
            } }"#,
        );
        assert_eq!(detect(&fs), ExtensionMode::Ts);

        let fs = MockFileSystem::new().with_file(
            "/p/tsconfig.json",
            r#"{ "compilerOptions": {
                "moduleResolution": "node16",
                "allowImportingTsExtensions": true
            } }"#,
        );
        assert_eq!(detect(&fs), ExtensionMode::Js);
    }

    #[test]
    fn comments_and_trailing_commas_are_tolerated() {
        let fs = MockFileSystem::new().with_file(
            "/p/tsconfig.json",
            r#"{
                // resolution
                "compilerOptions": {
                    /* node style */
                    "moduleResolution": "nodenext",
                    "outDir": "dist//out",
                },
            }"#,
        );
        assert_eq!(detect(&fs), ExtensionMode::Js);
    }

    #[test]
    fn extends_chain_is_merged_child_last() {
        let fs = MockFileSystem::new()
            .with_file(
                "/p/config/base.json",
                r#"{ "compilerOptions": { "moduleResolution": "nodenext", "noEmit": true } }"#,
            )
            .with_file(
                "/p/tsconfig.json",
                r#"{ "extends": "./config/base", "compilerOptions": { "allowImportingTsExtensions": true } }"#,
            );
        assert_eq!(detect(&fs), ExtensionMode::Ts);
    }

    #[test]
    fn child_overrides_base() {
        let fs = MockFileSystem::new()
            .with_file(
                "/p/base.json",
                r#"{ "compilerOptions": { "moduleResolution": "nodenext" } }"#,
            )
            .with_file(
                "/p/tsconfig.json",
                r#"{ "extends": "./base.json", "compilerOptions": { "moduleResolution": "bundler" } }"#,
            );
        assert_eq!(detect(&fs), ExtensionMode::None);
    }

    #[test]
    fn cyclic_extends_terminates() {
        let fs = MockFileSystem::new().with_file(
            "/p/tsconfig.json",
            r#"{ "extends": "./tsconfig.json", "compilerOptions": { "moduleResolution": "node16" } }"#,
        );
        assert_eq!(detect(&fs), ExtensionMode::Js);
    }

    #[test]
    fn malformed_tsconfig_falls_back_to_none() {
        let fs = MockFileSystem::new().with_file("/p/tsconfig.json", "{ not json");
        assert_eq!(detect(&fs), ExtensionMode::None);
    }

    #[test]
    fn strip_keeps_slashes_inside_strings() {
        let stripped = strip_jsonc("{\"a\": \"http://x\", /* c */ \"b\": [1, 2, // two\n],}");
        let value: Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], "http://x");
        assert_eq!(value["b"], serde_json::json!([1, 2]));
    }
}
