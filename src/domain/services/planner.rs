//! Planner and executor
//!
//! `plan` reads the tree and decides one action per barrel path. `execute`
//! applies the writable actions in plan order. Planning never writes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::ResolvedConfig;
use crate::domain::entities::{Action, PlanResult, ScanCache, ScanResult};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::globs::relative_slash_path;
use crate::domain::value_objects::{check_collisions, ExtensionMode};
use crate::error::BarrelResult;

use super::extension_detector::{detect_extension_mode, tsconfig_mtime};
use super::renderer::render_barrel;
use super::scanner::Scanner;
use super::writer::plan_write;

/// Fixed mode from the config, or detection from `tsconfig.json`
pub fn resolve_extension_mode<F: FileSystem>(
    config: &ResolvedConfig,
    cwd: &Path,
    fs: &F,
) -> ExtensionMode {
    config
        .extensions
        .fixed()
        .unwrap_or_else(|| detect_extension_mode(cwd, fs))
}

/// Plan every rule without a cache
pub fn plan<F: FileSystem>(config: &ResolvedConfig, cwd: &Path, fs: &F) -> PlanResult {
    plan_cached(config, cwd, fs, None).0
}

/// Plan every rule, reusing rendered content from `previous` where the
/// selected file list is unchanged. Returns the cache for this pass.
pub fn plan_cached<F: FileSystem>(
    config: &ResolvedConfig,
    cwd: &Path,
    fs: &F,
    previous: Option<&ScanCache>,
) -> (PlanResult, ScanCache) {
    let mode = resolve_extension_mode(config, cwd, fs);
    let mut next = ScanCache::new(config.fingerprint(), mode, tsconfig_mtime(cwd, fs));
    let previous = previous.filter(|cache| {
        let compatible = cache.is_compatible_with(&next);
        if !compatible {
            tracing::debug!("scan cache invalidated");
        }
        compatible
    });

    let mut result = PlanResult::new();
    let scanner = match Scanner::new(cwd, &config.barrel_file, &config.exclude) {
        Ok(scanner) => scanner,
        Err(e) => {
            result.push_error(cwd, e);
            return (result, next);
        }
    };

    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut hits = 0usize;

    for rule in &config.rules {
        let scans = match scanner.scan_rule(rule, fs) {
            Ok(scans) => scans,
            Err(e) => {
                result.push_error(format!("rule({})", rule.dirs), e);
                continue;
            }
        };

        for (dir, scan) in scans {
            if !claimed.insert(dir.clone()) {
                tracing::debug!(dir = %dir.display(), rule = %rule.dirs, "directory already planned by an earlier rule");
                continue;
            }
            let planned = scan.and_then(|scan| {
                let key = relative_slash_path(cwd, &dir).unwrap_or_else(|| dir.display().to_string());
                let files = scan.cache_keys();
                let cached = previous.and_then(|cache| cache.lookup(&key, &files));
                if cached.is_some() {
                    hits += 1;
                }
                let rendered = match cached {
                    Some(content) => content.to_string(),
                    None => render_checked(&scan, mode)?,
                };
                let action = plan_directory(&dir, &config.barrel_file, &rendered, fs)?;
                next.insert(key, files, rendered);
                Ok(action)
            });

            match planned {
                Ok(action) => result.push_action(action),
                Err(e) => result.push_error(dir, e),
            }
        }
    }

    tracing::debug!(
        actions = result.actions.len(),
        errors = result.errors.len(),
        cache_hits = hits,
        "planned"
    );
    (result, next)
}

fn render_checked(scan: &ScanResult, mode: ExtensionMode) -> BarrelResult<String> {
    check_collisions(&scan.modules)?;
    Ok(render_barrel(&scan.modules, mode))
}

fn plan_directory<F: FileSystem>(
    dir: &Path,
    barrel_file: &str,
    rendered: &str,
    fs: &F,
) -> BarrelResult<Action> {
    let target = dir.join(barrel_file);
    let existing = match fs.read(&target) {
        Ok(content) => Some(content),
        Err(FsError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(plan_write(&target, existing.as_deref(), rendered))
}

/// Write Create/Update actions in plan order.
///
/// `on_before_write` runs for each path immediately before its write.
/// Returns the written paths.
pub fn execute<F: FileSystem>(
    plan: &PlanResult,
    fs: &F,
    on_before_write: Option<&dyn Fn(&Path)>,
) -> BarrelResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for action in plan.stale() {
        let Some(content) = action.content() else {
            continue;
        };
        let path = action.path();
        if let Some(hook) = on_before_write {
            hook(path);
        }
        fs.write(path, content)?;
        tracing::debug!(path = %path.display(), kind = ?action.kind(), "wrote barrel");
        written.push(path.to_path_buf());
    }
    Ok(written)
}

#[cfg(test)]
mod tests;
