//! Scanner domain service
//!
//! Expands a rule's directory glob and selects, per directory, the modules the
//! barrel should re-export. All file access goes through the `FileSystem` port.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::ResolvedRule;
use crate::domain::entities::{ExportStyle, ModuleEntry, ScanResult};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{DirGlob, ExcludeSet, IncludeGlob};
use crate::error::{BarrelError, BarrelResult};

/// Outcome for one matched directory
pub type DirectoryScan = (PathBuf, BarrelResult<ScanResult>);

/// A directory child that may be re-exported
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    is_directory: bool,
}

pub struct Scanner<'a> {
    root: &'a Path,
    barrel_file: &'a str,
    exclude: ExcludeSet,
}

impl<'a> Scanner<'a> {
    /// Fails when an exclude pattern is not a valid glob
    pub fn new(root: &'a Path, barrel_file: &'a str, exclude: &[String]) -> BarrelResult<Self> {
        Ok(Self {
            root,
            barrel_file,
            exclude: ExcludeSet::new(exclude)?,
        })
    }

    /// Scan every directory matched by `rule`.
    ///
    /// The outer error means the rule itself is unusable (bad glob syntax).
    /// Per-directory failures are returned alongside successful scans.
    pub fn scan_rule<F: FileSystem>(
        &self,
        rule: &ResolvedRule,
        fs: &F,
    ) -> BarrelResult<Vec<DirectoryScan>> {
        let dir_glob = DirGlob::new(&rule.dirs)?;
        let includes = rule
            .modules
            .iter()
            .map(|m| Ok((IncludeGlob::new(&m.include)?, m.style)))
            .collect::<BarrelResult<Vec<_>>>()?;

        let dirs = dir_glob.expand(self.root, fs);
        tracing::debug!(rule = %rule.dirs, matched = dirs.len(), "expanded rule");

        Ok(dirs
            .into_iter()
            .map(|dir| {
                let result = self.scan_directory(&dir, &includes, fs);
                (dir, result)
            })
            .collect())
    }

    /// Select modules in one directory
    pub fn scan_directory<F: FileSystem>(
        &self,
        dir: &Path,
        includes: &[(IncludeGlob, ExportStyle)],
        fs: &F,
    ) -> BarrelResult<ScanResult> {
        let candidates = self.candidates(dir, fs)?;

        let mut seen = HashSet::new();
        let mut modules = Vec::new();
        for (include, style) in includes {
            for candidate in &candidates {
                if !include.matches(&candidate.name) || self.exclude.is_excluded(&candidate.name) {
                    continue;
                }
                if !seen.insert(candidate.name.clone()) {
                    continue;
                }
                modules.push(if candidate.is_directory {
                    ModuleEntry::directory(&candidate.name, *style)
                } else {
                    ModuleEntry::file(&candidate.name, *style)
                });
            }
        }

        modules.sort_by(|a, b| {
            a.specifier
                .cmp(&b.specifier)
                .then_with(|| a.filename.cmp(&b.filename))
        });

        Ok(ScanResult {
            directory: dir.to_path_buf(),
            modules,
        })
    }

    /// Direct files plus sub-directories that carry their own barrel
    fn candidates<F: FileSystem>(&self, dir: &Path, fs: &F) -> BarrelResult<Vec<Candidate>> {
        let entries = fs
            .read_dir(dir)
            .map_err(|source| BarrelError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut candidates: Vec<Candidate> = entries
            .into_iter()
            .filter(|entry| entry.name != self.barrel_file)
            .filter(|entry| !entry.is_dir() || fs.exists(&dir.join(&entry.name).join(self.barrel_file)))
            .map(|entry| Candidate {
                is_directory: entry.is_dir(),
                name: entry.name,
            })
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }
}
