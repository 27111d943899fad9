//! Directory and module glob matching
//!
//! Directory globs are matched against `/`-separated paths relative to the
//! working root. Module globs and excludes are matched against a bare entry
//! name inside one directory. Brace alternation (`*.{ts,tsx}`) is supported.
//! Hidden entries only match a pattern that names them with a leading dot.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::domain::ports::FileSystem;
use crate::error::{BarrelError, BarrelResult};

/// Directories never walked into during expansion
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

fn invalid(pattern: &str, e: globset::Error) -> BarrelError {
    BarrelError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.kind().to_string(),
    }
}

/// `*` and `?` never cross a `/`
fn build(pattern: &str) -> BarrelResult<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| invalid(pattern, e))
}

fn compile(pattern: &str) -> BarrelResult<GlobMatcher> {
    Ok(build(pattern)?.compile_matcher())
}

/// Pattern spells out a dot-prefixed segment
fn names_hidden(pattern: &str) -> bool {
    pattern.split('/').any(|segment| segment.starts_with('.'))
}

fn has_hidden_segment(rel: &str) -> bool {
    rel.split('/').any(|segment| segment.starts_with('.'))
}

fn has_magic(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

/// `/`-joined relative path, or `None` when `path` is not below `root`
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

/// A rule's `dirs` glob
#[derive(Debug, Clone)]
pub struct DirGlob {
    raw: String,
    pattern: GlobMatcher,
    allows_hidden: bool,
    /// Pattern ends in `/**`: the base directory matches too
    base: Option<String>,
    /// Leading segments without glob syntax
    literal_prefix: Vec<String>,
    /// Maximum walk depth below the literal prefix, `None` when unbounded
    max_depth: Option<usize>,
}

impl DirGlob {
    pub fn new(raw: &str) -> BarrelResult<Self> {
        let normalized = raw
            .trim()
            .trim_start_matches("./")
            .trim_end_matches('/')
            .to_string();
        let pattern = compile(&normalized)?;
        let base = normalized
            .strip_suffix("/**")
            .map(str::to_string)
            .filter(|b| !has_magic(b));

        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        let literal_prefix: Vec<String> = segments
            .iter()
            .take_while(|s| !has_magic(s))
            .map(|s| s.to_string())
            .collect();
        let rest = &segments[literal_prefix.len()..];
        let max_depth = if rest.iter().any(|s| s.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Ok(Self {
            raw: raw.to_string(),
            pattern,
            allows_hidden: names_hidden(&normalized),
            base,
            literal_prefix,
            max_depth,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a `/`-separated path relative to the working root
    pub fn matches_relative(&self, rel: &str) -> bool {
        if self.base.as_deref() == Some(rel) {
            return true;
        }
        if rel.is_empty() || (!self.allows_hidden && has_hidden_segment(rel)) {
            return false;
        }
        self.pattern.is_match(rel)
    }

    /// Match an absolute directory against this glob
    pub fn matches_dir(&self, root: &Path, dir: &Path) -> bool {
        relative_slash_path(root, dir)
            .map(|rel| self.matches_relative(&rel))
            .unwrap_or(false)
    }

    /// All existing directories under `root` matching this glob, sorted
    pub fn expand<F: FileSystem>(&self, root: &Path, fs: &F) -> Vec<PathBuf> {
        let start = self
            .literal_prefix
            .iter()
            .fold(root.to_path_buf(), |acc, seg| acc.join(seg));
        if !fs.is_dir(&start) {
            return Vec::new();
        }

        let mut matched = Vec::new();
        let mut stack = vec![(start, 0usize)];
        while let Some((dir, depth)) = stack.pop() {
            if self.matches_dir(root, &dir) {
                matched.push(dir.clone());
            }
            if self.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            let Ok(entries) = fs.read_dir(&dir) else {
                tracing::debug!(dir = %dir.display(), "skipping unreadable directory during expansion");
                continue;
            };
            for entry in entries.into_iter().filter(|e| e.is_dir()) {
                if SKIPPED_DIRS.contains(&entry.name.as_str()) {
                    continue;
                }
                stack.push((dir.join(&entry.name), depth + 1));
            }
        }
        matched.sort();
        matched
    }
}

/// Compiled exclude patterns, matched against entry names
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    set: GlobSet,
}

impl Default for ExcludeSet {
    fn default() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> BarrelResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(build(pattern.trim_start_matches("./"))?);
        }
        let set = builder
            .build()
            .map_err(|e| invalid(&patterns.join(", "), e))?;
        Ok(Self { set })
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

/// A module `include` glob
#[derive(Debug, Clone)]
pub struct IncludeGlob {
    pattern: GlobMatcher,
    allows_hidden: bool,
}

impl IncludeGlob {
    pub fn new(raw: &str) -> BarrelResult<Self> {
        let normalized = raw.trim().trim_start_matches("./");
        Ok(Self {
            pattern: compile(normalized)?,
            allows_hidden: names_hidden(normalized),
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        if !self.allows_hidden && name.starts_with('.') {
            return false;
        }
        self.pattern.is_match(name)
    }
}
