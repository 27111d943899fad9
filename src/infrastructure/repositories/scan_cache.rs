//! JSON Scan Cache Repository
//!
//! Stores the scan cache as `node_modules/.cache/barrelsmith/cache.json`
//! under the working root. Any read or decode failure is a cache miss.

use std::path::{Path, PathBuf};

use crate::domain::entities::{ScanCache, SCAN_CACHE_VERSION};
use crate::domain::ports::{FileSystem, FsError};
use crate::error::{BarrelError, BarrelResult};
use crate::infrastructure::fs::LocalFs;

/// Cache location relative to the working root
pub const CACHE_RELATIVE_PATH: &str = "node_modules/.cache/barrelsmith/cache.json";

/// JSON-based scan cache repository
pub struct JsonCacheRepository<F: FileSystem = LocalFs> {
    fs: F,
    path: PathBuf,
}

impl JsonCacheRepository<LocalFs> {
    /// Repository for the project rooted at `cwd`
    pub fn new(cwd: &Path) -> Self {
        Self::with_fs(LocalFs::new(), cwd)
    }
}

impl<F: FileSystem> JsonCacheRepository<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: F, cwd: &Path) -> Self {
        Self {
            fs,
            path: cwd.join(CACHE_RELATIVE_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previous cache, or `None` when absent, unreadable or from another version
    pub fn load(&self) -> Option<ScanCache> {
        match self.try_load() {
            Ok(cache) => cache,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "ignoring scan cache: {e}");
                None
            }
        }
    }

    /// Like `load`, but reports why the cache is unusable
    pub fn try_load(&self) -> BarrelResult<Option<ScanCache>> {
        let content = match self.fs.read(&self.path) {
            Ok(content) => content,
            Err(FsError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let cache: ScanCache =
            serde_json::from_str(&content).map_err(|e| BarrelError::CacheCorrupt {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        if cache.version != SCAN_CACHE_VERSION {
            return Err(BarrelError::CacheCorrupt {
                path: self.path.clone(),
                message: format!(
                    "cache version {} (expected {SCAN_CACHE_VERSION})",
                    cache.version
                ),
            });
        }
        Ok(Some(cache))
    }

    pub fn save(&self, cache: &ScanCache) -> BarrelResult<()> {
        let json = serde_json::to_string_pretty(cache).map_err(|e| BarrelError::CacheCorrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        self.fs.write(&self.path, &json)?;
        Ok(())
    }

    /// Save, logging instead of failing
    pub fn save_or_warn(&self, cache: &ScanCache) {
        if let Err(e) = self.save(cache) {
            tracing::debug!(path = %self.path.display(), "could not write scan cache: {e}");
        }
    }
}
