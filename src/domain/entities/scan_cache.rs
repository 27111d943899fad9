//! ScanCache entity - rendered barrels from the previous pass
//!
//! Keyed by directory (relative to the working root). A directory entry is
//! reused only when its selected file list is unchanged and the cache as a
//! whole was produced under the same config, extension mode and tsconfig.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigFingerprint, ExtensionMode};

/// Current on-disk format version
pub const SCAN_CACHE_VERSION: u32 = 1;

/// Cached state of one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Selected modules in output order; directories end with `/`
    pub files: Vec<String>,
    pub rendered_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCache {
    pub version: u32,
    pub config_fingerprint: ConfigFingerprint,
    pub extension_mode: ExtensionMode,
    /// Milliseconds since the epoch, `None` when there is no tsconfig.json
    pub tsconfig_mtime: Option<u64>,
    #[serde(default)]
    pub directories: BTreeMap<String, CacheEntry>,
}

impl ScanCache {
    pub fn new(
        config_fingerprint: ConfigFingerprint,
        extension_mode: ExtensionMode,
        tsconfig_mtime: Option<u64>,
    ) -> Self {
        Self {
            version: SCAN_CACHE_VERSION,
            config_fingerprint,
            extension_mode,
            tsconfig_mtime,
            directories: BTreeMap::new(),
        }
    }

    /// Whether entries of this cache may be reused by a pass keyed as `current`
    pub fn is_compatible_with(&self, current: &ScanCache) -> bool {
        self.version == SCAN_CACHE_VERSION
            && self.config_fingerprint == current.config_fingerprint
            && self.extension_mode == current.extension_mode
            && self.tsconfig_mtime == current.tsconfig_mtime
    }

    /// Cached content for `directory` if its file list is unchanged
    pub fn lookup(&self, directory: &str, files: &[String]) -> Option<&str> {
        self.directories
            .get(directory)
            .filter(|entry| entry.files == files)
            .map(|entry| entry.rendered_content.as_str())
    }

    pub fn insert(&mut self, directory: impl Into<String>, files: Vec<String>, rendered: String) {
        self.directories.insert(
            directory.into(),
            CacheEntry {
                files,
                rendered_content: rendered,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}
