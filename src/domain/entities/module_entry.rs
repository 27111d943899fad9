//! ModuleEntry entity - one re-exported sibling of a barrel
//!
//! Entries are created fresh on every scan and never mutated.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::strip_extension;

/// How a module is re-exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    /// `export * from './x'`
    #[default]
    Star,
    /// `export * as X from './x'`
    Namespace,
}

impl ExportStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStyle::Star => "star",
            ExportStyle::Namespace => "namespace",
        }
    }
}

/// A file or sub-directory selected for re-export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Name inside the directory, extension included
    pub filename: String,
    /// Filename without its last extension; directories keep their name
    pub specifier: String,
    pub style: ExportStyle,
    pub is_directory: bool,
}

impl ModuleEntry {
    pub fn file(filename: impl Into<String>, style: ExportStyle) -> Self {
        let filename = filename.into();
        let specifier = strip_extension(&filename).to_string();
        Self {
            filename,
            specifier,
            style,
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>, style: ExportStyle) -> Self {
        let filename = name.into();
        Self {
            specifier: filename.clone(),
            filename,
            style,
            is_directory: true,
        }
    }

    /// Key stored in the scan cache; directories carry a trailing `/`
    pub fn cache_key(&self) -> String {
        if self.is_directory {
            format!("{}/", self.filename)
        } else {
            self.filename.clone()
        }
    }
}

/// Modules selected for one directory, sorted by specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub directory: PathBuf,
    pub modules: Vec<ModuleEntry>,
}

impl ScanResult {
    /// Selected file list as recorded in the scan cache
    pub fn cache_keys(&self) -> Vec<String> {
        self.modules.iter().map(ModuleEntry::cache_key).collect()
    }
}
