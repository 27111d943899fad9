//! Error types for barrelsmith
//!
//! Library code returns [`BarrelError`]; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for barrelsmith operations
pub type BarrelResult<T> = Result<T, BarrelError>;

/// Main error type for barrelsmith operations
#[derive(Error, Debug)]
pub enum BarrelError {
    /// No configuration file in the working directory
    #[error("no config found in {} (searched: {})", cwd.display(), searched.join(", "))]
    ConfigNotFound { cwd: PathBuf, searched: Vec<String> },

    /// Configuration file exists but could not be parsed or validated
    #[error("invalid config at {}: {message}", path.display())]
    ConfigInvalid { path: PathBuf, message: String },

    /// Two namespace-style modules derive the same identifier
    #[error("namespace collision: '{first}' and '{second}' both map to '{derived}'")]
    NamespaceCollision {
        first: String,
        second: String,
        derived: String,
    },

    /// A filename does not produce a valid namespace identifier
    #[error("'{filename}' does not produce a valid identifier (got '{derived}')")]
    InvalidIdentifier { filename: String, derived: String },

    /// A directory or module glob failed to compile
    #[error("invalid glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// A rule directory could not be listed
    #[error("cannot read directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Change notification backend failed
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Scan cache file could not be decoded
    #[error("unusable scan cache at {}: {message}", path.display())]
    CacheCorrupt { path: PathBuf, message: String },

    /// External formatter exited unsuccessfully
    #[error("formatter '{tool}' failed: {message}")]
    Formatter { tool: String, message: String },
}
