//! FileSystem port - abstraction over file I/O operations
//!
//! The scanner, planner and executor only reach the disk through this trait,
//! so directory walking and ownership checks can run against an in-memory tree.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File not found
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// I/O error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A direct child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MockFileSystem` - in-memory for testing
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace file content atomically
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// List direct children (files and directories only, symlinks resolved)
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Last modification time, if the path exists
    fn modified(&self, path: &Path) -> Option<SystemTime>;

    /// File size in bytes, if the path exists
    fn size(&self, path: &Path) -> Option<u64>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        (**self).modified(path)
    }

    fn size(&self, path: &Path) -> Option<u64> {
        (**self).size(path)
    }
}

/// In-memory file system for testing
///
/// Directories are implied by file paths and can also be added explicitly.
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockFileSystem {
    pub files: std::sync::Arc<std::sync::Mutex<std::collections::BTreeMap<PathBuf, String>>>,
    dirs: std::sync::Arc<std::sync::Mutex<std::collections::BTreeSet<PathBuf>>>,
    unreadable: std::sync::Arc<std::sync::Mutex<std::collections::BTreeSet<PathBuf>>>,
    writes: std::sync::Arc<std::sync::Mutex<Vec<PathBuf>>>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.lock().unwrap().insert(path.into());
        self
    }

    /// Make `read_dir` fail for this directory
    pub fn with_unreadable(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.dirs.lock().unwrap().insert(path.clone());
        self.unreadable.lock().unwrap().insert(path);
        self
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    /// Paths written through the port, in order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }

    fn all_dirs(&self) -> std::collections::BTreeSet<PathBuf> {
        let mut dirs = self.dirs.lock().unwrap().clone();
        for file in self.files.lock().unwrap().keys() {
            let mut parent = file.parent();
            while let Some(p) = parent {
                dirs.insert(p.to_path_buf());
                parent = p.parent();
            }
        }
        let explicit: Vec<PathBuf> = dirs.iter().cloned().collect();
        for dir in explicit {
            let mut parent = dir.parent();
            while let Some(p) = parent {
                dirs.insert(p.to_path_buf());
                parent = p.parent();
            }
        }
        dirs
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.content(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.writes.lock().unwrap().push(path.to_path_buf());
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.all_dirs().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.all_dirs().contains(path)
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        if self.unreadable.lock().unwrap().contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        let dirs = self.all_dirs();
        if !dirs.contains(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        let mut entries = Vec::new();
        for file in self.files.lock().unwrap().keys() {
            if file.parent() == Some(path) {
                if let Some(name) = file.file_name() {
                    entries.push(DirEntry::file(name.to_string_lossy()));
                }
            }
        }
        for dir in &dirs {
            if dir.parent() == Some(path) {
                if let Some(name) = dir.file_name() {
                    entries.push(DirEntry::directory(name.to_string_lossy()));
                }
            }
        }
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        if self.exists(path) {
            Some(SystemTime::UNIX_EPOCH)
        } else {
            None
        }
    }

    fn size(&self, path: &Path) -> Option<u64> {
        self.content(path).map(|c| c.len() as u64)
    }
}
