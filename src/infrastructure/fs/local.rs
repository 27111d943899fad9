//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use crate::domain::ports::file_system::{DirEntry, FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temp file in the target directory which is then renamed
/// over the target, so readers never observe a partial barrel.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

/// Prefix of the temp files `atomic_write` renames into place
pub const TEMP_FILE_PREFIX: &str = ".barrelsmith-";

/// Write `content` to `path` via temp file + rename
pub fn atomic_write(path: &Path, content: &[u8]) -> FsResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| FsError::from_io(dir, e))?;
    tmp.write_all(content)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| FsError::from_io(path, e))?;
    tmp.persist(path)
        .map_err(|e| FsError::from_io(path, e.error))?;
    Ok(())
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        atomic_write(path, content.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| FsError::from_io(path, e))? {
            let entry = entry.map_err(|e| FsError::from_io(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so linked modules behave like their targets
            let Ok(meta) = std::fs::metadata(entry.path()) else {
                continue;
            };
            if meta.is_dir() {
                entries.push(DirEntry::directory(name));
            } else if meta.is_file() {
                entries.push(DirEntry::file(name));
            }
        }
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    fn size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path).map(|m| m.len()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("index.ts");
        let fs = LocalFs::new();

        fs.write(&file, "export {};\n").unwrap();
        assert_eq!(fs.read(&file).unwrap(), "export {};\n");
    }

    #[test]
    fn local_fs_write_replaces_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("index.ts");
        std::fs::write(&file, "old content that is longer").unwrap();

        LocalFs::new().write(&file, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("index.ts");

        LocalFs::new().write(&file, "content").unwrap();
        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        fs.write(&dir.path().join("index.ts"), "x").unwrap();

        let names: Vec<_> = fs
            .read_dir(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["index.ts".to_string()]);
    }

    #[test]
    fn local_fs_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LocalFs::new().read(&dir.path().join("nope.ts")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn local_fs_read_dir_classifies_entries() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.ts"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut entries = LocalFs::new().read_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries, vec![DirEntry::file("a.ts"), DirEntry::directory("sub")]);
    }

    #[test]
    fn local_fs_metadata() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.ts");
        let fs = LocalFs::new();
        assert!(fs.modified(&file).is_none());

        fs.write(&file, "12345").unwrap();
        assert!(fs.modified(&file).is_some());
        assert_eq!(fs.size(&file), Some(5));
        assert!(fs.is_dir(dir.path()));
    }
}
