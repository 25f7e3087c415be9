//! The storage collaborator boundary.
//!
//! The core consumes storage through this trait and never deletes,
//! locks, or watches files. [`DiskStorage`] is the production
//! implementation; [`MemoryStorage`] backs tests and embedded use
//! without touching a real filesystem.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Byte-level storage access.
///
/// "Directory not found" and "file not found" both surface as
/// [`io::ErrorKind::NotFound`]; callers treat that kind as an expected
/// absence and everything else as an error.
pub trait Storage {
    /// Reads the full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error; `NotFound` means the file or a directory
    /// on the way to it does not exist.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes `contents` to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Lists the immediate subdirectories of `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error; `NotFound` if `path` does not exist.
    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Storage backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStorage;

impl Storage for DiskStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut directories = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                directories.push(entry.path());
            }
        }
        directories.sort();
        Ok(directories)
    }
}

/// In-memory storage keyed by path.
///
/// Clones share the same backing map, so a test can keep a handle for
/// assertions while the provider owns another.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use strata::provider::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// storage.insert(Path::new("/a/b.ini"), "A=1\n");
/// assert_eq!(storage.read(Path::new("/a/b.ini")).unwrap(), b"A=1\n");
/// assert!(storage.read(Path::new("/missing")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Rc<RefCell<HashMap<PathBuf, Vec<u8>>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file without counting it as a write.
    pub fn insert(&self, path: &Path, contents: impl AsRef<[u8]>) {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
    }

    /// Returns a file's content, if present.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// How many writes have been performed through [`Storage::write`].
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let files = self.files.borrow();
        let mut directories: Vec<PathBuf> = files
            .keys()
            .filter_map(|file| {
                let rest = file.strip_prefix(path).ok()?;
                let first = rest.components().next()?;
                if rest.components().count() > 1 {
                    Some(path.join(first))
                } else {
                    None
                }
            })
            .collect();
        if directories.is_empty() && !files.keys().any(|file| file.starts_with(path)) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}", path.display()),
            ));
        }
        directories.sort();
        directories.dedup();
        Ok(directories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_storage_roundtrip_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deep/file.ini");
        let storage = DiskStorage;
        storage.write(&path, b"A=1\n").unwrap();
        assert_eq!(storage.read(&path).unwrap(), b"A=1\n");
    }

    #[test]
    fn test_disk_storage_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = DiskStorage.read(&dir.path().join("missing.ini")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_disk_storage_missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = DiskStorage
            .read(&dir.path().join("no/such/dir/file.ini"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_disk_storage_lists_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("file"), b"x").unwrap();
        let dirs = DiskStorage.list_subdirectories(dir.path()).unwrap();
        assert_eq!(dirs, vec![dir.path().join("a"), dir.path().join("b")]);
    }

    #[test]
    fn test_memory_storage_counts_writes() {
        let storage = MemoryStorage::new();
        let path = Path::new("/x/y.ini");
        storage.insert(path, "seed");
        assert_eq!(storage.write_count(), 0);
        storage.write(path, b"new").unwrap();
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.contents(path).unwrap(), b"new");
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.insert(Path::new("/f"), "1");
        assert_eq!(handle.contents(Path::new("/f")).unwrap(), b"1");
    }

    #[test]
    fn test_memory_storage_lists_subdirectories() {
        let storage = MemoryStorage::new();
        storage.insert(Path::new("/root/Platforms/Win64/Config/X.ini"), "");
        storage.insert(Path::new("/root/Platforms/Linux/Config/X.ini"), "");
        storage.insert(Path::new("/root/Platforms/readme"), "");
        let dirs = storage
            .list_subdirectories(Path::new("/root/Platforms"))
            .unwrap();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/root/Platforms/Linux"),
                PathBuf::from("/root/Platforms/Win64"),
            ]
        );
    }

    #[test]
    fn test_memory_storage_missing_directory_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage
            .list_subdirectories(Path::new("/nowhere"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
