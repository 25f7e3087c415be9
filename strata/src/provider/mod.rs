//! Loading, creating and saving documents for file references.
//!
//! The provider resolves a [`FileReference`] to a path through
//! [`PathLayout`] and performs the degradation and change-detection
//! policies: missing files load as fresh empty documents, and saving
//! writes only when the rendered text actually differs from what is
//! already stored.

pub mod layout;
pub mod storage;

pub use layout::{DirectoryConvention, PathLayout};
pub use storage::{DiskStorage, MemoryStorage, Storage};

use std::io::ErrorKind;

use crate::error::{Error, Result};
use crate::hierarchy::FileReference;
use crate::text::{Document, DEFAULT_LINE_ENDING};

/// Loads and saves documents through a [`Storage`] collaborator.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use strata::hierarchy::{Domain, FileReference};
/// use strata::provider::{FileProvider, MemoryStorage, PathLayout};
///
/// let storage = MemoryStorage::new();
/// storage.insert(Path::new("/project/Config/DefaultGame.ini"), "[A]\nK=1\n");
///
/// let provider = FileProvider::new(
///     storage,
///     PathLayout::new().with_project_root(Path::new("/project")),
/// );
/// let reference = FileReference::new(
///     Domain::Project, None, Some("Game".to_string()),
/// ).unwrap();
/// let (document, loaded) = provider.load_or_create(&reference).unwrap();
/// assert!(loaded);
/// assert_eq!(document.sections.len(), 1);
/// ```
#[derive(Debug)]
pub struct FileProvider<S: Storage> {
    storage: S,
    layout: PathLayout,
    default_newline: &'static str,
}

impl<S: Storage> FileProvider<S> {
    /// Creates a provider over `storage` with the given layout.
    #[must_use]
    pub fn new(storage: S, layout: PathLayout) -> Self {
        Self {
            storage,
            layout,
            default_newline: DEFAULT_LINE_ENDING,
        }
    }

    /// Overrides the default newline used when rendering documents
    /// whose endings are unspecified.
    #[must_use]
    pub fn with_default_newline(mut self, newline: &'static str) -> Self {
        self.default_newline = newline;
        self
    }

    /// The path layout in use.
    #[must_use]
    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    /// The storage collaborator.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the document for `reference`, or creates an empty one.
    ///
    /// The boolean is true iff an existing file was parsed. A
    /// reference that resolves to no path, a missing file, and a
    /// missing directory all yield a fresh empty document.
    ///
    /// # Errors
    ///
    /// Read failures other than not-found are surfaced unmodified, as
    /// is invalid UTF-8 content.
    pub fn load_or_create(&self, reference: &FileReference) -> Result<(Document, bool)> {
        let mut document = Document::new();
        document.reference = Some(reference.clone());

        let Some(path) = self.layout.resolve(reference) else {
            return Ok((document, false));
        };
        document.display_name = Some(path.display().to_string());

        match self.storage.read(&path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes).map_err(|_| Error::InvalidEncoding {
                    context: path.display().to_string(),
                })?;
                document.read_str(&text);
                log::debug!("loaded {}", path.display());
                Ok((document, true))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no file for {reference}, created empty document");
                Ok((document, false))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Saves `document` if its rendered text differs from the stored
    /// content. Returns true iff a write was performed.
    ///
    /// A read failure on the existing file is treated as "no existing
    /// content"; in that case blank rendered text is not written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingReference`] for documents without a
    /// reference, and surfaces write failures.
    pub fn save_if_changed(&self, document: &Document) -> Result<bool> {
        let reference = document.reference.as_ref().ok_or(Error::MissingReference)?;
        let Some(path) = self.layout.resolve(reference) else {
            return Ok(false);
        };

        let rendered = document.write_string(self.default_newline);
        let existing = self
            .storage
            .read(&path)
            .ok()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

        let should_write = match &existing {
            Some(current) => *current != rendered,
            None => !rendered.trim().is_empty(),
        };
        if !should_write {
            return Ok(false);
        }

        self.storage.write(&path, rendered.as_bytes())?;
        log::debug!("saved {}", path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Domain;
    use std::io;
    use std::path::{Path, PathBuf};

    fn project_reference(type_name: &str) -> FileReference {
        FileReference::new(Domain::Project, None, Some(type_name.to_string())).unwrap()
    }

    fn provider(storage: MemoryStorage) -> FileProvider<MemoryStorage> {
        FileProvider::new(
            storage,
            PathLayout::new()
                .with_engine_root(Path::new("/engine"))
                .with_project_root(Path::new("/project")),
        )
    }

    #[test]
    fn test_load_existing_file() {
        let storage = MemoryStorage::new();
        storage.insert(Path::new("/project/Config/DefaultGame.ini"), "[A]\nK=1\n");
        let (document, loaded) = provider(storage).load_or_create(&project_reference("Game")).unwrap();
        assert!(loaded);
        assert_eq!(document.sections.len(), 1);
        assert_eq!(
            document.display_name.as_deref(),
            Some("/project/Config/DefaultGame.ini")
        );
    }

    #[test]
    fn test_load_missing_file_creates_empty() {
        let (document, loaded) = provider(MemoryStorage::new())
            .load_or_create(&project_reference("Game"))
            .unwrap();
        assert!(!loaded);
        assert!(document.sections.is_empty());
        assert_eq!(document.reference, Some(project_reference("Game")));
    }

    #[test]
    fn test_load_unresolvable_reference_creates_empty() {
        let storage = MemoryStorage::new();
        let provider = FileProvider::new(storage, PathLayout::new());
        let (document, loaded) = provider.load_or_create(&project_reference("Game")).unwrap();
        assert!(!loaded);
        assert!(document.display_name.is_none());
    }

    #[test]
    fn test_load_invalid_utf8_is_error() {
        let storage = MemoryStorage::new();
        storage.insert(
            Path::new("/project/Config/DefaultGame.ini"),
            [0x5b, 0xff, 0xfe],
        );
        let err = provider(storage)
            .load_or_create(&project_reference("Game"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding { .. }));
    }

    #[test]
    fn test_save_unchanged_performs_zero_writes() {
        let storage = MemoryStorage::new();
        let path = PathBuf::from("/project/Config/DefaultGame.ini");
        storage.insert(&path, "[A]\nK=1\n");
        let provider = provider(storage.clone());
        let (document, _) = provider.load_or_create(&project_reference("Game")).unwrap();
        let wrote = provider.save_if_changed(&document).unwrap();
        assert!(!wrote);
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_save_changed_performs_one_write() {
        let storage = MemoryStorage::new();
        let path = PathBuf::from("/project/Config/DefaultGame.ini");
        storage.insert(&path, "[A]\nK=1\n");
        let provider = provider(storage.clone());
        let (mut document, _) = provider.load_or_create(&project_reference("Game")).unwrap();
        document.section_mut(Some("A")).push_line(crate::text::RawLine::new(
            "K2=2",
            crate::text::LineEnding::Unix,
        ));
        let wrote = provider.save_if_changed(&document).unwrap();
        assert!(wrote);
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.contents(&path).unwrap(), b"[A]\nK=1\nK2=2\n");
    }

    #[test]
    fn test_save_new_nonblank_content_writes() {
        let storage = MemoryStorage::new();
        let provider = provider(storage.clone());
        let mut document = Document::parse("[A]\nK=1\n");
        document.reference = Some(project_reference("Game"));
        assert!(provider.save_if_changed(&document).unwrap());
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_save_new_blank_content_skips_write() {
        let storage = MemoryStorage::new();
        let provider = provider(storage.clone());
        let mut document = Document::new();
        document.reference = Some(project_reference("Game"));
        assert!(!provider.save_if_changed(&document).unwrap());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_save_without_reference_is_error() {
        let provider = provider(MemoryStorage::new());
        let document = Document::parse("[A]\nK=1\n");
        let err = provider.save_if_changed(&document).unwrap_err();
        assert!(matches!(err, Error::MissingReference));
    }

    #[test]
    fn test_other_read_errors_propagate() {
        struct FailingStorage;
        impl Storage for FailingStorage {
            fn read(&self, _: &Path) -> io::Result<Vec<u8>> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
            }
            fn write(&self, _: &Path, _: &[u8]) -> io::Result<()> {
                Ok(())
            }
            fn list_subdirectories(&self, _: &Path) -> io::Result<Vec<PathBuf>> {
                Ok(Vec::new())
            }
        }

        let provider = FileProvider::new(
            FailingStorage,
            PathLayout::new().with_project_root(Path::new("/project")),
        );
        let err = provider.load_or_create(&project_reference("Game")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
