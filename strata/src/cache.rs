//! The in-memory mirror of on-disk documents, keyed by reference.
//!
//! Entries are created lazily and never removed; invalidation resets
//! them to the unknown state so a later lookup reloads from storage.
//! The cache is not internally locked — embedding hosts serialize
//! access (see the crate-level concurrency notes).

use std::collections::HashMap;

use crate::error::Result;
use crate::hierarchy::FileReference;
use crate::provider::{FileProvider, Storage};
use crate::text::Document;

/// How a cache entry was populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    /// Never queried against storage.
    #[default]
    Unknown,
    /// A file existed and was parsed.
    Loaded,
    /// Queried, no file existed; an empty document was synthesized.
    Created,
}

/// One cached document slot.
#[derive(Debug, Default)]
pub struct CacheEntry {
    state: CacheState,
    document: Option<Document>,
}

impl CacheEntry {
    /// The entry's population state.
    #[must_use]
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// The cached document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Mutable access to the cached document, if any.
    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }
}

/// Lazily loads, caches, invalidates and publishes documents per
/// reference.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use strata::cache::{CacheState, VirtualConfigCache};
/// use strata::hierarchy::{Domain, FileReference};
/// use strata::provider::{FileProvider, MemoryStorage, PathLayout};
///
/// let provider = FileProvider::new(
///     MemoryStorage::new(),
///     PathLayout::new().with_project_root(Path::new("/project")),
/// );
/// let reference = FileReference::new(
///     Domain::Project, None, Some("Game".to_string()),
/// ).unwrap();
///
/// let mut cache = VirtualConfigCache::new();
/// assert_eq!(cache.peek(&reference).state(), CacheState::Unknown);
/// cache.get_or_load(&reference, &provider).unwrap();
/// assert_eq!(cache.peek(&reference).state(), CacheState::Created);
/// ```
#[derive(Debug, Default)]
pub struct VirtualConfigCache {
    entries: HashMap<FileReference, CacheEntry>,
}

impl VirtualConfigCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `reference`, creating an unknown entry if
    /// absent. Never touches storage.
    pub fn peek(&mut self, reference: &FileReference) -> &mut CacheEntry {
        self.entries.entry(reference.clone()).or_default()
    }

    /// Returns the entry for `reference` without creating one.
    #[must_use]
    pub fn entry(&self, reference: &FileReference) -> Option<&CacheEntry> {
        self.entries.get(reference)
    }

    /// Returns the cached document for `reference`, loading it through
    /// `provider` exactly once if the entry holds none.
    ///
    /// # Errors
    ///
    /// Propagates load failures from the provider.
    pub fn get_or_load<S: Storage>(
        &mut self,
        reference: &FileReference,
        provider: &FileProvider<S>,
    ) -> Result<&Document> {
        let entry = self.entries.entry(reference.clone()).or_default();
        if entry.document.is_none() {
            let (document, loaded) = provider.load_or_create(reference)?;
            entry.state = if loaded {
                CacheState::Loaded
            } else {
                CacheState::Created
            };
            entry.document = Some(document);
        }
        // Populated above; the closure never runs.
        Ok(entry.document.get_or_insert_with(Document::new))
    }

    /// Resets every entry to unknown with no document, without
    /// removing the entries.
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.state = CacheState::Unknown;
            entry.document = None;
        }
    }

    /// Writes `document` through the provider and caches it as loaded.
    ///
    /// The provider's save performs the change detection; the cache
    /// entry is marked [`CacheState::Loaded`] whether or not bytes hit
    /// storage. Returns true iff a write was performed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingReference`] for documents
    /// without a reference, and surfaces storage failures.
    pub fn publish<S: Storage>(
        &mut self,
        provider: &FileProvider<S>,
        document: Document,
    ) -> Result<bool> {
        let reference = document
            .reference
            .clone()
            .ok_or(crate::error::Error::MissingReference)?;
        let wrote = provider.save_if_changed(&document)?;
        let entry = self.entries.entry(reference).or_default();
        entry.state = CacheState::Loaded;
        entry.document = Some(document);
        Ok(wrote)
    }
}
