//! The top-level facade tying layout, cache, registry and evaluation
//! together.
//!
//! A [`ConfigTree`] answers "what is the value of this property for
//! this category and platform" by enumerating the branch, loading each
//! layer through the cache, and evaluating the matched instructions in
//! ascending priority order.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::branch::{config_branch, config_branch_in};
use crate::cache::{CacheEntry, VirtualConfigCache};
use crate::error::Result;
use crate::evaluate::{default_evaluator, Evaluator};
use crate::hierarchy::{Domain, FileReference, HierarchyLevelRange};
use crate::platform::{PlatformInfo, PlatformRegistry, PLATFORM_INFO_TYPE};
use crate::provider::{FileProvider, Storage};
use crate::text::Document;

/// A cached, evaluable view over one engine/project configuration
/// hierarchy.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use strata::provider::{FileProvider, MemoryStorage, PathLayout};
/// use strata::tree::ConfigTree;
///
/// let storage = MemoryStorage::new();
/// storage.insert(
///     Path::new("/engine/Config/BaseEngine.ini"),
///     "[Core]\n+Paths=Engine\n",
/// );
/// storage.insert(
///     Path::new("/project/Config/DefaultEngine.ini"),
///     "[Core]\n+Paths=Project\n",
/// );
///
/// let provider = FileProvider::new(
///     storage,
///     PathLayout::new()
///         .with_engine_root(Path::new("/engine"))
///         .with_project_root(Path::new("/project")),
/// );
/// let mut tree = ConfigTree::new(provider);
/// let values = tree.evaluate("Engine", None, Some("Core"), "Paths").unwrap();
/// assert_eq!(values, vec!["Engine".to_string(), "Project".to_string()]);
/// ```
#[derive(Debug)]
pub struct ConfigTree<S: Storage> {
    provider: FileProvider<S>,
    registry: PlatformRegistry,
    cache: VirtualConfigCache,
    evaluator: Arc<Evaluator>,
}

impl<S: Storage> ConfigTree<S> {
    /// Creates a tree over `provider` using the process-wide default
    /// evaluator.
    #[must_use]
    pub fn new(provider: FileProvider<S>) -> Self {
        Self {
            provider,
            registry: PlatformRegistry::new(),
            cache: VirtualConfigCache::new(),
            evaluator: default_evaluator(),
        }
    }

    /// Replaces the evaluator used by this tree.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Arc<Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &FileProvider<S> {
        &self.provider
    }

    /// The platform registry.
    #[must_use]
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Mutable access to the platform registry.
    pub fn registry_mut(&mut self) -> &mut PlatformRegistry {
        &mut self.registry
    }

    /// Enumerates the branch for `(type_name, platform)`, lowest
    /// priority first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for an illegal type name.
    pub fn branch(
        &mut self,
        type_name: &str,
        platform: Option<&str>,
    ) -> Result<Vec<FileReference>> {
        config_branch(&mut self.registry, type_name, platform)
    }

    /// Enumerates the branch, restricted to hierarchy levels inside
    /// `range`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for an illegal type name.
    pub fn branch_in(
        &mut self,
        type_name: &str,
        platform: Option<&str>,
        range: HierarchyLevelRange,
    ) -> Result<Vec<FileReference>> {
        config_branch_in(&mut self.registry, type_name, platform, range)
    }

    /// Returns the cached document for `reference`, loading it on
    /// first access.
    ///
    /// # Errors
    ///
    /// Propagates load failures from the provider.
    pub fn document(&mut self, reference: &FileReference) -> Result<&Document> {
        self.cache.get_or_load(reference, &self.provider)
    }

    /// Evaluates `key` in `section` across the whole branch for
    /// `(type_name, platform)`.
    ///
    /// Every layer is loaded through the cache first, then the matched
    /// instructions are evaluated as one ascending-priority sequence.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for an illegal type name,
    /// and propagates load and evaluation failures.
    pub fn evaluate(
        &mut self,
        type_name: &str,
        platform: Option<&str>,
        section: Option<&str>,
        key: &str,
    ) -> Result<Vec<String>> {
        let branch = config_branch(&mut self.registry, type_name, platform)?;
        for reference in &branch {
            self.cache.get_or_load(reference, &self.provider)?;
        }

        let mut documents: Vec<&Document> = Vec::with_capacity(branch.len());
        for reference in &branch {
            if let Some(document) = self.cache.entry(reference).and_then(CacheEntry::document) {
                documents.push(document);
            }
        }
        self.evaluator.evaluate_property(&documents, section, key)
    }

    /// Writes `document` through the provider and refreshes its cache
    /// entry. Returns true iff bytes were written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingReference`] for documents
    /// without a reference, and surfaces storage failures.
    pub fn publish(&mut self, document: Document) -> Result<bool> {
        self.cache.publish(&self.provider, document)
    }

    /// Drops all cached content; subsequent lookups reload from
    /// storage.
    pub fn invalidate(&mut self) {
        self.cache.invalidate_all();
    }

    /// Scans the engine `Platforms/` directory, reads each platform's
    /// metadata document, and registers the declared inheritance
    /// forest. Returns the discovered platform directory names.
    ///
    /// A missing `Platforms/` directory or unset engine root discovers
    /// nothing. Directories without a metadata file register as
    /// parentless platforms.
    ///
    /// # Errors
    ///
    /// Surfaces storage failures other than not-found.
    pub fn discover_platforms(&mut self) -> Result<Vec<String>> {
        let Some(engine_root) = self.provider.layout().engine_root() else {
            return Ok(Vec::new());
        };
        let platforms_dir = engine_root.join("Platforms");
        let directories = match self.provider.storage().list_subdirectories(&platforms_dir) {
            Ok(directories) => directories,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut infos: BTreeMap<String, PlatformInfo> = BTreeMap::new();
        let mut discovered = Vec::new();
        for directory in directories {
            let Some(name) = directory.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let reference = FileReference::new(
                Domain::Engine,
                Some(name.to_string()),
                Some(PLATFORM_INFO_TYPE.to_string()),
            )?;
            let (document, _) = self.provider.load_or_create(&reference)?;
            infos.insert(name.to_string(), PlatformInfo::from_document(&document));
            discovered.push(name.to_string());
        }

        log::info!("discovered {} platform(s)", discovered.len());
        self.registry.register_from_info(&infos);
        Ok(discovered)
    }
}
