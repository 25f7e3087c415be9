//! Platform inheritance: a forest of named platforms with
//! single-parent links.
//!
//! Platforms are owned by a [`PlatformRegistry`] arena and referenced
//! by identifier, so parent links never form ownership cycles. The
//! registry tolerates declarative input with unresolved or cyclic
//! parents; see [`PlatformRegistry::register_from_info`].

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::text::Document;

/// The section and fixed type name of platform-metadata documents.
pub const PLATFORM_INFO_TYPE: &str = "DataDrivenPlatformInfo";

/// One platform node. Owned by the registry; `parent` is an arena
/// index into the same registry.
#[derive(Debug, Clone)]
pub struct Platform {
    identifier: String,
    parent: Option<usize>,
}

impl Platform {
    /// The platform's identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Attributes extracted from one platform-info document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Replacement identifier (`TargetPlatformName`), if declared.
    pub rename: Option<String>,
    /// Declared parent identifier (`IniPlatformName`), if declared.
    pub parent: Option<String>,
}

impl PlatformInfo {
    /// Extracts platform attributes from a platform-info document.
    ///
    /// The last `Set` wins for each key, matching ordinary property
    /// evaluation; a key that evaluates to nothing is absent.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        let evaluator = crate::evaluate::Evaluator::new();
        let last_value = |key: &str| {
            evaluator
                .evaluate_property(&[document], Some(PLATFORM_INFO_TYPE), key)
                .ok()
                .and_then(|values| values.last().cloned())
        };
        Self {
            rename: last_value("TargetPlatformName"),
            parent: last_value("IniPlatformName"),
        }
    }
}

/// Owns the platform forest and resolves inheritance chains.
///
/// # Examples
///
/// ```
/// use strata::platform::PlatformRegistry;
///
/// let mut registry = PlatformRegistry::new();
/// registry.register("Grandparent", None);
/// registry.register("Parent", Some("Grandparent"));
/// registry.register("Child", Some("Parent"));
///
/// assert_eq!(
///     registry.resolve_inheritance("Child"),
///     vec!["Grandparent".to_string(), "Parent".to_string(), "Child".to_string()],
/// );
/// ```
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    arena: Vec<Platform>,
    index: HashMap<String, usize>,
}

impl PlatformRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `identifier` is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    /// Looks up a platform by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Platform> {
        self.index.get(identifier).map(|&i| &self.arena[i])
    }

    /// The registered identifiers, in registration order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        self.arena.iter().map(|p| p.identifier.as_str()).collect()
    }

    /// Registers a platform, creating a parent-only placeholder for an
    /// unknown parent. A platform naming itself as parent registers
    /// with no parent.
    ///
    /// Re-registering an existing identifier updates its parent link
    /// (last write wins).
    pub fn register(&mut self, identifier: &str, parent: Option<&str>) {
        let parent_index = match parent {
            Some(p) if p != identifier => Some(self.ensure(p)),
            _ => None,
        };
        let index = self.ensure(identifier);
        self.arena[index].parent = parent_index;
    }

    /// Registers `identifier` with no parent if absent; returns its
    /// arena index either way.
    pub fn ensure(&mut self, identifier: &str) -> usize {
        if let Some(&index) = self.index.get(identifier) {
            return index;
        }
        let index = self.arena.len();
        self.arena.push(Platform {
            identifier: identifier.to_string(),
            parent: None,
        });
        self.index.insert(identifier.to_string(), index);
        index
    }

    /// Walks parent links upward from `platform` and returns the chain
    /// root-most ancestor first, the queried platform last.
    ///
    /// An unregistered identifier resolves to itself alone. The walk
    /// stops if a node repeats, which only happens on forests
    /// corrupted through direct re-registration; input built by
    /// [`PlatformRegistry::register_from_info`] is always acyclic.
    #[must_use]
    pub fn resolve_inheritance(&self, platform: &str) -> Vec<String> {
        let Some(&start) = self.index.get(platform) else {
            return vec![platform.to_string()];
        };
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(index) = current {
            if !seen.insert(index) {
                break;
            }
            chain.push(self.arena[index].identifier.clone());
            current = self.arena[index].parent;
        }
        chain.reverse();
        chain
    }

    /// Registers a whole forest from declarative per-platform info.
    ///
    /// For each not-yet-registered platform, the declared-parent chain
    /// is walked into a temporary list, stopping at the first node
    /// already in the current chain (cycle short-circuit: the repeated
    /// node and anything beyond it is dropped from this chain). The
    /// chain is then registered root-first, so every parent is
    /// registered before its children. Identifiers that are already
    /// registered are never touched again, which keeps the resulting
    /// forest acyclic even for cyclic declarations.
    ///
    /// Declared parents that name unknown platforms become parent-only
    /// placeholders. A rename (`TargetPlatformName`) replaces the
    /// platform's identifier throughout.
    pub fn register_from_info(&mut self, infos: &BTreeMap<String, PlatformInfo>) {
        // Renames applied up front so chains walk effective identifiers.
        let mut parents: BTreeMap<String, Option<String>> = BTreeMap::new();
        let mut renamed: HashMap<&str, &str> = HashMap::new();
        for (key, info) in infos {
            if let Some(rename) = &info.rename {
                renamed.insert(key.as_str(), rename.as_str());
            }
        }
        let effective = |id: &str| renamed.get(id).copied().unwrap_or(id).to_string();
        for (key, info) in infos {
            parents.insert(
                effective(key),
                info.parent.as_deref().map(&effective),
            );
        }

        for id in parents.keys() {
            if self.contains(id) {
                continue;
            }
            let mut chain: Vec<String> = Vec::new();
            let mut in_chain: HashSet<String> = HashSet::new();
            let mut current = Some(id.clone());
            while let Some(node) = current {
                if !in_chain.insert(node.clone()) {
                    break;
                }
                current = parents.get(&node).cloned().flatten();
                chain.push(node);
            }
            for node in chain.iter().rev() {
                if self.contains(node) {
                    continue;
                }
                let parent = parents.get(node).cloned().flatten();
                self.register(node, parent.as_deref());
            }
        }
    }
}
