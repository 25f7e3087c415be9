//! Validated identity of one configuration layer.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::hierarchy::{Domain, HierarchyLevel};

/// Identifies "which file, for which platform, of which type".
///
/// References are small comparable values and serve as cache keys.
/// Construction validates the type name: it must be non-blank and,
/// case-insensitively, not one of the filename-prefix keywords `base`
/// or `default`, which are not legal type identifiers.
///
/// # Examples
///
/// ```
/// use strata::hierarchy::{Domain, FileReference};
///
/// let reference = FileReference::new(
///     Domain::Project,
///     Some("Win64".to_string()),
///     Some("Engine".to_string()),
/// ).unwrap();
/// assert!(reference.is_platform_config());
///
/// assert!(FileReference::new(Domain::Project, None, Some("Base".to_string())).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileReference {
    /// The root and naming convention of this layer.
    pub domain: Domain,
    /// The platform identifier, if platform-scoped.
    pub platform: Option<String>,
    /// The configuration type (for example `Engine`, `Game`).
    pub type_name: Option<String>,
}

impl FileReference {
    /// Creates a validated reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `type_name` is present and
    /// blank, or equals `base`/`default` ignoring case.
    pub fn new(
        domain: Domain,
        platform: Option<String>,
        type_name: Option<String>,
    ) -> Result<Self> {
        if let Some(name) = &type_name {
            if name.trim().is_empty() {
                return Err(Error::Validation {
                    field: "type_name".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
            if name.eq_ignore_ascii_case("base") || name.eq_ignore_ascii_case("default") {
                return Err(Error::Validation {
                    field: "type_name".to_string(),
                    message: format!("'{name}' is a filename-prefix keyword, not a type"),
                });
            }
        }
        Ok(Self {
            domain,
            platform,
            type_name,
        })
    }

    /// Whether this reference is platform-scoped.
    #[must_use]
    pub fn is_platform_config(&self) -> bool {
        self.platform.is_some()
    }

    /// The override-priority level of this reference.
    #[must_use]
    pub fn hierarchy_level(&self) -> HierarchyLevel {
        match (self.domain, self.platform.is_some(), self.type_name.is_some()) {
            (Domain::EngineBase, false, false) => HierarchyLevel::Base,
            (Domain::EngineBase, false, true) => HierarchyLevel::BaseCategory,
            (Domain::EngineBase | Domain::Engine, true, _) => HierarchyLevel::BasePlatformCategory,
            (_, true, _) => HierarchyLevel::ProjectPlatformCategory,
            _ => HierarchyLevel::ProjectCategory,
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domain)?;
        if let Some(platform) = &self.platform {
            write!(f, "/{platform}")?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, ":{type_name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(
        domain: Domain,
        platform: Option<&str>,
        type_name: Option<&str>,
    ) -> Result<FileReference> {
        FileReference::new(
            domain,
            platform.map(String::from),
            type_name.map(String::from),
        )
    }

    #[test]
    fn test_valid_construction() {
        let r = reference(Domain::Project, Some("Win64"), Some("Engine")).unwrap();
        assert!(r.is_platform_config());
        let r = reference(Domain::EngineBase, None, None).unwrap();
        assert!(!r.is_platform_config());
    }

    #[test]
    fn test_blank_type_name_rejected() {
        assert!(reference(Domain::Project, None, Some("")).is_err());
        assert!(reference(Domain::Project, None, Some("   ")).is_err());
    }

    #[test]
    fn test_prefix_keywords_rejected_case_insensitively() {
        for name in ["base", "Base", "BASE", "default", "Default", "DEFAULT"] {
            let err = reference(Domain::Project, None, Some(name)).unwrap_err();
            assert!(err.is_validation(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_equality_and_hash_identity() {
        use std::collections::HashSet;
        let a = reference(Domain::Project, Some("Win64"), Some("Engine")).unwrap();
        let b = reference(Domain::Project, Some("Win64"), Some("Engine")).unwrap();
        let c = reference(Domain::Project, Some("Linux"), Some("Engine")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_hierarchy_level_mapping() {
        assert_eq!(
            reference(Domain::EngineBase, None, None).unwrap().hierarchy_level(),
            HierarchyLevel::Base
        );
        assert_eq!(
            reference(Domain::EngineBase, None, Some("Engine"))
                .unwrap()
                .hierarchy_level(),
            HierarchyLevel::BaseCategory
        );
        assert_eq!(
            reference(Domain::EngineBase, Some("Win64"), Some("Engine"))
                .unwrap()
                .hierarchy_level(),
            HierarchyLevel::BasePlatformCategory
        );
        assert_eq!(
            reference(Domain::Engine, Some("Win64"), Some("Engine"))
                .unwrap()
                .hierarchy_level(),
            HierarchyLevel::BasePlatformCategory
        );
        assert_eq!(
            reference(Domain::Project, None, Some("Engine"))
                .unwrap()
                .hierarchy_level(),
            HierarchyLevel::ProjectCategory
        );
        assert_eq!(
            reference(Domain::ProjectGenerated, Some("Win64"), Some("Engine"))
                .unwrap()
                .hierarchy_level(),
            HierarchyLevel::ProjectPlatformCategory
        );
    }

    #[test]
    fn test_display() {
        let r = reference(Domain::Engine, Some("Win64"), Some("Engine")).unwrap();
        assert_eq!(format!("{r}"), "engine/Win64:Engine");
    }
}
