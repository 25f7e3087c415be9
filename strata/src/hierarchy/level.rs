//! Override-priority levels and range queries over them.

use serde::Serialize;

/// A layer's rank in override priority, independent of domain.
///
/// Levels are totally ordered ascending in priority; `Base` is the
/// lowest and is applied first.
///
/// # Examples
///
/// ```
/// use strata::hierarchy::HierarchyLevel;
///
/// assert!(HierarchyLevel::Base < HierarchyLevel::ProjectCategory);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HierarchyLevel {
    /// The untyped engine base file.
    Base,
    /// The typed engine base file.
    BaseCategory,
    /// Engine-side platform files.
    BasePlatformCategory,
    /// Project files with no platform scope.
    ProjectCategory,
    /// Platform-scoped project files.
    ProjectPlatformCategory,
}

/// An inclusive range of hierarchy levels with independently optional
/// bounds.
///
/// The three flags allow an empty range (includes nothing), an
/// unbounded range, half-open ranges on either side, a single exact
/// level, and explicit bounds.
///
/// # Examples
///
/// ```
/// use strata::hierarchy::{HierarchyLevel, HierarchyLevelRange};
///
/// let range = HierarchyLevelRange::any_from(HierarchyLevel::ProjectCategory);
/// assert!(!range.includes(HierarchyLevel::Base));
/// assert!(range.includes(HierarchyLevel::ProjectPlatformCategory));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyLevelRange {
    has_from: bool,
    from: HierarchyLevel,
    has_to: bool,
    to: HierarchyLevel,
    includes_anything: bool,
}

impl HierarchyLevelRange {
    /// A range including every level.
    #[must_use]
    pub fn all() -> Self {
        Self {
            has_from: false,
            from: HierarchyLevel::Base,
            has_to: false,
            to: HierarchyLevel::ProjectPlatformCategory,
            includes_anything: true,
        }
    }

    /// A range including no level.
    #[must_use]
    pub fn none() -> Self {
        Self {
            includes_anything: false,
            ..Self::all()
        }
    }

    /// Every level at or above `from`.
    #[must_use]
    pub fn any_from(from: HierarchyLevel) -> Self {
        Self {
            has_from: true,
            from,
            ..Self::all()
        }
    }

    /// Every level at or below `to`.
    #[must_use]
    pub fn any_to(to: HierarchyLevel) -> Self {
        Self {
            has_to: true,
            to,
            ..Self::all()
        }
    }

    /// Exactly one level.
    #[must_use]
    pub fn exact(level: HierarchyLevel) -> Self {
        Self::from_to(level, level)
    }

    /// Every level between `from` and `to` inclusive. Bounds given in
    /// reverse order are swapped so `from <= to` always holds.
    #[must_use]
    pub fn from_to(from: HierarchyLevel, to: HierarchyLevel) -> Self {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        Self {
            has_from: true,
            from,
            has_to: true,
            to,
            includes_anything: true,
        }
    }

    /// Whether `level` falls inside this range.
    #[must_use]
    pub fn includes(&self, level: HierarchyLevel) -> bool {
        if !self.includes_anything {
            return false;
        }
        if self.has_from && level < self.from {
            return false;
        }
        if self.has_to && level > self.to {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HierarchyLevel::{
        Base, BaseCategory, BasePlatformCategory, ProjectCategory, ProjectPlatformCategory,
    };

    const ALL_LEVELS: [HierarchyLevel; 5] = [
        Base,
        BaseCategory,
        BasePlatformCategory,
        ProjectCategory,
        ProjectPlatformCategory,
    ];

    #[test]
    fn test_level_ordering() {
        assert!(Base < BaseCategory);
        assert!(BaseCategory < BasePlatformCategory);
        assert!(BasePlatformCategory < ProjectCategory);
        assert!(ProjectCategory < ProjectPlatformCategory);
    }

    #[test]
    fn test_all_includes_everything() {
        let range = HierarchyLevelRange::all();
        for level in ALL_LEVELS {
            assert!(range.includes(level));
        }
    }

    #[test]
    fn test_none_includes_nothing() {
        let range = HierarchyLevelRange::none();
        for level in ALL_LEVELS {
            assert!(!range.includes(level));
        }
    }

    #[test]
    fn test_any_from_matches_at_or_above() {
        let range = HierarchyLevelRange::any_from(BasePlatformCategory);
        for level in ALL_LEVELS {
            assert_eq!(range.includes(level), level >= BasePlatformCategory);
        }
    }

    #[test]
    fn test_any_to_matches_at_or_below() {
        let range = HierarchyLevelRange::any_to(BaseCategory);
        for level in ALL_LEVELS {
            assert_eq!(range.includes(level), level <= BaseCategory);
        }
    }

    #[test]
    fn test_exact_matches_single_level() {
        let range = HierarchyLevelRange::exact(ProjectCategory);
        for level in ALL_LEVELS {
            assert_eq!(range.includes(level), level == ProjectCategory);
        }
    }

    #[test]
    fn test_from_to_auto_swaps_reversed_bounds() {
        let range = HierarchyLevelRange::from_to(ProjectCategory, BaseCategory);
        assert_eq!(range, HierarchyLevelRange::from_to(BaseCategory, ProjectCategory));
        assert!(!range.includes(Base));
        assert!(range.includes(BasePlatformCategory));
        assert!(!range.includes(ProjectPlatformCategory));
    }
}
