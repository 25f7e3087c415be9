//! Which root and naming convention a configuration layer belongs to.

use std::fmt;

use serde::Serialize;

/// The root/naming convention of a layer.
///
/// A domain identifies where a file lives and how it is named, not its
/// override priority (that is [`crate::hierarchy::HierarchyLevel`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Domain {
    /// No domain; never resolves to a path.
    None,
    /// A caller-managed location outside the standard layout.
    Custom,
    /// Engine-shipped base defaults (`Base*.ini`).
    EngineBase,
    /// Engine platform overrides.
    Engine,
    /// Project defaults and overrides.
    Project,
    /// Project-generated / build-machine outputs (`Generated*.ini`).
    ProjectGenerated,
}

impl Domain {
    /// The filename prefix this domain contributes.
    #[must_use]
    pub fn filename_prefix(self) -> &'static str {
        match self {
            Self::EngineBase => "Base",
            Self::ProjectGenerated => "Generated",
            _ => "",
        }
    }

    /// Whether files of this domain live under the engine root.
    #[must_use]
    pub fn is_engine(self) -> bool {
        matches!(self, Self::EngineBase | Self::Engine)
    }

    /// Whether files of this domain live under the project root.
    #[must_use]
    pub fn is_project(self) -> bool {
        matches!(self, Self::Project | Self::ProjectGenerated)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Custom => "custom",
            Self::EngineBase => "engine-base",
            Self::Engine => "engine",
            Self::Project => "project",
            Self::ProjectGenerated => "project-generated",
        };
        write!(f, "{name}")
    }
}
