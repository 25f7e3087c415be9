//! Mapping file references to storage paths.
//!
//! Layout convention: `<root>/Config/<Prefix><Type>.ini` for
//! platform-less files, and for platform files either the legacy
//! `<root>/Config/<Platform>/` or the modern
//! `<root>/Platforms/<Platform>/Config/` directory, with
//! `<Prefix><Platform><Type>.ini` filenames.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::hierarchy::{Domain, FileReference};
use crate::platform::PLATFORM_INFO_TYPE;

/// Which platform-config directory convention a platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryConvention {
    /// `<root>/Config/<Platform>/`
    Legacy,
    /// `<root>/Platforms/<Platform>/Config/`
    #[default]
    Modern,
}

/// Resolves references to paths under the engine and project roots.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use strata::hierarchy::{Domain, FileReference};
/// use strata::provider::PathLayout;
///
/// let layout = PathLayout::new()
///     .with_engine_root(Path::new("/engine"))
///     .with_project_root(Path::new("/project"));
///
/// let reference = FileReference::new(
///     Domain::Project, None, Some("Engine".to_string()),
/// ).unwrap();
/// assert_eq!(
///     layout.resolve(&reference),
///     Some(PathBuf::from("/project/Config/DefaultEngine.ini")),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathLayout {
    engine_root: Option<PathBuf>,
    project_root: Option<PathBuf>,
    conventions: BTreeMap<String, DirectoryConvention>,
}

impl PathLayout {
    /// Creates a layout with no roots set. Every resolution fails
    /// until the relevant root is provided.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine root directory.
    #[must_use]
    pub fn with_engine_root(mut self, root: &Path) -> Self {
        self.engine_root = Some(root.to_path_buf());
        self
    }

    /// Sets the project root directory.
    #[must_use]
    pub fn with_project_root(mut self, root: &Path) -> Self {
        self.project_root = Some(root.to_path_buf());
        self
    }

    /// Overrides the directory convention for one platform. Platforms
    /// without an override use [`DirectoryConvention::Modern`].
    #[must_use]
    pub fn with_platform_convention(
        mut self,
        platform: &str,
        convention: DirectoryConvention,
    ) -> Self {
        self.conventions.insert(platform.to_string(), convention);
        self
    }

    /// The engine root, if set.
    #[must_use]
    pub fn engine_root(&self) -> Option<&Path> {
        self.engine_root.as_deref()
    }

    /// The convention for `platform`.
    #[must_use]
    pub fn convention(&self, platform: &str) -> DirectoryConvention {
        self.conventions.get(platform).copied().unwrap_or_default()
    }

    /// Resolves `reference` to a storage path.
    ///
    /// Returns `None` for unsupported domains, when the required root
    /// is unset, or when a required type name is missing. Engine-base
    /// is the only domain that renders without a type (`Base.ini`).
    #[must_use]
    pub fn resolve(&self, reference: &FileReference) -> Option<PathBuf> {
        let root = match reference.domain {
            Domain::None | Domain::Custom => return None,
            Domain::EngineBase | Domain::Engine => self.engine_root.as_deref()?,
            Domain::Project | Domain::ProjectGenerated => self.project_root.as_deref()?,
        };

        let type_name = match &reference.type_name {
            Some(name) => name.as_str(),
            None if reference.domain == Domain::EngineBase => "",
            None => return None,
        };
        let prefix = reference.domain.filename_prefix();

        match &reference.platform {
            Some(platform) => {
                let directory = match self.convention(platform) {
                    DirectoryConvention::Legacy => root.join("Config").join(platform),
                    DirectoryConvention::Modern => {
                        root.join("Platforms").join(platform).join("Config")
                    }
                };
                // Platform-metadata files are named without the
                // platform token; the directory already carries it.
                let token = if type_name == PLATFORM_INFO_TYPE {
                    ""
                } else {
                    platform.as_str()
                };
                Some(directory.join(format!("{prefix}{token}{type_name}.ini")))
            }
            None => {
                let token = if reference.domain == Domain::Project {
                    "Default"
                } else {
                    ""
                };
                Some(root.join("Config").join(format!("{prefix}{token}{type_name}.ini")))
            }
        }
    }
}
