//! Enumerating the ordered chain of layers for one (type, platform).
//!
//! The chain runs in ascending priority: engine defaults first,
//! project-generated platform overrides last. Platform-scoped entries
//! follow the platform's inheritance chain, root-most ancestor before
//! descendants.

use crate::error::Result;
use crate::hierarchy::{Domain, FileReference, HierarchyLevelRange};
use crate::platform::PlatformRegistry;

/// Emits every layer reference for `(type_name, platform)`, lowest
/// priority first, into `visit`.
///
/// Order: the engine base file (untyped), the typed engine base file,
/// the typed engine base file for each platform in the inheritance
/// chain, the project default file, the project generated file, then
/// for each platform in the chain the engine, project and
/// project-generated platform files for that platform.
///
/// A platform unseen by `registry` is registered on first mention. An
/// absent platform skips all platform-scoped emissions.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] if `type_name` is not a legal
/// type identifier.
pub fn visit_config_branch<F>(
    registry: &mut PlatformRegistry,
    type_name: &str,
    platform: Option<&str>,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(FileReference),
{
    let typed = Some(type_name.to_string());
    let chain = match platform {
        Some(identifier) => {
            registry.ensure(identifier);
            registry.resolve_inheritance(identifier)
        }
        None => Vec::new(),
    };

    visit(FileReference::new(Domain::EngineBase, None, None)?);
    visit(FileReference::new(Domain::EngineBase, None, typed.clone())?);
    for ancestor in &chain {
        visit(FileReference::new(
            Domain::EngineBase,
            Some(ancestor.clone()),
            typed.clone(),
        )?);
    }

    visit(FileReference::new(Domain::Project, None, typed.clone())?);
    visit(FileReference::new(
        Domain::ProjectGenerated,
        None,
        typed.clone(),
    )?);

    for ancestor in &chain {
        visit(FileReference::new(
            Domain::Engine,
            Some(ancestor.clone()),
            typed.clone(),
        )?);
        visit(FileReference::new(
            Domain::Project,
            Some(ancestor.clone()),
            typed.clone(),
        )?);
        visit(FileReference::new(
            Domain::ProjectGenerated,
            Some(ancestor.clone()),
            typed.clone(),
        )?);
    }

    Ok(())
}

/// Collects the branch for `(type_name, platform)` into a vector.
///
/// # Errors
///
/// Propagates errors from [`visit_config_branch`].
pub fn config_branch(
    registry: &mut PlatformRegistry,
    type_name: &str,
    platform: Option<&str>,
) -> Result<Vec<FileReference>> {
    let mut references = Vec::new();
    visit_config_branch(registry, type_name, platform, |reference| {
        references.push(reference);
    })?;
    Ok(references)
}

/// Collects the branch, keeping only references whose hierarchy level
/// falls inside `range`.
///
/// # Errors
///
/// Propagates errors from [`visit_config_branch`].
pub fn config_branch_in(
    registry: &mut PlatformRegistry,
    type_name: &str,
    platform: Option<&str>,
    range: HierarchyLevelRange,
) -> Result<Vec<FileReference>> {
    let mut references = Vec::new();
    visit_config_branch(registry, type_name, platform, |reference| {
        if range.includes(reference.hierarchy_level()) {
            references.push(reference);
        }
    })?;
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyLevel;
    use std::collections::HashSet;

    fn describe(reference: &FileReference) -> String {
        format!("{reference}")
    }

    #[test]
    fn test_branch_without_platform() {
        let mut registry = PlatformRegistry::new();
        let branch = config_branch(&mut registry, "Engine", None).unwrap();
        let described: HashSet<String> = branch.iter().map(describe).collect();
        let expected: HashSet<String> = [
            "engine-base",
            "engine-base:Engine",
            "project:Engine",
            "project-generated:Engine",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(described, expected);
        assert_eq!(branch.len(), 4);
    }

    #[test]
    fn test_branch_with_platform_chain_order() {
        let mut registry = PlatformRegistry::new();
        registry.register("Grandparent", None);
        registry.register("Parent", Some("Grandparent"));
        registry.register("Child", Some("Parent"));

        let branch = config_branch(&mut registry, "Engine", Some("Child")).unwrap();
        let described: Vec<String> = branch.iter().map(describe).collect();
        assert_eq!(
            described,
            vec![
                "engine-base",
                "engine-base:Engine",
                "engine-base/Grandparent:Engine",
                "engine-base/Parent:Engine",
                "engine-base/Child:Engine",
                "project:Engine",
                "project-generated:Engine",
                "engine/Grandparent:Engine",
                "project/Grandparent:Engine",
                "project-generated/Grandparent:Engine",
                "engine/Parent:Engine",
                "project/Parent:Engine",
                "project-generated/Parent:Engine",
                "engine/Child:Engine",
                "project/Child:Engine",
                "project-generated/Child:Engine",
            ]
        );
    }

    #[test]
    fn test_branch_registers_unseen_platform() {
        let mut registry = PlatformRegistry::new();
        let branch = config_branch(&mut registry, "Game", Some("Fresh")).unwrap();
        assert!(registry.contains("Fresh"));
        // One platform in the chain: 2 base + 1 base-platform + 2
        // project + 3 platform files.
        assert_eq!(branch.len(), 8);
    }

    #[test]
    fn test_branch_rejects_keyword_type() {
        let mut registry = PlatformRegistry::new();
        assert!(config_branch(&mut registry, "Default", None).is_err());
    }

    #[test]
    fn test_branch_filtered_by_range() {
        let mut registry = PlatformRegistry::new();
        registry.register("Win64", None);
        let range = HierarchyLevelRange::any_from(HierarchyLevel::ProjectCategory);
        let branch = config_branch_in(&mut registry, "Engine", Some("Win64"), range).unwrap();
        let described: Vec<String> = branch.iter().map(describe).collect();
        assert_eq!(
            described,
            vec![
                "project:Engine",
                "project-generated:Engine",
                "project/Win64:Engine",
                "project-generated/Win64:Engine",
            ]
        );
    }

    #[test]
    fn test_branch_filtered_by_none_is_empty() {
        let mut registry = PlatformRegistry::new();
        let branch =
            config_branch_in(&mut registry, "Engine", Some("Win64"), HierarchyLevelRange::none())
                .unwrap();
        assert!(branch.is_empty());
    }
}
