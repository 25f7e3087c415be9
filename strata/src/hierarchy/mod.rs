//! Where a layer sits in the override hierarchy.
//!
//! - [`Domain`]: which root and naming convention a layer belongs to
//! - [`HierarchyLevel`] and [`HierarchyLevelRange`]: override priority
//!   and range queries over it
//! - [`FileReference`]: the validated identity of one layer

pub mod domain;
pub mod level;
pub mod reference;

pub use domain::Domain;
pub use level::{HierarchyLevel, HierarchyLevelRange};
pub use reference::FileReference;
