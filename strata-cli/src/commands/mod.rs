//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Evaluate a property across the hierarchy
//! - `branch`: List the layer files for a configuration category
//! - `render`: Print one layer file exactly as stored

pub mod branch;
pub mod get;
pub mod render;

pub use branch::BranchCommand;
pub use get::GetCommand;
pub use render::RenderCommand;
