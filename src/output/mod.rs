//! Output for parsed errors.
//!
//! This module handles:
//! - Building the render tree handed to the styling layer
//! - Rendering that tree as terminal text
//! - Writing descriptors and trees as JSON

pub mod json;
pub mod terminal;
pub mod tree;

// Re-export main functions
pub use json::{to_json_string, write_json};
pub use terminal::render;
pub use tree::RenderTree;
