//! Stack trace parsing and schema definitions.
//!
//! This module handles:
//! - Normalizing path separators
//! - Parsing individual stack lines into frames
//! - Attributing frames to nested dependencies
//! - Building a normalized descriptor from a raw error

pub mod descriptor;
pub mod frame;
pub mod lexer;
pub mod package;
pub mod path;
pub mod schema;

// Re-export main types
pub use descriptor::{build, build_from_raw};
pub use frame::parse_line;
pub use package::{shorten_path, ShortenedPath};
pub use path::normalize;
pub use schema::{ErrorDescriptor, ErrorInput, Frame, RawError, TraceEntry};
