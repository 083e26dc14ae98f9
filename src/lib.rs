//! Pretty Trace
//!
//! Parses raw runtime errors and their stack text into structured,
//! queryable frames, and renders them as readable, filterable
//! diagnostics.
//!
//! This crate provides the core implementation for the
//! `pretty-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```ignore
//! use pretty_trace::{RawError, Reporter};
//!
//! let mut reporter = Reporter::new();
//! reporter.pipeline_mut().skip_packages(["mocha"]);
//! reporter.pipeline_mut().alias("/home/me/app", "~");
//!
//! let error = RawError::new("boom", stack_text);
//! eprintln!("{}", reporter.render(error));
//! ```

pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod policy;
pub mod reporter;
pub mod utils;

pub use parser::{ErrorDescriptor, ErrorInput, Frame, RawError, TraceEntry};
pub use policy::{ConfigOptions, Pipeline};
pub use reporter::Reporter;
