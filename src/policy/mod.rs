//! Frame admission policy.
//!
//! This module handles:
//! - Holding skip, alias and filter rules
//! - Evaluating each trace entry against them, in a fixed stage order
//! - Capping the number of entries handed to the renderer
//! - Loading rules from configuration documents

pub mod filters;
pub mod options;
pub mod pipeline;
pub mod stage;

// Re-export main types
pub use options::{ConfigOptions, Setting};
pub use pipeline::{Pipeline, PolicyState};
pub use stage::{
    AliasPattern, AliasRule, CallbackId, DescriptorFilter, DisplayFilter, SkipPredicate, Stage,
    Verdict,
};
