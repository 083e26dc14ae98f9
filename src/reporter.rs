//! Reporting session.
//!
//! A `Reporter` owns one policy pipeline and turns any accepted input
//! into a render tree or rendered text. Nothing here is global: callers
//! that want every error in their program reported install
//! [`Reporter::handler`] into whatever top-level handler they control.

use crate::output::{render, RenderTree};
use crate::parser::{build, ErrorDescriptor, ErrorInput};
use crate::policy::{ConfigOptions, Pipeline};
use log::debug;

/// Error reporting session
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    pipeline: Pipeline,
}

impl Reporter {
    /// Create a reporter with default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reporter around an existing pipeline
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Policy used by this reporter
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable policy, for configuration operations
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// Apply configuration options to the pipeline
    pub fn config(&mut self, options: ConfigOptions) {
        self.pipeline.config(options);
    }

    /// Parse and filter an input
    pub fn descriptor(&self, input: impl Into<ErrorInput>) -> ErrorDescriptor {
        self.pipeline.select(build(input))
    }

    /// Build the render tree for an input
    pub fn get_object(&self, input: impl Into<ErrorInput>) -> RenderTree {
        let descriptor = self.descriptor(input);
        debug!(
            "Rendering {} with {} trace entries",
            descriptor.kind,
            descriptor.frames.len()
        );
        RenderTree::from_descriptor(&descriptor)
    }

    /// Render an input with the pipeline's color setting
    pub fn render(&self, input: impl Into<ErrorInput>) -> String {
        self.render_with_colors(input, self.pipeline.colors_enabled())
    }

    /// Render an input, overriding the color setting for this call
    pub fn render_with_colors(&self, input: impl Into<ErrorInput>, use_colors: bool) -> String {
        render(&self.get_object(input), use_colors)
    }

    /// Closure producing rendered text, for installation into an error handler
    ///
    /// The closure owns a snapshot of this reporter's policy.
    pub fn handler(&self) -> impl Fn(ErrorInput) -> String + Send + Sync + 'static {
        let reporter = self.clone();
        move |input| reporter.render(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RawError;

    #[test]
    fn test_get_object_for_plain_value() {
        let tree = Reporter::new().get_object("hello");
        assert_eq!(tree.report.header.message, "hello");
        assert!(tree.report.trace.is_none());
    }

    #[test]
    fn test_handler_uses_snapshot() {
        let mut reporter = Reporter::new();
        reporter.pipeline_mut().without_colors();
        let handler = reporter.handler();

        reporter.pipeline_mut().with_colors();

        let output = handler(RawError::new("boom", "Error: boom").into());
        assert_eq!(output, "  Error: boom\n\n");
    }
}
