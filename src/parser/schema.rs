//! Data model for parsed errors.
//!
//! These types are what the parser produces and what the policy pipeline
//! and the output tree consume. All of them serialize to JSON so the CLI
//! can dump them as-is.

use crate::utils::config::{CURRENT_PACKAGE, DEFAULT_KIND};
use serde::{Deserialize, Serialize};

/// One structured call-site entry extracted from a stack trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Verbatim source line, before any parsing
    pub original: String,

    /// Text preceding the address (function or call description), may be empty
    pub call_site_label: String,

    /// Normalized full address, e.g. `/app/x.js:3:7`
    pub address: String,

    /// Path part of the address with the position stripped
    pub module_path: String,

    /// Directory of `module_path` (empty when the path has none)
    pub dir: String,

    /// Basename of `module_path`
    pub file: String,

    /// 1-based source line, `None` when the address carries no position
    pub line: Option<u32>,

    /// 1-based source column
    pub col: Option<u32>,

    /// Line inside the compiled artifact, defaults to `line`
    pub compiled_line: Option<u32>,

    /// Column inside the compiled artifact, defaults to `col`
    pub compiled_col: Option<u32>,

    /// Nearest enclosing dependency, or `[current]`
    pub package_name: String,

    /// `module_path` with every dependency boundary collapsed to `[name]`
    pub shortened_path: String,

    /// `shortened_path` followed by the address suffix (`:line:col` etc.)
    pub shortened_address: String,

    /// Project holding the outermost dependency directory, shown as the
    /// first bracketed label of `shortened_path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Dependency names crossed by the path, outermost first
    pub packages: Vec<String>,

    /// Extra footer text, set by display filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl Frame {
    /// Create a frame that only knows its source line
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            call_site_label: String::new(),
            address: String::new(),
            module_path: String::new(),
            dir: String::new(),
            file: String::new(),
            line: None,
            col: None,
            compiled_line: None,
            compiled_col: None,
            package_name: CURRENT_PACKAGE.to_string(),
            shortened_path: String::new(),
            shortened_address: String::new(),
            project: None,
            packages: Vec::new(),
            extra: None,
        }
    }

    /// Whether the frame resolved to a file and line
    pub fn has_location(&self) -> bool {
        !self.file.is_empty() && self.line.is_some()
    }

    /// Whether the frame lives inside a dependency directory
    pub fn is_dependency(&self) -> bool {
        self.package_name != CURRENT_PACKAGE
    }
}

/// A single entry of a parsed trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEntry {
    /// A recognized call-site line
    Frame(Frame),

    /// Any other line (message continuation, notes), carried opaquely
    Text { text: String },
}

impl TraceEntry {
    /// Borrow the structured frame, if this entry is one
    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::Text { .. } => None,
        }
    }

    /// Mutably borrow the structured frame, if this entry is one
    pub fn as_frame_mut(&mut self) -> Option<&mut Frame> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::Text { .. } => None,
        }
    }

    /// Create a free-text entry
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Normalized representation of an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Concrete error classification, e.g. `TypeError`
    pub kind: String,

    /// Possibly multi-line message
    pub message: String,

    /// Label of the error that merely carries this one; empty means none
    pub wrapper_label: String,

    /// Trace entries in their original order, outermost call first
    pub frames: Vec<TraceEntry>,
}

impl ErrorDescriptor {
    /// Descriptor with no trace
    pub fn bare(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            wrapper_label: String::new(),
            frames: Vec::new(),
        }
    }

    /// Iterate over the structured frames only
    pub fn structured_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter_map(TraceEntry::as_frame)
    }
}

/// A raw error value as handed over by a caller
///
/// Every field is optional; missing pieces degrade to defaults
/// when the descriptor is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawError {
    /// Runtime type name of the error value (e.g. a constructor name)
    #[serde(default)]
    pub kind: Option<String>,

    /// Declared `name` of the error
    #[serde(default)]
    pub name: Option<String>,

    /// Declared message
    #[serde(default)]
    pub message: Option<String>,

    /// Multi-line stack text
    #[serde(default)]
    pub stack: Option<String>,

    /// Label of a wrapping error
    #[serde(default)]
    pub wrapper: Option<String>,
}

impl RawError {
    /// Create a raw error from a message and its stack text
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            stack: Some(stack.into()),
            ..Default::default()
        }
    }

    /// Set the wrapper label
    pub fn with_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    /// Set the runtime classification
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Runtime classification, falling back to the declared name
    pub fn declared_kind(&self) -> &str {
        self.kind
            .as_deref()
            .or(self.name.as_deref())
            .filter(|kind| !kind.is_empty())
            .unwrap_or(DEFAULT_KIND)
    }
}

/// What a caller can hand to the reporter
///
/// Checked once at the boundary; the rest of the pipeline only
/// ever sees an `ErrorDescriptor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorInput {
    /// An error-like value that still needs parsing
    Raw(RawError),

    /// A non-error value, carried as its string form
    Value(String),

    /// An already-normalized descriptor
    Parsed(ErrorDescriptor),
}

impl ErrorInput {
    /// Classify an arbitrary JSON value
    ///
    /// Objects become raw errors (unknown fields ignored, wrong field
    /// types dropped); every other value keeps its string form.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => {
                let field = |key: &str| -> Option<String> {
                    match map.get(key) {
                        Some(serde_json::Value::String(s)) => Some(s.clone()),
                        Some(serde_json::Value::Null) | None => None,
                        Some(serde_json::Value::Array(lines)) if key == "stack" => Some(
                            lines
                                .iter()
                                .map(|line| match line {
                                    serde_json::Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                })
                                .collect::<Vec<_>>()
                                .join("\n"),
                        ),
                        Some(other) => Some(other.to_string()),
                    }
                };
                Self::Raw(RawError {
                    kind: field("kind"),
                    name: field("name"),
                    message: field("message"),
                    stack: field("stack"),
                    wrapper: field("wrapper"),
                })
            }
            serde_json::Value::String(s) => Self::Value(s.clone()),
            other => Self::Value(other.to_string()),
        }
    }
}

impl From<RawError> for ErrorInput {
    fn from(raw: RawError) -> Self {
        Self::Raw(raw)
    }
}

impl From<ErrorDescriptor> for ErrorInput {
    fn from(descriptor: ErrorDescriptor) -> Self {
        Self::Parsed(descriptor)
    }
}

impl From<&str> for ErrorInput {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for ErrorInput {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}
