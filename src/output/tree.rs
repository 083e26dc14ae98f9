//! Render tree handed to the styling layer.
//!
//! The tree mirrors the markup a renderer styles:
//!
//! ```text
//! { "pretty-error": { header: { title: { wrapper?, kind }, colon, message },
//!                     trace?: [ { item: { custom } } |
//!                               { item: { header: { pointer?, what? },
//!                                         footer: { addr, extra? } } } ] } }
//! ```

use crate::parser::schema::{ErrorDescriptor, Frame, TraceEntry};
use serde::Serialize;

/// Root of the render tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTree {
    #[serde(rename = "pretty-error")]
    pub report: Report,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub header: Header,

    /// Present only when at least one entry survived filtering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: Title,
    pub colon: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceItem {
    pub item: Item,
}

/// One rendered trace entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Item {
    /// Free text
    Custom { custom: String },

    /// Structured frame
    Frame { header: ItemHeader, footer: Footer },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<Pointer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub what: Option<String>,
}

/// `file:line` pointer of a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pointer {
    pub file: String,
    pub colon: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub addr: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl RenderTree {
    /// Build the tree for an already-filtered descriptor
    pub fn from_descriptor(descriptor: &ErrorDescriptor) -> Self {
        let title = Title {
            wrapper: Some(descriptor.wrapper_label.clone()).filter(|w| !w.is_empty()),
            kind: descriptor.kind.clone(),
        };

        let header = Header {
            title,
            colon: ":".to_string(),
            message: descriptor.message.trim().to_string(),
        };

        let items: Vec<TraceItem> = descriptor
            .frames
            .iter()
            .map(|entry| TraceItem {
                item: Item::from_entry(entry),
            })
            .collect();

        Self {
            report: Report {
                header,
                trace: Some(items).filter(|items| !items.is_empty()),
            },
        }
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Item {
    fn from_entry(entry: &TraceEntry) -> Self {
        match entry {
            TraceEntry::Text { text } => Self::Custom {
                custom: text.clone(),
            },
            TraceEntry::Frame(frame) => Self::from_frame(frame),
        }
    }

    fn from_frame(frame: &Frame) -> Self {
        let pointer = match frame.line {
            Some(line) if !frame.file.is_empty() => Some(Pointer {
                file: frame.file.clone(),
                colon: ":".to_string(),
                line,
            }),
            _ => None,
        };

        let label = frame.call_site_label.trim();
        let what = Some(label.to_string()).filter(|what| !what.is_empty());

        Self::Frame {
            header: ItemHeader { pointer, what },
            footer: Footer {
                addr: frame.shortened_address.clone(),
                extra: frame.extra.clone(),
            },
        }
    }
}
