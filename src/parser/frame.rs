//! Trace frame parser.
//!
//! Turns one line of stack text into a `TraceEntry`. Lines that look
//! like call sites become structured frames; anything else is kept as
//! free text so nothing is silently dropped.

use super::lexer::{
    contains_call_site_marker, innermost_dependency, split_parenthesized_address,
    strip_call_site_marker, strip_compiled_position, strip_position_suffix,
};
use super::package::shorten_path;
use super::path::{basename, dirname, normalize};
use super::schema::{Frame, TraceEntry};
use crate::utils::config::ANONYMOUS_CALL_SITES;
use log::debug;

/// Parse one line of stack text
///
/// **Public** - main entry point for line parsing
///
/// # Returns
/// * `None` - blank lines and anonymous call sites with no location
/// * `Some(TraceEntry::Text)` - lines without a call-site marker
/// * `Some(TraceEntry::Frame)` - everything else, as completely as the
///   line allows
pub fn parse_line(line: &str) -> Option<TraceEntry> {
    let text = line.trim();
    if text.is_empty() {
        return None;
    }

    if !contains_call_site_marker(text) {
        return Some(TraceEntry::text(text));
    }

    let text = strip_call_site_marker(text);
    if ANONYMOUS_CALL_SITES.contains(&text) {
        debug!("Dropping anonymous call site: {}", text);
        return None;
    }

    Some(TraceEntry::Frame(parse_call_site(line, text)))
}

/// Build a frame from a call-site body (marker already stripped)
///
/// **Private** - internal helper for parse_line
fn parse_call_site(original: &str, text: &str) -> Frame {
    let mut frame = Frame::new(original);

    let (label, raw_address) = split_parenthesized_address(text).unwrap_or(("", text.trim()));
    frame.call_site_label = label.to_string();
    frame.address = normalize(raw_address);

    let mut remaining = frame.address.as_str();
    let compiled = strip_compiled_position(remaining);
    if let Some(suffix) = compiled {
        remaining = suffix.rest;
    }

    let Some(position) = strip_position_suffix(remaining) else {
        if frame.call_site_label.is_empty() {
            // No recognizable shape: keep the whole body as the label
            frame.call_site_label = text.trim().to_string();
        }
        frame.shortened_address = frame.address.clone();
        debug!("No position in call site: {}", text);
        return frame;
    };

    frame.line = position.line_number();
    frame.col = position.col_number();
    (frame.compiled_line, frame.compiled_col) = match compiled {
        Some(suffix) => (suffix.line_number(), suffix.col_number()),
        None => (frame.line, frame.col),
    };
    frame.module_path = normalize(position.rest);

    if frame.module_path.is_empty() {
        frame.shortened_address = frame.address.clone();
        return frame;
    }

    frame.file = normalize(&basename(&frame.module_path));
    frame.dir = normalize(&dirname(&frame.module_path));

    if let Some(name) = innermost_dependency(&frame.dir) {
        frame.package_name = name.to_string();
    }

    let shortened = shorten_path(&frame.module_path, None);
    let suffix = frame
        .address
        .strip_prefix(frame.module_path.as_str())
        .unwrap_or_default();
    frame.shortened_address = format!("{}{}", shortened.path, suffix);
    frame.shortened_path = shortened.path;
    frame.project = shortened.project;
    frame.packages = shortened.packages;

    frame
}
