//! Error descriptor builder.
//!
//! Wraps whatever a caller hands over into an `ErrorDescriptor`:
//! classification, reconciled message, wrapper label and the parsed
//! trace. Building never fails; unusable input degrades to a descriptor
//! with an empty trace.

use super::frame::parse_line;
use super::lexer::{is_call_site_line, scrape_kind_token};
use super::schema::{ErrorDescriptor, ErrorInput, RawError, TraceEntry};
use crate::utils::config::DEFAULT_KIND;
use log::debug;

/// Normalize any accepted input into a descriptor
///
/// **Public** - main entry point for the builder
pub fn build(input: impl Into<ErrorInput>) -> ErrorDescriptor {
    match input.into() {
        ErrorInput::Raw(raw) => build_from_raw(&raw),
        ErrorInput::Value(value) => ErrorDescriptor::bare(DEFAULT_KIND, value),
        ErrorInput::Parsed(descriptor) => descriptor,
    }
}

/// Build a descriptor from a raw error value
///
/// # Algorithm
/// 1. Take the declared classification; a `Kind: ` token at the start of
///    the stack text takes precedence
/// 2. Walk the stack lines; before the first call-site line, lines that
///    continue the declared message in sequence are collected as message
///    continuation, until the first line that does not
/// 3. From the first call-site line on, every non-blank line becomes a
///    trace entry
/// 4. Append the continuation (minus a leading kind token) to the message
pub fn build_from_raw(raw: &RawError) -> ErrorDescriptor {
    let mut descriptor = ErrorDescriptor {
        kind: raw.declared_kind().to_string(),
        message: raw.message.clone().unwrap_or_default(),
        wrapper_label: raw.wrapper.clone().unwrap_or_default(),
        frames: Vec::new(),
    };

    let Some(stack) = raw.stack.as_deref() else {
        return descriptor;
    };

    if let Some(token) = scrape_kind_token(stack) {
        descriptor.kind = token.to_string();
    }

    let mut continuation: Vec<&str> = Vec::new();
    let mut unmatched = Some(descriptor.message.as_str());
    let mut reached_trace = false;

    for line in stack.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if !reached_trace {
            if is_call_site_line(line) {
                reached_trace = true;
            } else {
                match unmatched.and_then(|rest| continue_message(rest, line)) {
                    Some(rest) => {
                        continuation.push(line);
                        unmatched = Some(rest);
                    }
                    None => {
                        debug!("Skipping preamble line: {}", line);
                        unmatched = None;
                    }
                }
                continue;
            }
        }

        if let Some(entry) = parse_line(line) {
            descriptor.frames.push(entry);
        }
    }

    reconcile_message(&mut descriptor, &continuation.join("\n"));

    debug!(
        "Built {} descriptor with {} trace entries",
        descriptor.kind,
        descriptor.frames.len()
    );

    descriptor
}

/// Match a preamble line against the unmatched tail of the message
///
/// Returns the tail left after the line, or `None` when the line does
/// not continue the message.
///
/// **Private** - internal helper for build_from_raw
fn continue_message<'a>(unmatched: &'a str, line: &str) -> Option<&'a str> {
    let unmatched = unmatched.strip_prefix('\n').unwrap_or(unmatched);
    unmatched.strip_prefix(line)
}

/// Append message continuation text, minus a leading kind token
///
/// **Private** - internal helper for build_from_raw
fn reconcile_message(descriptor: &mut ErrorDescriptor, continuation: &str) {
    let mut text = continuation;
    if let Some(rest) = text.strip_prefix(descriptor.kind.as_str()) {
        text = match rest.strip_prefix(':') {
            Some(after) if after.starts_with(char::is_whitespace) => after.trim_start(),
            _ => rest,
        };
    }

    if text.is_empty() || descriptor.message.contains(text) {
        return;
    }

    if descriptor.message.is_empty() {
        descriptor.message = text.to_string();
    } else {
        descriptor.message = format!("{}\n{}", descriptor.message, text);
    }
}

/// Count the structured frames of a trace
pub fn count_frames(entries: &[TraceEntry]) -> usize {
    entries.iter().filter(|entry| entry.as_frame().is_some()).count()
}
