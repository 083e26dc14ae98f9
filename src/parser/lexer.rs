//! Lexical rules for stack text.
//!
//! Each rule recognizes one prefix or suffix shape and hands back the
//! pieces it matched, leaving the rest of the text untouched. The frame
//! parser composes them; they are kept apart so every shape can be
//! tested on its own.

use crate::utils::config::{CALL_SITE_MARKER, COMPILED_MARKER, DEPENDENCY_DIR};

/// A `:line:col` suffix split off the end of some text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSuffix<'a> {
    /// Text before the suffix
    pub rest: &'a str,

    /// Line digits
    pub line: &'a str,

    /// Column digits
    pub col: &'a str,
}

impl PositionSuffix<'_> {
    /// Numeric line, `None` if the digits overflow
    pub fn line_number(&self) -> Option<u32> {
        self.line.parse().ok()
    }

    /// Numeric column, `None` if the digits overflow
    pub fn col_number(&self) -> Option<u32> {
        self.col.parse().ok()
    }
}

/// Whether a raw line starts a call site (`at` followed by whitespace and text)
pub fn is_call_site_line(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("at") else {
        return false;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.any(|c| c != '\n'),
        _ => false,
    }
}

/// Whether the text mentions the call-site marker anywhere
pub fn contains_call_site_marker(text: &str) -> bool {
    text.contains(CALL_SITE_MARKER)
}

/// Drop a leading call-site marker, if any
pub fn strip_call_site_marker(text: &str) -> &str {
    text.strip_prefix(CALL_SITE_MARKER).unwrap_or(text)
}

/// Split `label (address)` into its label and address
///
/// The address is the trailing parenthesized segment; it may contain `(`
/// but not `)`. Returns `None` when the text does not end with such a
/// segment.
pub fn split_parenthesized_address(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_suffix(')')?;
    let search_from = inner.rfind(')').map_or(0, |idx| idx + 1);
    let open = search_from + inner[search_from..].find('(')?;
    let address = &inner[open + 1..];
    if address.is_empty() {
        return None;
    }

    Some((text[..open].trim(), address.trim()))
}

/// Split a trailing `:<digits>:<digits>` off the text
pub fn strip_position_suffix(text: &str) -> Option<PositionSuffix<'_>> {
    let (before_col, col) = split_trailing_digits(text)?;
    let before_col = before_col.strip_suffix(':')?;
    let (before_line, line) = split_trailing_digits(before_col)?;
    let rest = before_line.strip_suffix(':')?;

    Some(PositionSuffix { rest, line, col })
}

/// Split a trailing `, <js>:<digits>:<digits>` off the text
pub fn strip_compiled_position(text: &str) -> Option<PositionSuffix<'_>> {
    let suffix = strip_position_suffix(text)?;
    let rest = suffix.rest.strip_suffix(COMPILED_MARKER)?;

    Some(PositionSuffix { rest, ..suffix })
}

/// Leading `Kind: ` token of stack text, e.g. `TypeError` in `TypeError: boom`
pub fn scrape_kind_token(text: &str) -> Option<&str> {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(text.len());
    if end == 0 || !text[end..].starts_with(": ") {
        return None;
    }

    Some(&text[..end])
}

/// Name of the innermost dependency a directory lives in
///
/// This is the segment right after the last dependency-directory
/// segment, provided that segment is not empty.
pub fn innermost_dependency(dir: &str) -> Option<&str> {
    let segments: Vec<&str> = dir.split('/').collect();
    let boundary = segments.iter().rposition(|segment| *segment == DEPENDENCY_DIR)?;

    segments
        .get(boundary + 1)
        .copied()
        .filter(|name| !name.is_empty())
}

/// Split the trailing run of ASCII digits off the text
fn split_trailing_digits(text: &str) -> Option<(&str, &str)> {
    let start = text
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |idx| idx + 1);
    if start == text.len() {
        return None;
    }

    Some((&text[..start], &text[start..]))
}
