//! Typed pipeline stages.
//!
//! Every rule the pipeline holds is evaluated through one of these
//! stages. A stage takes ownership of a trace entry and hands back a
//! verdict: either the (possibly rewritten) entry, or a skip.

use crate::parser::schema::{ErrorDescriptor, TraceEntry};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied predicate; returning `true` skips the entry
pub type SkipPredicate = Arc<dyn Fn(&TraceEntry, usize) -> bool + Send + Sync>;

/// Caller-supplied display filter; returns the entry to show
pub type DisplayFilter = Arc<dyn Fn(TraceEntry, usize) -> TraceEntry + Send + Sync>;

/// Caller-supplied descriptor filter; runs once per descriptor
pub type DescriptorFilter = Arc<dyn Fn(ErrorDescriptor) -> ErrorDescriptor + Send + Sync>;

/// Handle returned when a callback is registered, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub(crate) u64);

/// A registered callback together with its handle
#[derive(Clone)]
pub struct Registered<F> {
    pub id: CallbackId,
    pub callback: F,
}

impl<F> fmt::Debug for Registered<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered").field("id", &self.id).finish()
    }
}

/// What an alias rule looks for
#[derive(Debug, Clone)]
pub enum AliasPattern {
    /// Plain substring
    Literal(String),

    /// Regular expression
    Regex(Regex),
}

impl AliasPattern {
    /// Source text of the pattern
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Regex(regex) => regex.as_str(),
        }
    }

    /// Replace the first match in `text`
    pub fn replace_first(&self, text: &str, replacement: &str) -> String {
        match self {
            Self::Literal(pattern) => text.replacen(pattern.as_str(), replacement, 1),
            Self::Regex(regex) => regex.replace(text, replacement).into_owned(),
        }
    }
}

impl From<&str> for AliasPattern {
    fn from(pattern: &str) -> Self {
        Self::Literal(pattern.to_string())
    }
}

impl From<String> for AliasPattern {
    fn from(pattern: String) -> Self {
        Self::Literal(pattern)
    }
}

impl From<Regex> for AliasPattern {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

/// A `(pattern, replacement)` pair applied to shortened addresses
#[derive(Debug, Clone)]
pub struct AliasRule {
    pub pattern: AliasPattern,
    pub replacement: String,
}

/// Outcome of running an entry through a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Keep the entry (possibly rewritten)
    Keep(TraceEntry),

    /// Drop the entry
    Skip,
}

impl Verdict {
    /// Whether the entry was dropped
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// The kept entry, if any
    pub fn into_entry(self) -> Option<TraceEntry> {
        match self {
            Self::Keep(entry) => Some(entry),
            Self::Skip => None,
        }
    }
}

/// One step of frame admission, borrowing its rules from the policy state
#[derive(Debug, Clone, Copy)]
pub enum Stage<'a> {
    /// Skip frames whose package or provenance chain names a skipped package
    SkipPackages(&'a BTreeSet<String>),

    /// Skip frames whose module path is listed
    SkipPaths(&'a BTreeSet<String>),

    /// Rewrite shortened addresses
    Aliases(&'a [AliasRule]),

    /// First predicate returning `true` skips the entry
    SkipPredicates(&'a [Registered<SkipPredicate>]),

    /// Every filter rewrites the entry in turn
    DisplayFilters(&'a [Registered<DisplayFilter>]),
}

impl Stage<'_> {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::SkipPackages(_) => "skip-packages",
            Self::SkipPaths(_) => "skip-paths",
            Self::Aliases(_) => "aliases",
            Self::SkipPredicates(_) => "skip-predicates",
            Self::DisplayFilters(_) => "display-filters",
        }
    }

    /// Run one entry through this stage
    pub fn apply(&self, entry: TraceEntry, index: usize) -> Verdict {
        match self {
            Self::SkipPackages(names) => match entry.as_frame() {
                Some(frame)
                    if names.contains(&frame.package_name)
                        || frame.packages.iter().any(|name| names.contains(name)) =>
                {
                    Verdict::Skip
                }
                _ => Verdict::Keep(entry),
            },
            Self::SkipPaths(paths) => match entry.as_frame() {
                Some(frame) if paths.contains(&frame.module_path) => Verdict::Skip,
                _ => Verdict::Keep(entry),
            },
            Self::Aliases(rules) => {
                let mut entry = entry;
                if let Some(frame) = entry.as_frame_mut() {
                    for rule in rules.iter() {
                        frame.shortened_address = rule
                            .pattern
                            .replace_first(&frame.shortened_address, &rule.replacement);
                    }
                }
                Verdict::Keep(entry)
            }
            Self::SkipPredicates(predicates) => {
                if predicates.iter().any(|p| (p.callback)(&entry, index)) {
                    Verdict::Skip
                } else {
                    Verdict::Keep(entry)
                }
            }
            Self::DisplayFilters(filters) => Verdict::Keep(
                filters
                    .iter()
                    .fold(entry, |entry, filter| (filter.callback)(entry, index)),
            ),
        }
    }
}
