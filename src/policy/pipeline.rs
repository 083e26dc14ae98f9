//! Policy pipeline.
//!
//! Owns the user-configured skip, alias and filter rules and decides,
//! frame by frame, what reaches the renderer.

use super::options::{ConfigOptions, Setting};
use super::stage::{
    AliasPattern, AliasRule, CallbackId, DescriptorFilter, DisplayFilter, Registered,
    SkipPredicate, Stage, Verdict,
};
use crate::parser::schema::{ErrorDescriptor, TraceEntry};
use crate::utils::config::{DEFAULT_MAX_ITEMS, NODE_MODULE_FILES};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Rules held by a pipeline
///
/// Created with the pipeline, changed only through its configuration
/// operations.
#[derive(Debug, Clone)]
pub struct PolicyState {
    /// Packages whose frames are dropped
    pub skipped_package_names: BTreeSet<String>,

    /// Module paths whose frames are dropped
    pub skipped_paths: BTreeSet<String>,

    /// Skip predicates, in registration order
    pub skip_predicates: Vec<Registered<SkipPredicate>>,

    /// Display filters, in registration order
    pub display_filters: Vec<Registered<DisplayFilter>>,

    /// Filters run once per descriptor, before admission
    pub descriptor_filters: Vec<Registered<DescriptorFilter>>,

    /// Address aliases, in registration order
    pub alias_rules: Vec<AliasRule>,

    /// Maximum number of trace entries kept
    pub max_frames: usize,

    /// Whether rendering uses ANSI colors
    pub color_enabled: bool,
}

impl Default for PolicyState {
    fn default() -> Self {
        Self {
            skipped_package_names: BTreeSet::new(),
            skipped_paths: BTreeSet::new(),
            skip_predicates: Vec::new(),
            display_filters: Vec::new(),
            descriptor_filters: Vec::new(),
            alias_rules: Vec::new(),
            max_frames: DEFAULT_MAX_ITEMS,
            color_enabled: true,
        }
    }
}

/// Frame admission pipeline
///
/// Not synchronized: share one instance across threads only behind a lock.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    state: PolicyState,
    next_id: u64,
}

impl Pipeline {
    /// Create a pipeline with default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rules
    pub fn state(&self) -> &PolicyState {
        &self.state
    }

    /// Apply a set of configuration options
    ///
    /// `Setting::Clear` removes every rule of that kind; other values add to it.
    pub fn config(&mut self, options: ConfigOptions) {
        match options.skip_packages {
            Some(Setting::Add(names)) => self.skip_packages(names),
            Some(Setting::Clear) => self.unskip_all_packages(),
            None => {}
        }
        match options.skip_paths {
            Some(Setting::Add(paths)) => self.skip_paths(paths),
            Some(Setting::Clear) => self.unskip_all_paths(),
            None => {}
        }
        match options.skip {
            Some(Setting::Add(predicates)) => {
                for predicate in predicates {
                    self.register_skip(predicate);
                }
            }
            Some(Setting::Clear) => self.unskip_all(),
            None => {}
        }
        if let Some(max_items) = options.max_items {
            self.set_max_items(max_items);
        }
        match options.skip_node_files {
            Some(true) => self.skip_node_files(),
            Some(false) => self.unskip_node_files(),
            None => {}
        }
        match options.filters {
            Some(Setting::Add(filters)) => {
                for filter in filters {
                    self.register_filter(filter);
                }
            }
            Some(Setting::Clear) => self.remove_all_filters(),
            None => {}
        }
        match options.parsed_error_filters {
            Some(Setting::Add(filters)) => {
                for filter in filters {
                    self.register_descriptor_filter(filter);
                }
            }
            Some(Setting::Clear) => self.remove_all_descriptor_filters(),
            None => {}
        }
        match options.aliases {
            Some(Setting::Add(aliases)) => {
                for (pattern, replacement) in aliases {
                    self.alias(pattern, replacement);
                }
            }
            Some(Setting::Clear) => self.remove_all_aliases(),
            None => {}
        }
        match options.colors {
            Some(true) => self.with_colors(),
            Some(false) => self.without_colors(),
            None => {}
        }
    }

    // --- colors ---

    /// Render with ANSI colors
    pub fn with_colors(&mut self) {
        self.state.color_enabled = true;
    }

    /// Render plain text
    pub fn without_colors(&mut self) {
        self.state.color_enabled = false;
    }

    /// Whether rendering uses ANSI colors
    pub fn colors_enabled(&self) -> bool {
        self.state.color_enabled
    }

    // --- packages ---

    /// Skip frames attributed to any of these packages
    pub fn skip_packages<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .skipped_package_names
            .extend(names.into_iter().map(Into::into));
    }

    /// Stop skipping these packages
    pub fn unskip_packages<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.state.skipped_package_names.remove(name.as_ref());
        }
    }

    /// Stop skipping every package
    pub fn unskip_all_packages(&mut self) {
        self.state.skipped_package_names.clear();
    }

    // --- paths ---

    /// Skip frames whose module path is one of these
    pub fn skip_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .skipped_paths
            .extend(paths.into_iter().map(Into::into));
    }

    /// Stop skipping these module paths
    pub fn unskip_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.state.skipped_paths.remove(path.as_ref());
        }
    }

    /// Stop skipping every module path, built-in module files included
    pub fn unskip_all_paths(&mut self) {
        self.state.skipped_paths.clear();
    }

    /// Skip the runtime's built-in module files
    pub fn skip_node_files(&mut self) {
        self.skip_paths(NODE_MODULE_FILES.iter().copied());
    }

    /// Stop skipping the built-in module files
    pub fn unskip_node_files(&mut self) {
        self.unskip_paths(NODE_MODULE_FILES.iter());
    }

    // --- skip predicates ---

    /// Register a skip predicate
    pub fn skip<F>(&mut self, predicate: F) -> CallbackId
    where
        F: Fn(&TraceEntry, usize) -> bool + Send + Sync + 'static,
    {
        self.register_skip(Arc::new(predicate))
    }

    fn register_skip(&mut self, callback: SkipPredicate) -> CallbackId {
        let id = self.allocate_id();
        self.state.skip_predicates.push(Registered { id, callback });
        id
    }

    /// Remove a skip predicate; returns whether it was registered
    pub fn unskip(&mut self, id: CallbackId) -> bool {
        remove_registered(&mut self.state.skip_predicates, id)
    }

    /// Remove every skip predicate
    pub fn unskip_all(&mut self) {
        self.state.skip_predicates.clear();
    }

    // --- display filters ---

    /// Register a display filter
    pub fn filter<F>(&mut self, filter: F) -> CallbackId
    where
        F: Fn(TraceEntry, usize) -> TraceEntry + Send + Sync + 'static,
    {
        self.register_filter(Arc::new(filter))
    }

    fn register_filter(&mut self, callback: DisplayFilter) -> CallbackId {
        let id = self.allocate_id();
        self.state.display_filters.push(Registered { id, callback });
        id
    }

    /// Remove a display filter; returns whether it was registered
    pub fn remove_filter(&mut self, id: CallbackId) -> bool {
        remove_registered(&mut self.state.display_filters, id)
    }

    /// Remove every display filter
    pub fn remove_all_filters(&mut self) {
        self.state.display_filters.clear();
    }

    // --- descriptor filters ---

    /// Register a filter that runs once per descriptor
    pub fn filter_descriptor<F>(&mut self, filter: F) -> CallbackId
    where
        F: Fn(ErrorDescriptor) -> ErrorDescriptor + Send + Sync + 'static,
    {
        self.register_descriptor_filter(Arc::new(filter))
    }

    fn register_descriptor_filter(&mut self, callback: DescriptorFilter) -> CallbackId {
        let id = self.allocate_id();
        self.state.descriptor_filters.push(Registered { id, callback });
        id
    }

    /// Remove a descriptor filter; returns whether it was registered
    pub fn remove_descriptor_filter(&mut self, id: CallbackId) -> bool {
        remove_registered(&mut self.state.descriptor_filters, id)
    }

    /// Remove every descriptor filter
    pub fn remove_all_descriptor_filters(&mut self) {
        self.state.descriptor_filters.clear();
    }

    // --- aliases ---

    /// Rewrite the first match of `pattern` in every shortened address
    pub fn alias(&mut self, pattern: impl Into<AliasPattern>, replacement: impl Into<String>) {
        self.state.alias_rules.push(AliasRule {
            pattern: pattern.into(),
            replacement: replacement.into(),
        });
    }

    /// Remove every alias rule whose pattern source equals `pattern`
    pub fn remove_alias(&mut self, pattern: &str) {
        self.state
            .alias_rules
            .retain(|rule| rule.pattern.as_str() != pattern);
    }

    /// Remove every alias rule
    pub fn remove_all_aliases(&mut self) {
        self.state.alias_rules.clear();
    }

    // --- limits ---

    /// Cap the number of trace entries kept; zero is ignored
    pub fn set_max_items(&mut self, max_items: usize) {
        if max_items < 1 {
            warn!("Ignoring max items of {}", max_items);
            return;
        }
        self.state.max_frames = max_items;
    }

    /// Current cap on kept trace entries
    pub fn max_items(&self) -> usize {
        self.state.max_frames
    }

    // --- evaluation ---

    /// Stages in evaluation order
    pub fn stages(&self) -> [Stage<'_>; 5] {
        [
            Stage::SkipPackages(&self.state.skipped_package_names),
            Stage::SkipPaths(&self.state.skipped_paths),
            Stage::Aliases(&self.state.alias_rules),
            Stage::SkipPredicates(&self.state.skip_predicates),
            Stage::DisplayFilters(&self.state.display_filters),
        ]
    }

    /// Run one trace entry through every stage
    ///
    /// Stops at the first stage that skips the entry.
    pub fn admit(&self, entry: TraceEntry, index: usize) -> Verdict {
        let mut entry = entry;
        for stage in self.stages() {
            match stage.apply(entry, index) {
                Verdict::Keep(kept) => entry = kept,
                Verdict::Skip => {
                    debug!("Entry {} skipped by {}", index, stage.name());
                    return Verdict::Skip;
                }
            }
        }
        Verdict::Keep(entry)
    }

    /// Run the descriptor filters in registration order
    pub fn apply_descriptor_filters(&self, descriptor: ErrorDescriptor) -> ErrorDescriptor {
        self.state
            .descriptor_filters
            .iter()
            .fold(descriptor, |descriptor, filter| (filter.callback)(descriptor))
    }

    /// Filter a whole descriptor
    ///
    /// Descriptor filters run first, then entries are admitted in order.
    /// Once `max_items` entries are kept, the remaining ones are dropped
    /// without being evaluated.
    pub fn select(&self, descriptor: ErrorDescriptor) -> ErrorDescriptor {
        let mut descriptor = self.apply_descriptor_filters(descriptor);
        let entries = std::mem::take(&mut descriptor.frames);
        let total = entries.len();

        for (index, entry) in entries.into_iter().enumerate() {
            if descriptor.frames.len() >= self.state.max_frames {
                debug!(
                    "Reached {} items, truncating {} remaining",
                    self.state.max_frames,
                    total - index
                );
                break;
            }
            if let Verdict::Keep(entry) = self.admit(entry, index) {
                descriptor.frames.push(entry);
            }
        }

        descriptor
    }

    fn allocate_id(&mut self) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Remove a registered callback by handle
fn remove_registered<F>(list: &mut Vec<Registered<F>>, id: CallbackId) -> bool {
    let before = list.len();
    list.retain(|registered| registered.id != id);
    list.len() != before
}
