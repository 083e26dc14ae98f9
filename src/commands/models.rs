use std::path::PathBuf;

/// Arguments shared by the commands that read an error
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Error input file (stdin when absent)
    pub input: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    pub config: Option<PathBuf>,

    /// Packages to skip
    pub skip_packages: Vec<String>,

    /// Module paths to skip
    pub skip_paths: Vec<String>,

    /// Cap on trace items
    pub max_items: Option<usize>,

    /// Skip the runtime's built-in module files
    pub skip_node_files: bool,

    /// `PATTERN=REPLACEMENT` alias rules
    pub aliases: Vec<String>,

    /// Disable colors
    pub no_color: bool,

    /// Rewrite `.module.exports.` in call-site labels
    pub module_exports: bool,

    /// Write JSON output to this file instead of stdout
    pub output: Option<PathBuf>,
}

/// Which representation a command prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Styled terminal text
    Text,

    /// Render tree as JSON
    Tree,

    /// Parsed descriptor as JSON
    Descriptor,
}
