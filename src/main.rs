//! Pretty Trace CLI
//!
//! Turns raw runtime errors and stack traces into readable,
//! filterable reports.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use pretty_trace::commands::{display_modules, execute_report, ReportArgs, ReportFormat};

/// Pretty Trace - readable stack traces
#[derive(Parser, Debug)]
#[command(name = "pretty-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an error as a styled report
    Render(ReportOpts),

    /// Print the render tree as JSON
    Tree(ReportOpts),

    /// Print the parsed error descriptor as JSON
    Parse(ReportOpts),

    /// List the built-in runtime module files
    Modules,
}

/// Options shared by the report commands
#[derive(Args, Debug)]
struct ReportOpts {
    /// Error input: JSON error object or raw stack text (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "PRETTY_TRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Skip frames from this package (repeatable)
    #[arg(long = "skip-package")]
    skip_packages: Vec<String>,

    /// Skip frames from this module path (repeatable)
    #[arg(long = "skip-path")]
    skip_paths: Vec<String>,

    /// Maximum number of trace items to show
    #[arg(long)]
    max_items: Option<usize>,

    /// Skip the runtime's built-in module files
    #[arg(long)]
    skip_node_files: bool,

    /// Rewrite addresses, as PATTERN=REPLACEMENT (repeatable)
    #[arg(long = "alias")]
    aliases: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show `a.module.exports.b` call sites as `a - b`
    #[arg(long)]
    module_exports: bool,

    /// Write JSON output to this file (tree and parse only)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl From<ReportOpts> for ReportArgs {
    fn from(opts: ReportOpts) -> Self {
        Self {
            input: opts.input,
            config: opts.config,
            skip_packages: opts.skip_packages,
            skip_paths: opts.skip_paths,
            max_items: opts.max_items,
            skip_node_files: opts.skip_node_files,
            aliases: opts.aliases,
            no_color: opts.no_color,
            module_exports: opts.module_exports,
            output: opts.output,
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render(opts) => execute_report(&opts.into(), ReportFormat::Text)?,
        Commands::Tree(opts) => execute_report(&opts.into(), ReportFormat::Tree)?,
        Commands::Parse(opts) => execute_report(&opts.into(), ReportFormat::Descriptor)?,
        Commands::Modules => display_modules(),
    }

    Ok(())
}
