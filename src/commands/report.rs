//! Report command implementation.
//!
//! The report commands:
//! 1. Build a reporter from the config file and CLI flags
//! 2. Read the error input
//! 3. Parse and filter it
//! 4. Print styled text, the render tree, or the descriptor

use crate::commands::models::{ReportArgs, ReportFormat};
use crate::input::read_input;
use crate::output::{to_json_string, write_json};
use crate::policy::{filters, ConfigOptions};
use crate::reporter::Reporter;
use anyhow::{bail, Context, Result};
use log::{debug, info};

/// Execute a report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed config file
/// * Unreadable or empty input
/// * Malformed `--alias` values
/// * Output write failures
pub fn execute_report(args: &ReportArgs, format: ReportFormat) -> Result<()> {
    let reporter = build_reporter(args)?;

    let input = read_input(args.input.as_deref()).context("Failed to read error input")?;

    match format {
        ReportFormat::Text => {
            print!("{}", reporter.render(input));
        }
        ReportFormat::Tree => {
            let tree = reporter.get_object(input);
            emit_json(args, &tree)?;
        }
        ReportFormat::Descriptor => {
            let descriptor = reporter.descriptor(input);
            emit_json(args, &descriptor)?;
        }
    }

    Ok(())
}

/// Build a reporter from the config file, then the CLI flags on top
///
/// **Public** - exposed for testing
pub fn build_reporter(args: &ReportArgs) -> Result<Reporter> {
    let mut reporter = Reporter::new();

    if let Some(config_path) = &args.config {
        info!("Loading config: {}", config_path.display());
        let options = ConfigOptions::load(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;
        reporter.config(options);
    }

    let pipeline = reporter.pipeline_mut();

    pipeline.skip_packages(args.skip_packages.iter().cloned());
    pipeline.skip_paths(args.skip_paths.iter().cloned());

    if let Some(max_items) = args.max_items {
        pipeline.set_max_items(max_items);
    }
    if args.skip_node_files {
        pipeline.skip_node_files();
    }
    for alias in &args.aliases {
        let (pattern, replacement) = parse_alias(alias)?;
        pipeline.alias(pattern, replacement);
    }
    if args.module_exports {
        pipeline.filter(filters::module_exports);
    }
    if args.no_color {
        pipeline.without_colors();
    }

    debug!("Policy: {:?}", pipeline.state());

    Ok(reporter)
}

/// Split a `PATTERN=REPLACEMENT` alias argument
pub fn parse_alias(alias: &str) -> Result<(String, String)> {
    match alias.split_once('=') {
        Some((pattern, replacement)) if !pattern.is_empty() => {
            Ok((pattern.to_string(), replacement.to_string()))
        }
        _ => bail!("Invalid alias '{}', expected PATTERN=REPLACEMENT", alias),
    }
}

/// Print JSON to stdout or write it to the output file
///
/// **Private** - internal helper for execute_report
fn emit_json(args: &ReportArgs, value: &impl serde::Serialize) -> Result<()> {
    match &args.output {
        Some(path) => write_json(value, path).context("Failed to write JSON output")?,
        None => println!("{}", to_json_string(value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alias() {
        assert_eq!(
            parse_alias("/home/me/app=~").unwrap(),
            ("/home/me/app".to_string(), "~".to_string())
        );
        assert_eq!(parse_alias("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
        assert!(parse_alias("no-separator").is_err());
        assert!(parse_alias("=x").is_err());
    }
}
