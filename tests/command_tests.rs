use pretty_trace::commands::{build_reporter, execute_report, parse_alias, ReportArgs, ReportFormat};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const STACK: &str = "TypeError: x is not a function\n    at run (/app/src/x.js:3:7)\n    at fs.js:10:3\n";

fn input_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(STACK.as_bytes()).unwrap();
    file
}

#[test]
fn test_build_reporter_applies_flags() {
    let args = ReportArgs {
        skip_packages: vec!["mocha".to_string()],
        max_items: Some(3),
        skip_node_files: true,
        aliases: vec!["/app=~".to_string()],
        no_color: true,
        ..Default::default()
    };

    let reporter = build_reporter(&args).unwrap();
    let state = reporter.pipeline().state();

    assert!(state.skipped_package_names.contains("mocha"));
    assert!(state.skipped_paths.contains("fs.js"));
    assert_eq!(state.max_frames, 3);
    assert_eq!(state.alias_rules.len(), 1);
    assert!(!state.color_enabled);
}

#[test]
fn test_flags_override_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "maxItems = 10\ncolors = true").unwrap();

    let args = ReportArgs {
        config: Some(config.path().to_path_buf()),
        max_items: Some(2),
        no_color: true,
        ..Default::default()
    };

    let reporter = build_reporter(&args).unwrap();
    assert_eq!(reporter.pipeline().max_items(), 2);
    assert!(!reporter.pipeline().colors_enabled());
}

#[test]
fn test_invalid_alias_flag() {
    let args = ReportArgs {
        aliases: vec!["missing-separator".to_string()],
        ..Default::default()
    };

    assert!(build_reporter(&args).is_err());
    assert!(parse_alias("a=").is_ok());
}

#[test]
fn test_execute_descriptor_to_file() {
    let input = input_file();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nested").join("descriptor.json");

    let args = ReportArgs {
        input: Some(input.path().to_path_buf()),
        skip_node_files: true,
        output: Some(output.clone()),
        ..Default::default()
    };

    execute_report(&args, ReportFormat::Descriptor).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["kind"], "TypeError");
    assert_eq!(written["message"], "x is not a function");
    assert_eq!(written["frames"].as_array().unwrap().len(), 1);
}

#[test]
fn test_execute_tree_to_file() {
    let input = input_file();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("tree.json");

    let args = ReportArgs {
        input: Some(input.path().to_path_buf()),
        output: Some(output.clone()),
        ..Default::default()
    };

    execute_report(&args, ReportFormat::Tree).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["pretty-error"]["trace"].as_array().unwrap().len(), 2);
}

#[test]
fn test_execute_with_empty_input_fails() {
    let input = NamedTempFile::new().unwrap();
    let args = ReportArgs {
        input: Some(input.path().to_path_buf()),
        ..Default::default()
    };

    assert!(execute_report(&args, ReportFormat::Text).is_err());
}
