use pretty_assertions::assert_eq;
use pretty_trace::parser::build;
use pretty_trace::policy::{filters, Setting};
use pretty_trace::{ConfigOptions, ErrorDescriptor, Pipeline, RawError, TraceEntry};
use regex::Regex;
use std::io::Write;
use tempfile::NamedTempFile;

fn descriptor(frames: &[&str]) -> ErrorDescriptor {
    let mut stack = String::from("Error: boom");
    for frame in frames {
        stack.push_str("\n    at ");
        stack.push_str(frame);
    }
    build(RawError::new("boom", stack))
}

fn kept_addresses(descriptor: &ErrorDescriptor) -> Vec<String> {
    descriptor
        .structured_frames()
        .map(|frame| frame.shortened_address.clone())
        .collect()
}

#[test]
fn test_skip_package_is_transitive() {
    let mut pipeline = Pipeline::new();
    pipeline.skip_packages(["foo"]);

    let selected = pipeline.select(descriptor(&[
        "f (/app/node_modules/foo/node_modules/bar/x.js:1:1)",
        "g (/app/src/y.js:2:2)",
    ]));

    assert_eq!(kept_addresses(&selected), vec!["/app/src/y.js:2:2"]);
}

#[test]
fn test_skipping_project_name_keeps_dependency_frames() {
    let mut pipeline = Pipeline::new();
    pipeline.skip_packages(["app"]);

    let selected = pipeline.select(descriptor(&[
        "f (/app/node_modules/lib/x.js:3:7)",
        "g (/app/src/y.js:2:2)",
    ]));

    assert_eq!(
        kept_addresses(&selected),
        vec!["[app]/[lib]/x.js:3:7", "/app/src/y.js:2:2"]
    );
}

#[test]
fn test_unskip_packages() {
    let mut pipeline = Pipeline::new();
    pipeline.skip_packages(["foo", "bar"]);
    pipeline.unskip_packages(["foo"]);

    let state = pipeline.state();
    assert!(!state.skipped_package_names.contains("foo"));
    assert!(state.skipped_package_names.contains("bar"));

    pipeline.unskip_all_packages();
    assert!(pipeline.state().skipped_package_names.is_empty());
}

#[test]
fn test_max_items_boundary() {
    let frames = ["a (/a.js:1:1)", "b (/b.js:1:1)", "c (/c.js:1:1)"];

    let mut pipeline = Pipeline::new();
    pipeline.set_max_items(3);
    assert_eq!(pipeline.select(descriptor(&frames)).frames.len(), 3);

    pipeline.set_max_items(1);
    assert_eq!(pipeline.select(descriptor(&frames)).frames.len(), 1);
}

#[test]
fn test_regex_alias_rewrites_shortened_address() {
    let mut pipeline = Pipeline::new();
    pipeline.alias(Regex::new(r"x\.js").unwrap(), "y.js");

    let selected = pipeline.select(descriptor(&["f (/app/node_modules/lib/x.js:3:7)"]));
    let frame = selected.frames[0].as_frame().unwrap();

    assert_eq!(frame.shortened_address, "[app]/[lib]/y.js:3:7");
    assert_eq!(frame.module_path, "/app/node_modules/lib/x.js");
}

#[test]
fn test_skip_node_files_empties_trace() {
    let mut pipeline = Pipeline::new();
    pipeline.skip_node_files();

    let selected = pipeline.select(descriptor(&["fs.js:10:3"]));
    assert!(selected.frames.is_empty());
}

#[test]
fn test_text_entries_pass_package_and_path_stages() {
    let mut pipeline = Pipeline::new();
    pipeline.skip_packages(["note"]);
    pipeline.skip_paths(["note"]);

    let entry = TraceEntry::text("note");
    assert!(!pipeline.admit(entry, 0).is_skip());
}

#[test]
fn test_predicates_see_text_entries() {
    let mut pipeline = Pipeline::new();
    pipeline.skip(|entry, _| matches!(entry, TraceEntry::Text { .. }));

    let mut stack = descriptor(&["a (/a.js:1:1)"]);
    stack.frames.push(TraceEntry::text("trailing note"));

    let selected = pipeline.select(stack);
    assert_eq!(selected.frames.len(), 1);
    assert!(selected.frames[0].as_frame().is_some());
}

#[test]
fn test_filter_handles_are_independent() {
    let mut pipeline = Pipeline::new();
    let tag = pipeline.filter(|mut entry, index| {
        if let Some(frame) = entry.as_frame_mut() {
            frame.extra = Some(format!("#{}", index));
        }
        entry
    });
    pipeline.filter(filters::module_exports);

    let selected = pipeline.select(descriptor(&["Object.module.exports.run (/a.js:1:1)"]));
    let frame = selected.frames[0].as_frame().unwrap();
    assert_eq!(frame.call_site_label, "Object - run");
    assert_eq!(frame.extra.as_deref(), Some("#0"));

    assert!(pipeline.remove_filter(tag));
    let selected = pipeline.select(descriptor(&["Object.module.exports.run (/a.js:1:1)"]));
    assert_eq!(selected.frames[0].as_frame().unwrap().extra, None);
}

#[test]
fn test_config_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
skipPackages = ["lib"]
maxItems = 1
colors = false

[aliases]
"/app/src" = "~"
"#
    )
    .unwrap();

    let mut pipeline = Pipeline::new();
    pipeline.config(ConfigOptions::load(file.path()).unwrap());

    assert_eq!(pipeline.max_items(), 1);
    assert!(!pipeline.colors_enabled());

    let selected = pipeline.select(descriptor(&[
        "f (/app/node_modules/lib/x.js:3:7)",
        "g (/app/src/y.js:2:2)",
        "h (/app/src/z.js:4:4)",
    ]));
    assert_eq!(kept_addresses(&selected), vec!["~/y.js:2:2"]);
}

#[test]
fn test_config_from_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"skipNodeFiles": true, "skip_paths": ["/app/boot.js"]}}"#).unwrap();

    let options = ConfigOptions::load(file.path()).unwrap();
    assert_eq!(options.skip_node_files, Some(true));
    assert!(matches!(options.skip_paths, Some(Setting::Add(ref paths)) if paths == &["/app/boot.js"]));

    let mut pipeline = Pipeline::new();
    pipeline.config(options);
    assert!(pipeline.state().skipped_paths.contains("/app/boot.js"));
    assert!(pipeline.state().skipped_paths.contains("fs.js"));
}

#[test]
fn test_config_missing_file_is_an_error() {
    assert!(ConfigOptions::load("/nonexistent/pretty-trace.toml").is_err());
}
