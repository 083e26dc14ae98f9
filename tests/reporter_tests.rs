use pretty_assertions::assert_eq;
use pretty_trace::output::{write_json, RenderTree};
use pretty_trace::parser::build;
use pretty_trace::{ErrorDescriptor, ErrorInput, RawError, Reporter};
use serde_json::json;
use tempfile::NamedTempFile;

fn stack_error() -> RawError {
    RawError::new(
        "boom",
        "Error: boom\n    at f (/app/node_modules/lib/x.js:3:7)\n    at main (/app/src/index.js:10:1)",
    )
}

#[test]
fn test_get_object_shape() {
    let tree = Reporter::new().get_object(stack_error());

    assert_eq!(
        tree.to_value(),
        json!({
            "pretty-error": {
                "header": {
                    "title": { "kind": "Error" },
                    "colon": ":",
                    "message": "boom"
                },
                "trace": [
                    {
                        "item": {
                            "header": {
                                "pointer": { "file": "x.js", "colon": ":", "line": 3 },
                                "what": "f"
                            },
                            "footer": { "addr": "[app]/[lib]/x.js:3:7" }
                        }
                    },
                    {
                        "item": {
                            "header": {
                                "pointer": { "file": "index.js", "colon": ":", "line": 10 },
                                "what": "main"
                            },
                            "footer": { "addr": "/app/src/index.js:10:1" }
                        }
                    }
                ]
            }
        })
    );
}

#[test]
fn test_zero_frames_has_no_trace_key() {
    let tree = Reporter::new().get_object(RawError::new("boom", "Error: boom"));
    let value = tree.to_value();

    assert!(value["pretty-error"].get("trace").is_none());
    assert_eq!(value["pretty-error"]["header"]["message"], "boom");
}

#[test]
fn test_all_frames_skipped_has_no_trace_key() {
    let mut reporter = Reporter::new();
    reporter.pipeline_mut().skip_packages(["lib"]);
    reporter.pipeline_mut().skip_paths(["/app/src/index.js"]);

    let tree = reporter.get_object(stack_error());
    assert!(tree.report.trace.is_none());
}

#[test]
fn test_wrapper_appears_in_title() {
    let tree = Reporter::new().get_object(stack_error().with_wrapper("Unhandled rejection"));
    assert_eq!(
        tree.to_value()["pretty-error"]["header"]["title"],
        json!({ "wrapper": "Unhandled rejection", "kind": "Error" })
    );
}

#[test]
fn test_plain_render() {
    let mut reporter = Reporter::new();
    reporter.pipeline_mut().without_colors();
    reporter.pipeline_mut().alias("/app/src", "~");

    let output = reporter.render(stack_error());
    assert_eq!(
        output,
        concat!(
            "  Error: boom\n",
            "\n",
            "    - x.js:3 f\n",
            "      [app]/[lib]/x.js:3:7\n",
            "\n",
            "    - index.js:10 main\n",
            "      ~/index.js:10:1\n",
            "\n",
        )
    );
}

#[test]
fn test_colored_render_differs_from_plain() {
    colored::control::set_override(true);
    let reporter = Reporter::new();

    let colored_output = reporter.render_with_colors(stack_error(), true);
    let plain_output = reporter.render_with_colors(stack_error(), false);

    assert!(colored_output.contains("\u{1b}["));
    assert!(!plain_output.contains("\u{1b}["));
}

#[test]
fn test_parsed_descriptor_is_filtered_again() {
    let mut reporter = Reporter::new();
    reporter.pipeline_mut().set_max_items(1);

    let parsed: ErrorDescriptor = build(stack_error());
    let selected = reporter.descriptor(ErrorInput::Parsed(parsed));
    assert_eq!(selected.frames.len(), 1);
}

#[test]
fn test_handler_is_shareable() {
    let mut reporter = Reporter::new();
    reporter.pipeline_mut().without_colors();
    let handler = std::sync::Arc::new(reporter.handler());

    let worker = {
        let handler = std::sync::Arc::clone(&handler);
        std::thread::spawn(move || handler(ErrorInput::from("from a thread")))
    };

    assert_eq!(worker.join().unwrap(), "  Error: from a thread\n\n");
}

#[test]
fn test_write_tree_json() {
    let tree: RenderTree = Reporter::new().get_object(stack_error());
    let temp_file = NamedTempFile::new().unwrap();

    write_json(&tree, temp_file.path()).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_file.path()).unwrap()).unwrap();
    assert_eq!(written, tree.to_value());
}
