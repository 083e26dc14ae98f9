//! Path normalization helpers.
//!
//! Stack text produced on different platforms mixes `\`, `\\` and `/`.
//! Everything downstream works on the single `/` form.

use std::path::Path;

/// Collapse every run of one or two backslashes into a single `/`
///
/// Longer runs are consumed two at a time, so `\\\` becomes `//`.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next_if_eq(&'\\');
            out.push('/');
        } else {
            out.push(c);
        }
    }

    out
}

/// Last component of a `/`-separated path
pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.trim_end_matches('/').to_string())
}

/// Directory part of a `/`-separated path
///
/// Returns an empty string when the path has no directory part.
pub fn dirname(path: &str) -> String {
    match Path::new(path).parent() {
        Some(parent) => {
            let dir = parent.to_string_lossy();
            if dir == "." {
                String::new()
            } else {
                dir.into_owned()
            }
        }
        None if path.starts_with('/') => "/".to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize(r"C:\app\lib\x.js"), "C:/app/lib/x.js");
        assert_eq!(normalize(r"C:\\app\\x.js"), "C:/app/x.js");
        assert_eq!(normalize("/already/fine.js"), "/already/fine.js");
    }

    #[test]
    fn test_normalize_long_runs() {
        assert_eq!(normalize(r"a\\\b"), "a//b");
        assert_eq!(normalize(r"a\\\\b"), "a//b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            r"C:\\projects\\app\\node_modules\\lib\\index.js:3:7",
            r"a\\\\\b",
            "plain",
            "",
            r"\",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_basename_and_dirname() {
        assert_eq!(basename("/app/lib/x.js"), "x.js");
        assert_eq!(dirname("/app/lib/x.js"), "/app/lib");
        assert_eq!(basename("x.js"), "x.js");
        assert_eq!(dirname("x.js"), "");
        assert_eq!(dirname("/x.js"), "/");
        assert_eq!(dirname("./x.js"), "");
    }
}
