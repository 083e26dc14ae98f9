//! Package attribution for module paths.
//!
//! Collapses every dependency directory a path passes through into a
//! bracketed package name, so that
//! `/home/me/app/node_modules/foo/node_modules/bar/lib/x.js`
//! reads as `[app]/[foo]/[bar]/lib/x.js`.

use crate::utils::config::DEPENDENCY_DIR;
use log::debug;

/// Result of collapsing a module path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenedPath {
    /// Path with each dependency boundary replaced by `[name]`
    pub path: String,

    /// Label of the project holding the outermost dependency directory
    pub project: Option<String>,

    /// Dependency names crossed by the path, outermost first
    ///
    /// The project label is not a dependency and is never listed here.
    pub packages: Vec<String>,
}

/// Collapse the dependency directories of a module path
///
/// # Arguments
/// * `module_path` - Normalized (`/`-separated) module path
/// * `current_package` - Name for the project that contains the outermost
///   dependency directory. When `None`, the last directory before that
///   dependency directory is used.
///
/// # Returns
/// The shortened path, the project label and the provenance chain.
/// Paths without a dependency directory come back unchanged with no
/// project and no packages.
///
/// # Algorithm
/// 1. Split at the first dependency directory into project and rest
/// 2. Emit the project label
/// 3. While the rest crosses another dependency directory, emit the
///    segment right before it and continue after it
/// 4. Emit the first remaining segment as the innermost package and
///    keep the rest as the leaf path
pub fn shorten_path(module_path: &str, current_package: Option<&str>) -> ShortenedPath {
    let segments: Vec<&str> = module_path.split('/').collect();

    let has_prefix = |idx: &usize| segments[..*idx].iter().any(|s| !s.is_empty());
    let Some(boundary) = find_boundary(&segments, 1).filter(has_prefix) else {
        return ShortenedPath {
            path: module_path.to_string(),
            project: None,
            packages: Vec::new(),
        };
    };

    let mut packages: Vec<String> = Vec::new();

    let project = current_package
        .filter(|name| !name.is_empty())
        .or_else(|| segments[..boundary].iter().rev().copied().find(|s| !s.is_empty()))
        .map(str::to_string);

    let mut rest = &segments[boundary + 1..];
    while let Some(inner) = find_boundary(rest, 1).filter(|idx| !rest[idx - 1].is_empty()) {
        packages.push(rest[inner - 1].to_string());
        rest = &rest[inner + 1..];
    }

    if rest.len() > 1 && !rest[0].is_empty() {
        packages.push(rest[0].to_string());
        rest = &rest[1..];
    }

    let mut parts: Vec<String> = project
        .iter()
        .chain(packages.iter())
        .map(|name| format!("[{}]", name))
        .collect();
    parts.push(rest.join("/"));

    debug!("Shortened {} across {} package(s)", module_path, packages.len());

    ShortenedPath {
        path: parts.join("/"),
        project,
        packages,
    }
}

/// Index of the first dependency-directory segment at or after `from`
/// that has a non-empty path after it
fn find_boundary(segments: &[&str], from: usize) -> Option<usize> {
    (from..segments.len()).find(|&idx| {
        segments[idx] == DEPENDENCY_DIR && segments[idx + 1..].iter().any(|s| !s.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_dependencies_is_unchanged() {
        let shortened = shorten_path("/app/src/x.js", None);
        assert_eq!(shortened.path, "/app/src/x.js");
        assert_eq!(shortened.project, None);
        assert!(shortened.packages.is_empty());
    }

    #[test]
    fn test_single_dependency() {
        let shortened = shorten_path("/app/node_modules/lib/x.js", None);
        assert_eq!(shortened.path, "[app]/[lib]/x.js");
        assert_eq!(shortened.project.as_deref(), Some("app"));
        assert_eq!(shortened.packages, vec!["lib"]);
    }

    #[test]
    fn test_nested_dependencies_keep_order() {
        let shortened = shorten_path("/home/me/app/node_modules/foo/node_modules/bar/x.js", None);
        assert_eq!(shortened.path, "[app]/[foo]/[bar]/x.js");
        assert_eq!(shortened.project.as_deref(), Some("app"));
        assert_eq!(shortened.packages, vec!["foo", "bar"]);
    }

    #[test]
    fn test_leaf_keeps_subdirectories() {
        let shortened = shorten_path("/app/node_modules/lib/src/util/x.js", None);
        assert_eq!(shortened.path, "[app]/[lib]/src/util/x.js");
        assert_eq!(shortened.packages, vec!["lib"]);
    }

    #[test]
    fn test_current_package_override() {
        let shortened = shorten_path("/srv/build/node_modules/lib/x.js", Some("my-service"));
        assert_eq!(shortened.path, "[my-service]/[lib]/x.js");
        assert_eq!(shortened.project.as_deref(), Some("my-service"));
        assert_eq!(shortened.packages, vec!["lib"]);
    }

    #[test]
    fn test_bracket_count_matches_project_and_packages() {
        let samples = [
            "/a/node_modules/b/node_modules/c/node_modules/d/e/f.js",
            "/a/node_modules/b/index.js",
            "C:/work/app/node_modules/@scope/pkg/dist/x.js",
        ];
        for sample in samples {
            let shortened = shorten_path(sample, None);
            assert_eq!(
                shortened.path.matches('[').count(),
                shortened.packages.len() + usize::from(shortened.project.is_some()),
                "mismatch for {}",
                sample
            );
        }
    }

    #[test]
    fn test_relative_leading_dependency_dir_is_not_a_boundary() {
        let shortened = shorten_path("node_modules/lib/x.js", None);
        assert_eq!(shortened.path, "node_modules/lib/x.js");
        assert!(shortened.packages.is_empty());
    }
}
