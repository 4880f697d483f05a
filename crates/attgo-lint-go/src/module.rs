//! Go module discovery.
//!
//! A package's import path is the `module` path from the nearest `go.mod`
//! above it, joined with the package directory relative to that file.

use std::path::{Path, PathBuf};

use tracing::debug;

/// A Go module rooted at the directory holding its `go.mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Directory containing `go.mod`.
    pub root: PathBuf,
    /// Module path from the `module` directive.
    pub path: String,
}

impl Module {
    /// Finds the module enclosing `dir`, searching upward.
    #[must_use]
    pub fn find(dir: &Path) -> Option<Self> {
        dir.ancestors().find_map(|candidate| {
            let content = std::fs::read_to_string(candidate.join("go.mod")).ok()?;
            let path = parse_module_path(&content)?;
            debug!(root = %candidate.display(), %path, "found go.mod");
            Some(Self {
                root: candidate.to_path_buf(),
                path,
            })
        })
    }

    /// Import path of the package in `dir`, or `None` when `dir` lies outside
    /// the module.
    #[must_use]
    pub fn package_path(&self, dir: &Path) -> Option<String> {
        let relative = dir.strip_prefix(&self.root).ok()?;
        let elements: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if elements.is_empty() {
            Some(self.path.clone())
        } else {
            Some(format!("{}/{}", self.path, elements.join("/")))
        }
    }
}

/// Extracts the module path from `go.mod` content.
#[must_use]
pub fn parse_module_path(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or(line).trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Import path for a package `name` in `dir`.
///
/// Falls back to the package name when no module encloses `dir`. External
/// test packages (`foo_test`) get a `_test` suffix so they never share a
/// path with the package under test.
#[must_use]
pub fn package_path(dir: &Path, name: &str) -> String {
    let base = Module::find(dir)
        .and_then(|module| module.package_path(dir))
        .unwrap_or_else(|| name.to_string());
    if name.ends_with("_test") && !base.ends_with("_test") {
        format!("{base}_test")
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_directive() {
        assert_eq!(
            parse_module_path("// header\nmodule github.com/acme/app // main\n\ngo 1.22\n"),
            Some("github.com/acme/app".to_string())
        );
        assert_eq!(
            parse_module_path("module \"example.com/quoted\"\n"),
            Some("example.com/quoted".to_string())
        );
        assert_eq!(parse_module_path("modules are fun\ngo 1.22\n"), None);
        assert_eq!(parse_module_path("module\n"), None);
    }

    #[test]
    fn package_paths_from_go_mod() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("go.mod"), "module example.com/app\n").expect("write");
        let nested = dir.path().join("internal").join("store");
        std::fs::create_dir_all(&nested).expect("mkdir");

        assert_eq!(package_path(dir.path(), "app"), "example.com/app");
        assert_eq!(package_path(&nested, "store"), "example.com/app/internal/store");
        assert_eq!(
            package_path(&nested, "store_test"),
            "example.com/app/internal/store_test"
        );
    }

    #[test]
    fn falls_back_to_package_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(package_path(dir.path(), "loose"), "loose");
    }
}
