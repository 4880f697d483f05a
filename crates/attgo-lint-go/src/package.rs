//! Package discovery: Go files on disk grouped into source units.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use attgo_lint_core::model::SourceFile;
use attgo_lint_core::{AnalyzerConfig, SourceUnit};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{known, module, GoParser};

/// Errors from discovering packages.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Directory traversal failed.
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        /// Root being walked.
        root: PathBuf,
        /// Underlying error.
        source: ignore::Error,
    },

    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern as written.
        pattern: String,
        /// Underlying error.
        source: glob::PatternError,
    },
}

/// Which files to load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Glob patterns, relative to the root, of paths to skip.
    pub exclude: Vec<String>,
    /// Whether `_test.go` files are loaded.
    pub include_tests: bool,
    /// Whether `.gitignore` rules are honoured.
    pub respect_gitignore: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&AnalyzerConfig::default())
    }
}

impl From<&AnalyzerConfig> for LoadOptions {
    fn from(config: &AnalyzerConfig) -> Self {
        Self {
            exclude: config.exclude.clone(),
            include_tests: config.include_tests,
            respect_gitignore: config.respect_gitignore,
        }
    }
}

/// Loads every Go package under `root` (or the single file `root`).
///
/// Files are grouped by directory and package clause. A file that cannot be
/// read or parsed is logged and skipped.
///
/// # Errors
///
/// Fails on an invalid exclude pattern or when the root cannot be walked.
pub fn load_packages(root: &Path, options: &LoadOptions) -> Result<Vec<SourceUnit>, LoadError> {
    let files = discover_files(root, options)?;
    info!(files = files.len(), root = %root.display(), "discovered Go files");

    let parser = GoParser::new();
    let parsed: Vec<SourceFile> = files
        .par_iter()
        .filter_map(|path| {
            let source = match std::fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable file");
                    return None;
                }
            };
            match parser.parse_file(path, &source) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(error = %e, "skipping unparsable file");
                    None
                }
            }
        })
        .collect();

    let mut groups: BTreeMap<(PathBuf, String), Vec<SourceFile>> = BTreeMap::new();
    for file in parsed {
        let dir = file
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        groups
            .entry((dir, file.package.name.clone()))
            .or_default()
            .push(file);
    }

    let units: Vec<SourceUnit> = groups
        .into_iter()
        .map(|((dir, name), mut files)| {
            files.sort_by(|a, b| a.path.cmp(&b.path));
            let mut unit = SourceUnit::new(module::package_path(&absolute(&dir), &name));
            unit.files = files;
            known::resolve(&mut unit);
            debug!(package = %unit.package_path, files = unit.files.len(), "loaded package");
            unit
        })
        .collect();
    Ok(units)
}

fn absolute(dir: &Path) -> PathBuf {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

fn discover_files(root: &Path, options: &LoadOptions) -> Result<Vec<PathBuf>, LoadError> {
    let excludes = options
        .exclude
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern).map_err(|source| LoadError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .filter_entry(|entry| {
            // The go tool ignores entries starting with `.` or `_`.
            let name = entry.file_name().to_string_lossy();
            entry.depth() == 0 || !(name.starts_with('.') || name.starts_with('_'))
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|source| LoadError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }

        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if !options.include_tests && name.ends_with("_test.go") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if excludes.iter().any(|p| p.matches_path(relative)) {
            debug!(file = %path.display(), "excluded");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
