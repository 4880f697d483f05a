//! # attgo-lint-go
//!
//! Tree-sitter based Go front-end for attgo-lint.
//!
//! This crate is the host side of the engine in `attgo-lint-core`:
//!
//! - [`GoParser`] lowers one Go file into the core model
//! - [`load_packages`] discovers files and groups them into [`SourceUnit`]s
//! - [`module`] derives package import paths from `go.mod`
//! - [`known`] supplies types of well-known logger constructors
//! - [`suppress`] applies `//nolint` comments to finished diagnostics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod known;
pub mod module;
mod package;
mod parser;
pub mod suppress;

use std::path::PathBuf;

use attgo_lint_core::SourceUnit;
use thiserror::Error;

pub use package::{load_packages, LoadError, LoadOptions};
pub use parser::GoParser;

/// Errors from parsing a single Go file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The Go grammar could not be loaded.
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Tree-sitter produced no tree.
    #[error("failed to parse {}", .0.display())]
    NoTree(PathBuf),

    /// The file has no `package` clause.
    #[error("{}: missing package clause", .0.display())]
    MissingPackage(PathBuf),
}

/// Parses in-memory `(file name, source)` pairs into one unit.
///
/// Well-known logger constructors are resolved as [`load_packages`] does.
///
/// # Errors
///
/// Returns the first file that fails to parse.
pub fn parse_unit(package_path: &str, files: &[(&str, &str)]) -> Result<SourceUnit, ParseError> {
    let parser = GoParser::new();
    let mut unit = SourceUnit::new(package_path);
    for (name, source) in files {
        unit.files
            .push(parser.parse_file(std::path::Path::new(name), source)?);
    }
    known::resolve(&mut unit);
    Ok(unit)
}
