//! # attgo-lint-core
//!
//! Core engine for house-style linting of Go packages.
//!
//! This crate knows nothing about parsing or files on disk. A host lowers each
//! Go package into a [`SourceUnit`]; the engine then provides:
//!
//! - [`DeclarationIndex`] and [`TypeResolver`] for cross-referencing
//!   declarations against type facts
//! - [`pattern`] for matching resolved type names against configured patterns
//! - [`Rule`] trait for independent, stateless checks
//! - [`Analyzer`] for running a rule set over units in parallel
//! - [`Diagnostic`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use attgo_lint_core::{Analyzer, SourceUnit};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = analyzer.analyze(&units);
//! for diagnostic in &result.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod index;
pub mod model;
pub mod pattern;
mod resolver;
mod rule;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use config::{
    AnalyzerConfig, Config, ConfigError, RuleConfig, Settings, SettingsOverride,
    DEFAULT_ENUM_TYPE_SUFFIXES, DEFAULT_LOGGER_TYPE_PATTERNS,
};
pub use context::UnitContext;
pub use index::{DeclarationIndex, FuncEntry, TypeEntry};
pub use model::{SourceFile, SourceUnit};
pub use resolver::{ResolvedMethod, TypeResolver, Underlying, UnitResolver};
pub use rule::{Rule, RuleBox};
pub use types::{Diagnostic, DiagnosticReport, LintResult, Location, Severity, Suggestion};
