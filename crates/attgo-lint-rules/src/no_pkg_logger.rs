//! Rule to forbid package-level logger variables.
//!
//! # Rationale
//!
//! Loggers held in package variables are global state: they cannot be
//! replaced per instance, are awkward to mock in tests and hide ownership of
//! logging configuration. Loggers belong in struct fields, injected through
//! the constructor.
//!
//! # Detected Patterns
//!
//! Any package-scope variable whose resolved type matches one of the
//! configured logger type patterns (see [`attgo_lint_core::pattern`]):
//!
//! ```go
//! var log zerolog.Logger
//! var (
//!     auditLog *zap.Logger
//! )
//! ```
//!
//! Struct fields and function-local variables of the same type are accepted.

use attgo_lint_core::{pattern, Diagnostic, Rule, Severity, Suggestion, UnitContext};

/// Rule code for no-pkg-logger.
pub const CODE: &str = "attgo_no_pkg_logger";

/// Rule name for no-pkg-logger.
pub const NAME: &str = "no-pkg-logger";

/// Flags package-level variables holding a logger.
#[derive(Debug, Clone)]
pub struct NoPkgLogger {
    /// Severity level.
    pub severity: Severity,
    /// Logger type patterns.
    pub patterns: Vec<String>,
}

impl Default for NoPkgLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl NoPkgLogger {
    /// Creates a new rule with the default logger patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            patterns: attgo_lint_core::DEFAULT_LOGGER_TYPE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the logger type patterns.
    #[must_use]
    pub fn patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }
}

impl Rule for NoPkgLogger {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids package-level logger variables; loggers should be struct fields"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for file in ctx.files() {
            for spec in file.package_vars() {
                for (i, name) in spec.names.iter().enumerate() {
                    if name.is_blank() {
                        continue;
                    }
                    let Some(ty) = ctx.resolver.var_type(file, spec, i) else {
                        continue;
                    };
                    if pattern::matches_any(&ty, &self.patterns).is_none() {
                        continue;
                    }

                    diagnostics.push(
                        self.diagnostic(
                            &file.path,
                            name.position,
                            format!(
                                "package-level logger \"{}\" detected; loggers should be struct fields for better dependency injection and testability",
                                name.name
                            ),
                        )
                        .with_suggestion(Suggestion::new(
                            "store the logger in a struct field and pass it in through the constructor",
                        )),
                    );
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, check_unit};

    #[test]
    fn flags_package_level_loggers() {
        let diagnostics = check(
            &NoPkgLogger::new(),
            r#"package svc

import "github.com/rs/zerolog"

var log zerolog.Logger

var (
	a, b *zerolog.Logger
	version = "1.0.0"
)
"#,
        );

        let names: Vec<_> = diagnostics.iter().map(|d| d.message.clone()).collect();
        assert_eq!(names.len(), 3);
        assert!(names[0].starts_with("package-level logger \"log\" detected"));
        assert!(names[2].contains("\"b\""));
        assert_eq!(diagnostics[0].location.line, 5);
        assert_eq!(diagnostics[0].location.column, 5);
    }

    #[test]
    fn ignores_fields_and_locals() {
        let diagnostics = check(
            &NoPkgLogger::new(),
            r#"package svc

import "go.uber.org/zap"

type Service struct {
	log *zap.Logger
}

func run() {
	var log *zap.Logger
	_ = log
}
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn resolves_initializers() {
        let diagnostics = check(
            &NoPkgLogger::new(),
            r#"package svc

import (
	"log/slog"

	"github.com/sirupsen/logrus"
)

var std = &slog.Logger{}

var entry = newEntry()

func newEntry() *logrus.Entry { return nil }
"#,
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn pointer_marker_must_agree() {
        let rule = NoPkgLogger::new().patterns(vec!["*zerolog.Logger".to_string()]);
        let diagnostics = check(
            &rule,
            r#"package svc

import "github.com/rs/zerolog"

var byValue zerolog.Logger
var byPointer *zerolog.Logger
"#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("byPointer"));
    }

    #[test]
    fn aliased_import_is_resolved() {
        let diagnostics = check(
            &NoPkgLogger::new(),
            r#"package svc

import zl "github.com/rs/zerolog"

var logger zl.Logger
var _ zl.Logger
"#,
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn substring_collisions_are_not_loggers() {
        let diagnostics = check(
            &NoPkgLogger::new(),
            r#"package svc

import "example.com/mylog"

var catalog mylog.Logger
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn host_resolved_types_are_used() {
        let diagnostics = check_unit(
            &NoPkgLogger::new(),
            &[(
                "svc.go",
                "package svc\n\nimport \"go.uber.org/zap\"\n\nvar log = zap.Must(build())\n",
            )],
            |unit| unit.with_resolved("log", "*go.uber.org/zap.Logger"),
        );
        assert_eq!(diagnostics.len(), 1);
    }
}
