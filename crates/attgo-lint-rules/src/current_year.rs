//! Rule to keep copyright headers on the current year.
//!
//! Reads the first comment group above the `package` clause of each file and
//! looks for a year after the word "copyright":
//!
//! ```go
//! // Copyright © 2024 Example Ltd.       flagged in 2026
//! // Copyright (c) 2019-2026 Example Ltd. accepted in 2026
//! ```
//!
//! For a range, the second year is compared. Files without a recognisable
//! header are accepted.

use attgo_lint_core::{Diagnostic, Rule, Severity, UnitContext};
use once_cell::sync::Lazy;
use regex::Regex;

/// Rule code for current-year.
pub const CODE: &str = "attgo_current_year";

/// Rule name for current-year.
pub const NAME: &str = "current-year";

#[allow(clippy::expect_used)]
static COPYRIGHT_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)copyright\s*(?:©|\(c\))?\s*(?:[0-9]{4}\s*-\s*)?([0-9]{4})")
        .expect("copyright pattern is valid")
});

/// Extracts the (last) copyright year from header text.
#[must_use]
pub fn copyright_year(text: &str) -> Option<i32> {
    COPYRIGHT_YEAR
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Flags copyright headers that predate the current year.
#[derive(Debug, Clone)]
pub struct CurrentYear {
    /// Severity level.
    pub severity: Severity,
}

impl Default for CurrentYear {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrentYear {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for CurrentYear {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the current year in copyright headers"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        ctx.files()
            .filter_map(|file| {
                let header = file.header_comment()?;
                let year = copyright_year(&header.text())?;
                (year < ctx.current_year).then(|| {
                    self.diagnostic(
                        &file.path,
                        header.position,
                        format!(
                            "copyright year {year} is outdated; should be {} for new or modified files",
                            ctx.current_year
                        ),
                    )
                })
            })
            .collect()
    }
}
