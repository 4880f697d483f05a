//! Rule to prefer integer `iota` enums over string-valued enums.
//!
//! A type is treated as an enum when its name ends with one of the configured
//! suffixes (`Type`, `Status`, `State`, `Kind`, `Mode` by default). Constants
//! of such a type are flagged when the type is string-based and the constant
//! is assigned a string literal.
//!
//! ```go
//! type SANType string
//!
//! const SANTypeDNS SANType = "dns" // flagged
//!
//! type Priority uint64
//!
//! const PriorityLow Priority = 10 // accepted
//! ```
//!
//! Types that do not carry an enum suffix are never inspected, and neither
//! are aliases (`type Mode = string`), which name no type of their own.

use attgo_lint_core::{Diagnostic, Rule, Severity, Suggestion, UnitContext, Underlying};
use std::collections::HashSet;
use tracing::trace;

/// Rule code for enum-iota.
pub const CODE: &str = "attgo_enum_iota";

/// Rule name for enum-iota.
pub const NAME: &str = "enum-iota";

/// Flags string-valued constants of enum-named types.
#[derive(Debug, Clone)]
pub struct EnumIota {
    /// Severity level.
    pub severity: Severity,
    /// Type-name suffixes marking enum types.
    pub suffixes: Vec<String>,
}

impl Default for EnumIota {
    fn default() -> Self {
        Self::new()
    }
}

impl EnumIota {
    /// Creates a new rule with the default suffixes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            suffixes: attgo_lint_core::DEFAULT_ENUM_TYPE_SUFFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the enum suffixes.
    #[must_use]
    pub fn suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    fn has_enum_suffix(&self, name: &str) -> bool {
        self.suffixes
            .iter()
            .any(|s| !s.is_empty() && name.ends_with(s.as_str()))
    }
}

impl Rule for EnumIota {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers uint64 iota enums over string-valued enum constants"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        let candidates: HashSet<&str> = ctx
            .index
            .types()
            .iter()
            .filter(|entry| !entry.decl.alias)
            .map(|entry| entry.name())
            .filter(|name| self.has_enum_suffix(name))
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }
        trace!(?candidates, "enum candidates");

        let mut diagnostics = Vec::new();
        for file in ctx.files() {
            for group in &file.consts {
                for (i, spec) in group.specs.iter().enumerate() {
                    let Some(type_name) = ctx
                        .resolver
                        .const_type(group, i)
                        .and_then(|ty| ty.local_name())
                    else {
                        continue;
                    };
                    if !candidates.contains(type_name)
                        || ctx.resolver.underlying(type_name) != Some(Underlying::Text)
                        || !spec.values.iter().any(|v| v.is_text_literal())
                    {
                        continue;
                    }
                    let Some(first) = spec.names.first() else {
                        continue;
                    };

                    diagnostics.push(
                        self.diagnostic(
                            &file.path,
                            spec.position,
                            format!(
                                "enum constant \"{}\" uses string value; consider using uint64 with iota pattern instead",
                                first.name
                            ),
                        )
                        .with_suggestion(Suggestion::new(format!(
                            "declare `type {type_name} uint64` and assign constants with iota"
                        ))),
                    );
                }
            }
        }
        diagnostics
    }
}
