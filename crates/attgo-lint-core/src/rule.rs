//! The rule trait.

use crate::context::UnitContext;
use crate::types::{Diagnostic, Location, Severity};
use crate::model::Position;
use std::path::Path;

/// A house-style rule evaluated over one source unit.
///
/// Rules are stateless between units: everything they need comes from the
/// [`UnitContext`], which is shared read-only across all rules of a pass.
///
/// # Example
///
/// ```ignore
/// use attgo_lint_core::{Diagnostic, Rule, UnitContext};
///
/// pub struct NoInitFuncs;
///
/// impl Rule for NoInitFuncs {
///     fn name(&self) -> &'static str { "no-init" }
///     fn code(&self) -> &'static str { "attgo_no_init" }
///
///     fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
///         ctx.files()
///             .flat_map(|file| file.funcs.iter().map(move |f| (file, f)))
///             .filter(|(_, f)| f.receiver.is_none() && f.name.name == "init")
///             .map(|(file, f)| self.diagnostic(&file.path, f.name.position, "init function".to_string()))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "raw-string").
    fn name(&self) -> &'static str;

    /// Returns the stable identifier (e.g., "attgo_raw_string").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks one unit and returns any diagnostics found.
    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic>;

    /// Builds a diagnostic from this rule at `position` in `file`.
    fn diagnostic(&self, file: &Path, position: Position, message: String) -> Diagnostic {
        Diagnostic::new(
            self.code(),
            self.name(),
            self.default_severity(),
            Location::at(file, position),
            message,
        )
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
