//! Rule to suggest compile-time interface compliance assertions.
//!
//! When a struct declared in a package satisfies a non-empty interface
//! declared in the same package, an assertion of the form
//!
//! ```go
//! var _ Reader = (*FileReader)(nil)
//! ```
//!
//! turns a later missing method into a compile error at the declaration
//! instead of at some distant use site.
//!
//! Existing assertions are recognised syntactically by the interface and type
//! *names* they mention, not by resolved identity. An assertion naming a
//! same-named type from another package therefore suppresses the suggestion
//! too.

use attgo_lint_core::model::{SourceUnit, TypeExpr, ValueExpr, VarSpec};
use attgo_lint_core::{Diagnostic, Rule, Severity, Suggestion, UnitContext};
use std::collections::HashSet;

/// Rule code for interface-check.
pub const CODE: &str = "attgo_interface_check";

/// Rule name for interface-check.
pub const NAME: &str = "interface-check";

/// Suggests `var _ I = (*S)(nil)` for structs implementing local interfaces.
#[derive(Debug, Clone)]
pub struct InterfaceCheck {
    /// Severity level.
    pub severity: Severity,
}

impl Default for InterfaceCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceCheck {
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

/// Collects `(interface, type)` name pairs from `var _ I = (*T)(nil)` specs.
fn existing_assertions(unit: &SourceUnit) -> HashSet<(&str, &str)> {
    unit.files
        .iter()
        .flat_map(|file| file.package_vars())
        .filter_map(assertion_pair)
        .collect()
}

fn assertion_pair(spec: &VarSpec) -> Option<(&str, &str)> {
    let [name] = spec.names.as_slice() else {
        return None;
    };
    if !name.is_blank() {
        return None;
    }
    let interface = match spec.ty.as_ref()? {
        TypeExpr::Named { name, .. } => name.as_str(),
        _ => return None,
    };
    let [ValueExpr::NilCast(TypeExpr::Pointer(target))] = spec.values.as_slice() else {
        return None;
    };
    let TypeExpr::Named { name: target, .. } = target.as_ref() else {
        return None;
    };
    Some((interface, target.as_str()))
}

impl Rule for InterfaceCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests compile-time interface compliance checks for implementing structs"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        let interfaces: Vec<&str> = ctx
            .index
            .interfaces()
            .filter(|entry| !entry.decl.generic)
            .map(|entry| entry.name())
            .filter(|name| {
                ctx.resolver
                    .interface_methods(name)
                    .is_some_and(|methods| !methods.is_empty())
            })
            .collect();
        if interfaces.is_empty() {
            return Vec::new();
        }

        let existing = existing_assertions(ctx.unit);
        let mut diagnostics = Vec::new();

        for entry in ctx.index.structs().filter(|entry| !entry.decl.generic) {
            let name = entry.name();
            if ctx.resolver.method_set(name, true).is_empty() {
                continue;
            }

            for &interface in &interfaces {
                if existing.contains(&(interface, name)) {
                    continue;
                }
                if !ctx.resolver.satisfies(name, false, interface)
                    && !ctx.resolver.satisfies(name, true, interface)
                {
                    continue;
                }

                let assertion = format!("var _ {interface} = (*{name})(nil)");
                diagnostics.push(
                    self.diagnostic(
                        &entry.file.path,
                        entry.decl.name.position,
                        format!(
                            "struct \"{name}\" implements interface \"{interface}\"; consider adding: {assertion}"
                        ),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "add `{assertion}` next to the type declaration"
                    ))),
                );
            }
        }
        diagnostics
    }
}
