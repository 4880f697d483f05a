//! Rule to enforce a conventional struct field layout.
//!
//! Fields are grouped, in order, as logger, metrics, dependencies, plain data
//! and synchronization:
//!
//! ```go
//! type Service struct {
//!     log     zerolog.Logger
//!     metrics *prometheus.Registry
//!     client  *http.Client
//!     config  Config
//!     mu      sync.Mutex
//!     done    chan struct{}
//! }
//! ```
//!
//! Each named field is compared with the previous named field; a field whose
//! category ranks before its predecessor's is reported. Embedded fields are
//! skipped.

use attgo_lint_core::model::{StructField, TypeBody, TypeExpr};
use attgo_lint_core::{Diagnostic, Rule, Severity, UnitContext};
use std::fmt;

/// Rule code for struct-field-order.
pub const CODE: &str = "attgo_struct_field_order";

/// Rule name for struct-field-order.
pub const NAME: &str = "struct-field-order";

const SYNC_TYPES: &[&str] = &["Mutex", "RWMutex", "WaitGroup", "Once", "Cond", "Pool", "Map"];

/// Field category, in required order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldCategory {
    /// Loggers.
    Logger,
    /// Metrics and monitors.
    Metrics,
    /// Clients, services, stores and similar collaborators.
    Dependency,
    /// Everything else.
    Data,
    /// Mutexes, wait groups, channels.
    Synchronization,
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logger => "logger",
            Self::Metrics => "metrics",
            Self::Dependency => "dependency",
            Self::Data => "data",
            Self::Synchronization => "synchronization",
        })
    }
}

impl FieldCategory {
    /// Classifies a field by its type, then by its name.
    #[must_use]
    pub fn of(name: &str, ty: &TypeExpr) -> Self {
        if is_sync_type(ty) || matches!(ty, TypeExpr::Chan(..)) {
            return Self::Synchronization;
        }

        let name = name.to_lowercase();
        let is = |candidates: &[&str]| candidates.contains(&name.as_str());
        let ends = |suffixes: &[&str]| suffixes.iter().any(|s| name.ends_with(s));

        if ends(&["log", "logger"]) {
            Self::Logger
        } else if is(&["metrics", "monitor"]) || ends(&["metrics"]) {
            Self::Metrics
        } else if is(&["wg"]) || ends(&["mu", "lock", "mutex"]) {
            Self::Synchronization
        } else if is(&["db", "database", "store", "cache", "repo", "repository"])
            || ends(&["client", "service", "provider", "handler"])
        {
            Self::Dependency
        } else {
            Self::Data
        }
    }
}

fn is_sync_type(ty: &TypeExpr) -> bool {
    let ty = match ty {
        TypeExpr::Pointer(inner) => inner.as_ref(),
        other => other,
    };
    SYNC_TYPES.iter().any(|name| ty.is_qualified("sync", name))
}

/// Flags struct fields declared out of category order.
#[derive(Debug, Clone)]
pub struct StructFieldOrder {
    /// Severity level.
    pub severity: Severity,
}

impl Default for StructFieldOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructFieldOrder {
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

impl Rule for StructFieldOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Orders struct fields as logger, metrics, dependencies, data, synchronization"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for file in ctx.files() {
            for decl in &file.types {
                let TypeBody::Struct(fields) = &decl.body else {
                    continue;
                };

                let mut previous: Option<(&str, FieldCategory)> = None;
                for field in fields {
                    let StructField {
                        name: Some(name),
                        ty,
                        ..
                    } = field
                    else {
                        continue;
                    };
                    let category = FieldCategory::of(&name.name, ty);

                    if let Some((prev_name, prev_category)) = previous {
                        if category < prev_category {
                            diagnostics.push(self.diagnostic(
                                &file.path,
                                name.position,
                                format!(
                                    "field \"{}\" ({category}) should come before \"{prev_name}\" ({prev_category}) in struct \"{}\"",
                                    name.name, decl.name.name
                                ),
                            ));
                        }
                    }
                    previous = Some((name.name.as_str(), category));
                }
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn classifies_by_name() {
        let any = TypeExpr::named("any");
        assert_eq!(FieldCategory::of("auditLog", &any), FieldCategory::Logger);
        assert_eq!(FieldCategory::of("requestMetrics", &any), FieldCategory::Metrics);
        assert_eq!(FieldCategory::of("monitor", &any), FieldCategory::Metrics);
        assert_eq!(FieldCategory::of("stateMu", &any), FieldCategory::Synchronization);
        assert_eq!(FieldCategory::of("httpClient", &any), FieldCategory::Dependency);
        assert_eq!(FieldCategory::of("repo", &any), FieldCategory::Dependency);
        assert_eq!(FieldCategory::of("name", &any), FieldCategory::Data);
    }

    #[test]
    fn sync_types_win_over_names() {
        let mutex = TypeExpr::qualified("sync", "RWMutex");
        assert_eq!(FieldCategory::of("log", &mutex), FieldCategory::Synchronization);

        let chan = TypeExpr::Chan(
            attgo_lint_core::model::ChanDir::Both,
            Box::new(TypeExpr::named("int")),
        );
        assert_eq!(FieldCategory::of("client", &chan), FieldCategory::Synchronization);

        let once = TypeExpr::qualified("sync", "Once").pointer();
        assert_eq!(FieldCategory::of("init", &once), FieldCategory::Synchronization);
    }

    #[test]
    fn ordered_struct_is_clean() {
        let diagnostics = check(
            &StructFieldOrder::new(),
            r#"package svc

import "sync"

type Service struct {
	log     any
	metrics any
	client  any
	db      any
	config  any
	name    string
	mu      sync.Mutex
	done    chan struct{}
}
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn compares_with_previous_field() {
        let diagnostics = check(
            &StructFieldOrder::new(),
            r#"package svc

import "sync"

type BadService struct {
	mu      sync.Mutex
	log     any
	config  any
	metrics any
}
"#,
        );
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "field \"log\" (logger) should come before \"mu\" (synchronization) in struct \"BadService\"",
                "field \"metrics\" (metrics) should come before \"config\" (data) in struct \"BadService\"",
            ]
        );
        assert_eq!(diagnostics[0].location.line, 7);
    }

    #[test]
    fn grouped_names_and_embedded_fields() {
        let diagnostics = check(
            &StructFieldOrder::new(),
            r#"package svc

type Mixed struct {
	*Base
	name, log string
}
"#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("field \"log\" (logger)"));
    }
}
