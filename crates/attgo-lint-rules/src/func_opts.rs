//! Rule to suggest functional options for wide constructors.
//!
//! Applies to free functions named `New...` or `Create...` that return a
//! struct declared in the same package whose name ends with a service-like
//! suffix (`Service`, `Manager`, `Handler`, `Controller`, `Provider`,
//! `Client`, `Server`). Such a constructor is flagged when it takes more than
//! three parameters, not counting a leading `context.Context`.
//!
//! A variadic options parameter exempts the constructor:
//!
//! ```go
//! func NewPaymentService(opts ...Option) *PaymentService
//! func NewCache(size int, opts ...func(*Cache)) *CacheManager
//! ```

use attgo_lint_core::model::{FuncDecl, Param, TypeExpr};
use attgo_lint_core::{Diagnostic, Rule, Severity, Suggestion, UnitContext};
use std::collections::HashSet;

/// Rule code for func-opts.
pub const CODE: &str = "attgo_func_opts";

/// Rule name for func-opts.
pub const NAME: &str = "func-opts";

const SERVICE_SUFFIXES: &[&str] = &[
    "Service",
    "Manager",
    "Handler",
    "Controller",
    "Provider",
    "Client",
    "Server",
];

const CONSTRUCTOR_PREFIXES: &[&str] = &["New", "Create"];

/// Default maximum number of non-context parameters.
pub const DEFAULT_MAX_PARAMS: usize = 3;

/// Flags service constructors with many positional parameters.
#[derive(Debug, Clone)]
pub struct FuncOpts {
    /// Severity level.
    pub severity: Severity,
    /// Parameters allowed before the rule fires.
    pub max_params: usize,
}

impl Default for FuncOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl FuncOpts {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            max_params: DEFAULT_MAX_PARAMS,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the parameter limit.
    #[must_use]
    pub fn max_params(mut self, max_params: usize) -> Self {
        self.max_params = max_params;
        self
    }

    fn too_many_params(&self, func: &FuncDecl) -> bool {
        let mut count = 0;
        for param in &func.signature.params {
            if param.ty.is_qualified("context", "Context") {
                continue;
            }
            if is_options_param(param) {
                return false;
            }
            count += param.arity();
        }
        count > self.max_params
    }
}

fn is_options_param(param: &Param) -> bool {
    let TypeExpr::Variadic(elem) = &param.ty else {
        return false;
    };
    match elem.as_ref() {
        TypeExpr::Named {
            package: None,
            name,
            ..
        } => name.ends_with("Option") || name.ends_with("Opt"),
        TypeExpr::Func(_) => true,
        _ => false,
    }
}

/// Name of the first result written as `T` or `*T` with `T` unqualified.
fn returned_type(func: &FuncDecl) -> Option<&str> {
    func.signature.result_types().find_map(|ty| match ty {
        TypeExpr::Pointer(inner) => inner.local_name(),
        other => other.local_name(),
    })
}

impl Rule for FuncOpts {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests functional options for service constructors with many parameters"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        let services: HashSet<&str> = ctx
            .index
            .structs()
            .map(|entry| entry.name())
            .filter(|name| SERVICE_SUFFIXES.iter().any(|s| name.ends_with(s)))
            .collect();
        if services.is_empty() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for file in ctx.files() {
            for func in file.funcs.iter().filter(|f| f.receiver.is_none()) {
                let name = func.name.name.as_str();
                if !CONSTRUCTOR_PREFIXES.iter().any(|p| name.starts_with(p)) {
                    continue;
                }
                if !returned_type(func).is_some_and(|ty| services.contains(ty)) {
                    continue;
                }
                if !self.too_many_params(func) {
                    continue;
                }

                diagnostics.push(
                    self.diagnostic(
                        &file.path,
                        func.name.position,
                        format!(
                            "constructor \"{name}\" has many parameters; consider using functional options pattern"
                        ),
                    )
                    .with_suggestion(Suggestion::new(
                        "keep required dependencies positional and move the rest to `opts ...Option`",
                    )),
                );
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    fn run(source: &str) -> Vec<String> {
        check(&FuncOpts::new(), source)
            .into_iter()
            .map(|d| d.message)
            .collect()
    }

    #[test]
    fn flags_wide_service_constructor() {
        let messages = run(r#"package svc

type UserService struct{}

func NewUserService(db, cache, logger, metrics any) *UserService { return nil }
"#);
        assert_eq!(
            messages,
            vec!["constructor \"NewUserService\" has many parameters; consider using functional options pattern"]
        );
    }

    #[test]
    fn context_is_not_counted() {
        let messages = run(r#"package svc

import "context"

type OrderHandler struct{}

func NewOrderHandler(ctx context.Context, db, cache, logger any) *OrderHandler { return nil }

func CreateOrderHandler(ctx context.Context, db, cache, logger, validator any) (*OrderHandler, error) {
	return nil, nil
}
"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("CreateOrderHandler"));
    }

    #[test]
    fn options_exempt() {
        let messages = run(r#"package svc

type PaymentService struct{}

type Option func(*PaymentService)

func NewPaymentService(a, b, c, d int, opts ...Option) *PaymentService { return nil }

func NewPaymentServiceFn(a, b, c, d int, opts ...func(*PaymentService)) PaymentService {
	return PaymentService{}
}
"#);
        assert!(messages.is_empty());
    }

    #[test]
    fn non_service_and_non_constructor_pass() {
        let messages = run(r#"package svc

type Helper struct{}

type Server struct{}

func NewHelper(a, b, c, d any) *Helper { return nil }

func ProcessData(a, b, c, d, e any) *Server { return nil }

func (s *Server) NewServer(a, b, c, d any) *Server { return nil }
"#);
        assert!(messages.is_empty());
    }

    #[test]
    fn unnamed_params_count_once_each() {
        let messages = run(r#"package svc

type CacheManager struct{}

func NewCacheManager(int, string, bool, any) *CacheManager { return nil }
"#);
        assert_eq!(messages.len(), 1);
    }
}
