//! Helpers for rule unit tests.

use attgo_lint_core::{
    Diagnostic, DeclarationIndex, Rule, SourceUnit, UnitContext, UnitResolver,
};

/// Year rules see in tests.
pub(crate) const TEST_YEAR: i32 = 2026;

/// Parses `source` as `example.com/app/svc` and runs `rule` over it.
pub(crate) fn check(rule: &dyn Rule, source: &str) -> Vec<Diagnostic> {
    check_unit(rule, &[("svc.go", source)], |unit| unit)
}

/// Parses several files into one unit, lets the caller adjust it, then runs
/// `rule`.
pub(crate) fn check_unit(
    rule: &dyn Rule,
    files: &[(&str, &str)],
    adjust: impl FnOnce(SourceUnit) -> SourceUnit,
) -> Vec<Diagnostic> {
    let unit = attgo_lint_go::parse_unit("example.com/app/svc", files).expect("parse Go source");
    let unit = adjust(unit);
    let index = DeclarationIndex::build(&unit);
    let resolver = UnitResolver::new(&unit, &index);
    let ctx = UnitContext::new(&unit, &index, &resolver, TEST_YEAR);
    rule.check(&ctx)
}
