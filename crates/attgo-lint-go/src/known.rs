//! Result types of well-known logger constructors.
//!
//! The front-end has no type checker, so `var log = zap.NewNop()` would
//! otherwise have no type. For package-scope variables initialised by a call
//! into a popular logging library, the resolved type is recorded in
//! [`SourceUnit::resolved`], where it takes precedence over inference.

use attgo_lint_core::model::{SourceFile, ValueExpr, VarSpec};
use attgo_lint_core::SourceUnit;
use tracing::trace;

const ZEROLOG: &str = "github.com/rs/zerolog";
const ZAP: &str = "go.uber.org/zap";
const LOGRUS: &str = "github.com/sirupsen/logrus";

/// `(import path, function, result type)`.
const CONSTRUCTORS: &[(&str, &str, &str)] = &[
    (ZEROLOG, "New", "github.com/rs/zerolog.Logger"),
    (ZEROLOG, "Nop", "github.com/rs/zerolog.Logger"),
    (ZEROLOG, "Ctx", "*github.com/rs/zerolog.Logger"),
    (ZAP, "New", "*go.uber.org/zap.Logger"),
    (ZAP, "NewNop", "*go.uber.org/zap.Logger"),
    (ZAP, "NewProduction", "*go.uber.org/zap.Logger"),
    (ZAP, "NewDevelopment", "*go.uber.org/zap.Logger"),
    (ZAP, "NewExample", "*go.uber.org/zap.Logger"),
    (ZAP, "Must", "*go.uber.org/zap.Logger"),
    (ZAP, "L", "*go.uber.org/zap.Logger"),
    (ZAP, "S", "*go.uber.org/zap.SugaredLogger"),
    ("log/slog", "New", "*log/slog.Logger"),
    ("log/slog", "Default", "*log/slog.Logger"),
    ("log/slog", "With", "*log/slog.Logger"),
    ("log", "New", "*log.Logger"),
    ("log", "Default", "*log.Logger"),
    (LOGRUS, "New", "*github.com/sirupsen/logrus.Logger"),
    (LOGRUS, "StandardLogger", "*github.com/sirupsen/logrus.Logger"),
    (LOGRUS, "NewEntry", "*github.com/sirupsen/logrus.Entry"),
    (LOGRUS, "WithField", "*github.com/sirupsen/logrus.Entry"),
    (LOGRUS, "WithFields", "*github.com/sirupsen/logrus.Entry"),
    (LOGRUS, "WithError", "*github.com/sirupsen/logrus.Entry"),
];

/// `(import path, final method of a call chain, result type)`.
const CHAIN_ENDS: &[(&str, &str, &str)] = &[
    (ZEROLOG, "Logger", "github.com/rs/zerolog.Logger"),
    (ZEROLOG, "Level", "github.com/rs/zerolog.Logger"),
    (ZAP, "Sugar", "*go.uber.org/zap.SugaredLogger"),
    (ZAP, "Named", "*go.uber.org/zap.Logger"),
    (ZAP, "Desugar", "*go.uber.org/zap.Logger"),
    ("log/slog", "WithGroup", "*log/slog.Logger"),
];

/// Result type of calling `callee` from `file`, if it is a known constructor
/// or a known call chain.
#[must_use]
pub fn call_result(file: &SourceFile, callee: &str) -> Option<&'static str> {
    let (qualifier, rest) = callee.split_once('.')?;
    let path = file.import_path(qualifier)?;

    if !rest.contains('(') {
        return CONSTRUCTORS
            .iter()
            .find(|(p, func, _)| *p == path && *func == rest)
            .map(|(_, _, ty)| *ty);
    }

    let last = rest.rsplit('.').next()?;
    CHAIN_ENDS
        .iter()
        .find(|(p, method, _)| *p == path && *method == last)
        .map(|(_, _, ty)| *ty)
}

fn spec_results<'f>(
    file: &'f SourceFile,
    spec: &'f VarSpec,
) -> impl Iterator<Item = (&'f str, &'static str)> + 'f {
    spec.names.iter().enumerate().filter_map(move |(i, name)| {
        if spec.ty.is_some() || name.is_blank() {
            return None;
        }
        // A single call assigned to several names only types the first one.
        let value = match spec.values.as_slice() {
            [single] if i == 0 => single,
            values if values.len() == spec.names.len() => &values[i],
            _ => return None,
        };
        let ValueExpr::Call(callee) = value else {
            return None;
        };
        call_result(file, callee).map(|ty| (name.name.as_str(), ty))
    })
}

/// Records known constructor results for the unit's package variables.
///
/// Entries already present in `resolved` are kept.
pub fn resolve(unit: &mut SourceUnit) {
    let found: Vec<(String, &'static str)> = unit
        .files
        .iter()
        .flat_map(|file| file.package_vars().flat_map(move |spec| spec_results(file, spec)))
        .map(|(name, ty)| (name.to_string(), ty))
        .collect();

    for (name, ty) in found {
        trace!(%name, ty, "known constructor");
        unit.resolved.entry(name).or_insert_with(|| ty.to_string());
    }
}
