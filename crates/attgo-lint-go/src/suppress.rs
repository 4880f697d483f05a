//! `//nolint` suppression.
//!
//! A `//nolint` comment silences every rule; `//nolint:a,b` silences the
//! listed rules, named by identifier (`attgo_raw_string`), by name
//! (`raw-string`), or as the whole `attgo` namespace. The directive applies
//! to diagnostics on its own line and on the line directly below it.

use std::collections::HashMap;
use std::path::PathBuf;

use attgo_lint_core::model::Comment;
use attgo_lint_core::{Diagnostic, LintResult, SourceUnit};
use tracing::debug;

/// What a directive silences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Every rule.
    All,
    /// Only the listed rule keys.
    Rules(Vec<String>),
}

impl Directive {
    /// Parses a comment, returning `None` when it is not a directive.
    #[must_use]
    pub fn parse(comment: &Comment) -> Option<Self> {
        let text = comment.raw.strip_prefix("//")?.trim_start();
        let rest = text.strip_prefix("nolint")?;
        let Some(list) = rest.strip_prefix(':') else {
            return (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(Self::All);
        };
        let list = list.split_whitespace().next().unwrap_or_default();
        let keys: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
        if keys.iter().any(|k| k == "all") {
            Some(Self::All)
        } else {
            Some(Self::Rules(keys))
        }
    }

    /// Whether this directive silences `diagnostic`.
    #[must_use]
    pub fn covers(&self, diagnostic: &Diagnostic) -> bool {
        match self {
            Self::All => true,
            Self::Rules(keys) => keys.iter().any(|key| {
                key == &diagnostic.code
                    || key == &diagnostic.rule
                    || diagnostic
                        .code
                        .split_once('_')
                        .is_some_and(|(namespace, _)| namespace == key)
            }),
        }
    }
}

/// Directives by file and line.
#[derive(Debug, Default)]
pub struct Suppressions {
    by_line: HashMap<(PathBuf, usize), Vec<Directive>>,
}

impl Suppressions {
    /// Collects the directives of every file in `units`.
    #[must_use]
    pub fn collect(units: &[SourceUnit]) -> Self {
        let mut by_line: HashMap<(PathBuf, usize), Vec<Directive>> = HashMap::new();
        for file in units.iter().flat_map(|u| &u.files) {
            for comment in file.comments.iter().flat_map(|g| &g.comments) {
                if let Some(directive) = Directive::parse(comment) {
                    by_line
                        .entry((file.path.clone(), comment.position.line))
                        .or_default()
                        .push(directive);
                }
            }
        }
        Self { by_line }
    }

    /// Whether no directive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Whether a directive on the diagnostic's line or the line above covers it.
    #[must_use]
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        let line = diagnostic.location.line;
        [Some(line), line.checked_sub(1)]
            .into_iter()
            .flatten()
            .filter_map(|l| self.by_line.get(&(diagnostic.location.file.clone(), l)))
            .flatten()
            .any(|directive| directive.covers(diagnostic))
    }
}

/// Removes suppressed diagnostics from `result`, returning how many were removed.
pub fn apply(units: &[SourceUnit], result: &mut LintResult) -> usize {
    let suppressions = Suppressions::collect(units);
    if suppressions.is_empty() {
        return 0;
    }
    let removed = result.retain(|d| !suppressions.is_suppressed(d));
    debug!(removed, "applied nolint directives");
    removed
}
