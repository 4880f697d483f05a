//! Core analyzer for orchestrating rule execution.

use crate::config::Config;
use crate::context::UnitContext;
use crate::index::DeclarationIndex;
use crate::model::SourceUnit;
use crate::resolver::UnitResolver;
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, LintResult};

use chrono::Datelike;
use rayon::prelude::*;
use tracing::{debug, info};

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    current_year: Option<i32>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration used for severity overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the calendar year (defaults to the local current year).
    #[must_use]
    pub fn current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        Analyzer {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
            current_year: self
                .current_year
                .unwrap_or_else(|| chrono::Local::now().year()),
        }
    }
}

/// Runs a fixed rule set over source units.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
    current_year: i32,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Calendar year used by date-sensitive rules.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Analyzes units in parallel and returns the merged, sorted result.
    #[must_use]
    pub fn analyze(&self, units: &[SourceUnit]) -> LintResult {
        info!(units = units.len(), rules = self.rules.len(), "starting analysis");

        let mut result = units
            .par_iter()
            .map(|unit| LintResult {
                diagnostics: self.analyze_unit(unit),
                files_checked: unit.files.len(),
            })
            .reduce(LintResult::new, |mut acc, part| {
                acc.extend(part);
                acc
            });
        result.sort();

        info!(
            diagnostics = result.diagnostics.len(),
            files = result.files_checked,
            "analysis complete"
        );
        result
    }

    /// Analyzes one unit: builds its index and resolver, then runs every rule.
    #[must_use]
    pub fn analyze_unit(&self, unit: &SourceUnit) -> Vec<Diagnostic> {
        debug!(package = %unit.package_path, files = unit.files.len(), "analyzing unit");

        let index = DeclarationIndex::build(unit);
        let resolver = UnitResolver::new(unit, &index);
        let ctx = UnitContext::new(unit, &index, &resolver, self.current_year);

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            let found = rule.check(&ctx);
            debug!(rule = rule.code(), found = found.len(), "rule finished");
            diagnostics.extend(self.apply_severity_override(rule.as_ref(), found));
        }
        diagnostics
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule: &dyn Rule,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Vec<Diagnostic> {
        if let Some(severity) = self.config.rule_severity(rule.code(), rule.name()) {
            for d in &mut diagnostics {
                d.severity = severity;
            }
        }
        diagnostics
    }
}
