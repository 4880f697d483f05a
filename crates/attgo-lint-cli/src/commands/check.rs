//! Check command implementation.

use anyhow::{Context, Result};
use attgo_lint_core::{Analyzer, AnalyzerConfig, LintResult, RuleBox, Settings, Severity};
use attgo_lint_go::{load_packages, suppress, LoadOptions};
use attgo_lint_rules::{build_rules, build_selected};
use std::path::Path;
use tracing::info;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of `attgo-lint check`.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// How results are printed.
    pub format: OutputFormat,
    /// Comma-separated rule keys that replace the enable flags.
    pub rules: Option<String>,
    /// Exclude patterns added to the configured ones.
    pub exclude: Vec<String>,
    /// Lowest severity that fails the run.
    pub fail_on: Severity,
    /// Year override for the copyright check.
    pub year: Option<i32>,
}

/// Outcome of linting, before printing.
#[derive(Debug)]
pub struct CheckReport {
    /// Remaining diagnostics.
    pub result: LintResult,
    /// Diagnostics removed by `//nolint`.
    pub suppressed: usize,
}

/// Runs the check command, returning `false` when findings fail the run.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let report = lint(path, options, source)?;
    super::output::print(&report.result, options.format, report.suppressed)?;
    Ok(!report.result.has_diagnostics_at(options.fail_on))
}

/// Loads configuration and packages, then runs the selected rules.
pub fn lint(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<CheckReport> {
    let config = source.load()?;
    let settings = config.effective_settings();
    let rules = select_rules(options.rules.as_deref(), &settings)?;

    let mut discovery: AnalyzerConfig = config.analyzer.clone();
    discovery.exclude.extend(options.exclude.iter().cloned());
    let units = load_packages(path, &LoadOptions::from(&discovery))
        .with_context(|| format!("Failed to load Go packages from {}", path.display()))?;

    let mut builder = Analyzer::builder().rules(rules).config(config);
    if let Some(year) = options.year {
        builder = builder.current_year(year);
    }
    let analyzer = builder.build();

    info!(
        "Analyzing {} with {} rules over {} package(s)",
        path.display(),
        analyzer.rule_count(),
        units.len()
    );

    let mut result = analyzer.analyze(&units);
    let suppressed = suppress::apply(&units, &mut result);
    Ok(CheckReport { result, suppressed })
}

fn select_rules(filter: Option<&str>, settings: &Settings) -> Result<Vec<RuleBox>> {
    match filter {
        Some(filter) => {
            let keys: Vec<&str> = filter.split(',').collect();
            build_selected(&keys, settings).context("Invalid --rules value")
        }
        None => Ok(build_rules(settings)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LOGGER: &str = "// Copyright © 2019 Acme.\n\npackage app\n\nimport \"log/slog\"\n\nvar logger = slog.Default()\n\nvar pattern = \"\\\\d+\\\\.\\\\d+\\\\.\\\\d+\"\n";

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
        fs::write(dir.path().join("app.go"), LOGGER).unwrap();
        dir
    }

    fn options() -> CheckOptions {
        CheckOptions {
            format: OutputFormat::Compact,
            rules: None,
            exclude: Vec::new(),
            fail_on: Severity::Warning,
            year: Some(2026),
        }
    }

    fn codes(report: &CheckReport) -> Vec<&str> {
        report.result.diagnostics.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn default_rules() {
        let dir = project();
        let report = lint(dir.path(), &options(), &ConfigSource::Default).unwrap();
        assert_eq!(codes(&report), vec!["attgo_current_year", "attgo_no_pkg_logger"]);
        assert_eq!(report.result.files_checked, 1);
    }

    #[test]
    fn rules_flag_replaces_enable_flags() {
        let dir = project();
        let options = CheckOptions {
            rules: Some("raw-string, attgo_no_pkg_logger".to_string()),
            ..options()
        };
        let report = lint(dir.path(), &options, &ConfigSource::Default).unwrap();
        assert_eq!(codes(&report), vec!["attgo_no_pkg_logger", "attgo_raw_string"]);
    }

    #[test]
    fn unknown_rule_is_an_error() {
        let dir = project();
        let options = CheckOptions {
            rules: Some("no-such-rule".to_string()),
            ..options()
        };
        let err = lint(dir.path(), &options, &ConfigSource::Default).unwrap_err();
        assert!(format!("{err:#}").contains("unknown rule: no-such-rule"));
    }

    #[test]
    fn config_file_settings_and_severity() {
        let dir = project();
        let config = dir.path().join("attgo-lint.toml");
        fs::write(
            &config,
            "[settings]\nenable_current_year = false\nenable_raw_string = true\n\n[rules.raw-string]\nseverity = \"error\"\n",
        )
        .unwrap();

        let report = lint(dir.path(), &options(), &ConfigSource::Project(config)).unwrap();
        assert_eq!(codes(&report), vec!["attgo_no_pkg_logger", "attgo_raw_string"]);
        assert_eq!(report.result.diagnostics[1].severity, Severity::Error);
    }

    #[test]
    fn year_flag_controls_copyright_check() {
        let dir = project();
        let options = CheckOptions {
            year: Some(2019),
            ..options()
        };
        let report = lint(dir.path(), &options, &ConfigSource::Default).unwrap();
        assert_eq!(codes(&report), vec!["attgo_no_pkg_logger"]);
    }

    #[test]
    fn nolint_comments_are_honoured() {
        let dir = project();
        let source = LOGGER.replace(
            "var logger = slog.Default()",
            "var logger = slog.Default() //nolint:no-pkg-logger",
        );
        fs::write(dir.path().join("app.go"), source).unwrap();

        let report = lint(dir.path(), &options(), &ConfigSource::Default).unwrap();
        assert_eq!(codes(&report), vec!["attgo_current_year"]);
        assert_eq!(report.suppressed, 1);
    }

    #[test]
    fn exclude_flag_adds_patterns() {
        let dir = project();
        let options = CheckOptions {
            exclude: vec!["app.go".to_string()],
            ..options()
        };
        let report = lint(dir.path(), &options, &ConfigSource::Default).unwrap();
        assert!(report.result.diagnostics.is_empty());
        assert_eq!(report.result.files_checked, 0);
    }
}
