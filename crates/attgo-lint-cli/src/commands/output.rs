//! Rendering of lint results.

use anyhow::Result;
use attgo_lint_core::{Diagnostic, DiagnosticReport, LintResult, Severity};
use miette::GraphicalReportHandler;
use serde::Serialize;
use std::io::Write;

use crate::OutputFormat;

/// Writes `result` to stdout in `format`.
///
/// # Errors
///
/// Fails when stdout cannot be written.
pub fn print(result: &LintResult, format: OutputFormat, suppressed: usize) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write(&mut out, result, format, suppressed)?;
    out.flush()?;
    Ok(())
}

/// Writes `result` to `out` in `format`.
///
/// # Errors
///
/// Fails when `out` cannot be written.
pub fn write(
    out: &mut impl Write,
    result: &LintResult,
    format: OutputFormat,
    suppressed: usize,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, result, suppressed),
        OutputFormat::Compact => write_compact(out, result),
        OutputFormat::Json => write_json(out, result, suppressed),
        OutputFormat::Pretty => write_pretty(out, result, suppressed),
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn write_text(out: &mut impl Write, result: &LintResult, suppressed: usize) -> Result<()> {
    for diagnostic in &result.diagnostics {
        writeln!(
            out,
            "{} {} at {}:{}:{}",
            diagnostic.code,
            diagnostic.rule,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
        )?;
        writeln!(out, "  {}: {}", severity_label(diagnostic.severity), diagnostic.message)?;
        if let Some(suggestion) = &diagnostic.suggestion {
            writeln!(out, "  = help: {}", suggestion.message)?;
        }
        writeln!(out)?;
    }
    write_summary(out, result, suppressed)
}

fn write_summary(out: &mut impl Write, result: &LintResult, suppressed: usize) -> Result<()> {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    write!(
        out,
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
        result.files_checked
    )?;
    if suppressed > 0 {
        write!(out, " ({suppressed} suppressed)")?;
    }
    writeln!(out, "\x1b[0m")?;
    Ok(())
}

fn write_compact(out: &mut impl Write, result: &LintResult) -> Result<()> {
    for diagnostic in &result.diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    files_checked: usize,
    suppressed: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
}

fn write_json(out: &mut impl Write, result: &LintResult, suppressed: usize) -> Result<()> {
    let (errors, warnings, infos) = result.count_by_severity();
    let report = JsonReport {
        diagnostics: &result.diagnostics,
        files_checked: result.files_checked,
        suppressed,
        errors,
        warnings,
        infos,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn write_pretty(out: &mut impl Write, result: &LintResult, suppressed: usize) -> Result<()> {
    let handler = GraphicalReportHandler::new();
    for diagnostic in &result.diagnostics {
        // A file that vanished since parsing falls back to the plain form.
        let Ok(source) = std::fs::read_to_string(&diagnostic.location.file) else {
            write!(out, "{}", diagnostic.format())?;
            continue;
        };
        let report = DiagnosticReport::new(diagnostic, source);
        let mut rendered = String::new();
        handler.render_report(&mut rendered, &report)?;
        writeln!(out, "{rendered}")?;
    }
    write_summary(out, result, suppressed)
}
