//! List rules command implementation.

use anyhow::Result;
use attgo_lint_core::Settings;
use attgo_lint_rules::entries;
use std::io::Write;

/// Runs the list-rules command.
///
/// # Errors
///
/// Fails when stdout cannot be written.
pub fn run() -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write(&mut out)?;
    Ok(())
}

fn write(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Available rules:\n")?;
    writeln!(
        out,
        "{:<26} {:<20} {:<8} {:<8} Description",
        "Identifier", "Name", "Priority", "Default"
    )?;
    writeln!(out, "{}", "-".repeat(100))?;

    let settings = Settings::default();
    for entry in entries() {
        let rule = entry.build(&settings);
        writeln!(
            out,
            "{:<26} {:<20} {:<8} {:<8} {}",
            entry.code,
            entry.name,
            entry.priority,
            if entry.default_enabled() { "on" } else { "off" },
            rule.description()
        )?;
    }

    writeln!(out, "\nEnable rules with `enable_<rule> = true` under [settings], or pick")?;
    writeln!(out, "them for a single run with --rules, e.g.:")?;
    writeln!(out, "  attgo-lint check --rules raw-string,attgo_func_opts")?;
    Ok(())
}
