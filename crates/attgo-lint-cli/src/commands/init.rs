//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "attgo-lint.toml";

const DEFAULT_CONFIG: &str = r#"# attgo-lint configuration

[analyzer]
# Glob patterns, relative to the linted directory, to skip
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Lint *_test.go files as well
include_tests = true

# Respect .gitignore files
respect_gitignore = true

[settings]
# Enabled by default
enable_no_pkg_logger = true
enable_enum_iota = true
enable_current_year = true

# Opt-in
enable_capital_comment = false
enable_func_opts = false
enable_raw_string = false
enable_struct_field_order = false
enable_interface_check = false

# A non-empty list replaces the built-in one.
# logger_type_patterns = ["*zerolog.Logger", "*zap.Logger", "*slog.Logger"]
# enum_type_suffixes = ["Type", "Status", "State", "Kind", "Mode"]

# Per-rule severity, keyed by identifier or name
# [rules.attgo_raw_string]
# severity = "error"
"#;

/// Writes a default config into `dir`, returning the written path.
///
/// # Errors
///
/// Fails when the file exists and `force` is unset, or cannot be written.
pub fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Runs the init command.
///
/// # Errors
///
/// See [`write_config`].
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = write_config(dir, force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Turn on the opt-in rules you want under [settings]");
    println!("  2. Run: attgo-lint check");

    Ok(())
}
