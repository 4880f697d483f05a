//! attgo-lint CLI tool.
//!
//! Usage:
//! ```bash
//! attgo-lint check [OPTIONS] [PATH]
//! attgo-lint list-rules
//! attgo-lint init [DIR]
//! ```

use anyhow::Result;
use attgo_lint_core::Severity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// House-style linter for Go packages
#[derive(Parser)]
#[command(name = "attgo-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ATTGO_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Go packages
    Check {
        /// Directory or Go file to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run these rules (comma-separated identifiers or names)
        #[arg(long)]
        rules: Option<String>,

        /// Extra exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lowest severity that makes the run fail
        #[arg(long, default_value = "warning")]
        fail_on: FailOn,

        /// Calendar year used by the copyright check
        #[arg(long)]
        year: Option<i32>,
    },

    /// List available rules
    ListRules,

    /// Write a default attgo-lint.toml
    Init {
        /// Directory to write the file into
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// One line per diagnostic.
    Compact,
    /// JSON output.
    Json,
    /// Source snippets rendered with miette.
    Pretty,
}

/// Severity threshold for a failing exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FailOn {
    /// Any diagnostic fails the run.
    Info,
    /// Warnings and errors fail the run.
    Warning,
    /// Only errors fail the run.
    Error,
}

impl From<FailOn> for Severity {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Info => Self::Info,
            FailOn::Warning => Self::Warning,
            FailOn::Error => Self::Error,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(2)
        }
    }
}

/// Dispatches a subcommand; `Ok(false)` means lint findings failed the run.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            fail_on,
            year,
        } => {
            let source = config_resolver::resolve(
                &config_resolver::project_dir(&path),
                cli.config.as_deref(),
            );
            let options = commands::check::CheckOptions {
                format,
                rules,
                exclude,
                fail_on: fail_on.into(),
                year,
            };
            commands::check::run(&path, &options, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run()?;
            Ok(true)
        }
        Commands::Init { dir, force } => {
            commands::init::run(&dir, force)?;
            Ok(true)
        }
    }
}
