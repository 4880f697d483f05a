//! Configuration file discovery and loading.
//!
//! The first match wins:
//!
//! 1. `--config` flag (explicit path)
//! 2. `attgo-lint.toml` or `.attgo-lint.toml` in the target directory
//! 3. `~/.attgo-lint/config.toml` (or `$ATTGO_LINT_CONFIG_DIR/config.toml`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use attgo_lint_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the target directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid configuration.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("no config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["attgo-lint.toml", ".attgo-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Directory searched for a project config when linting `target`.
#[must_use]
pub fn project_dir(target: &Path) -> PathBuf {
    if target.is_file() {
        target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    } else {
        target.to_path_buf()
    }
}

/// Resolves the configuration source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |found| {
            debug!("Found global config: {}", found.display());
            ConfigSource::Global(found)
        })
}

/// Global config directory: `$ATTGO_LINT_CONFIG_DIR`, else `~/.attgo-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("ATTGO_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".attgo-lint"))
}
