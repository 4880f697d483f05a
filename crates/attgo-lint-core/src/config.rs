//! Configuration types for attgo-lint.
//!
//! Rule settings follow override semantics: a boolean present in user
//! configuration always wins (even when it equals the default), a non-empty
//! list replaces the default list wholesale, and anything absent keeps its
//! default. Each setting is decoded on its own so that a malformed value is
//! reported by name.

use crate::types::Severity;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Logger types flagged at package scope unless configured otherwise.
pub const DEFAULT_LOGGER_TYPE_PATTERNS: &[&str] = &[
    "zerolog.Logger",
    "*zerolog.Logger",
    "zap.Logger",
    "*zap.Logger",
    "zap.SugaredLogger",
    "*zap.SugaredLogger",
    "logrus.Logger",
    "*logrus.Logger",
    "logrus.Entry",
    "*logrus.Entry",
    "slog.Logger",
    "*slog.Logger",
    "log.Logger",
    "*log.Logger",
];

/// Type-name suffixes that mark a type as an enum.
pub const DEFAULT_ENUM_TYPE_SUFFIXES: &[&str] = &["Type", "Status", "State", "Kind", "Mode"];

/// Fully merged rule settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Flag package-level logger variables.
    pub enable_no_pkg_logger: bool,
    /// Flag string-valued enum constants.
    pub enable_enum_iota: bool,
    /// Flag outdated copyright years.
    pub enable_current_year: bool,
    /// Flag comments starting with a lower-case letter.
    pub enable_capital_comment: bool,
    /// Flag constructors with many parameters.
    pub enable_func_opts: bool,
    /// Flag escape-heavy interpreted strings.
    pub enable_raw_string: bool,
    /// Flag out-of-order struct fields.
    pub enable_struct_field_order: bool,
    /// Flag missing interface compliance assertions.
    pub enable_interface_check: bool,
    /// Logger type patterns.
    pub logger_type_patterns: Vec<String>,
    /// Enum type-name suffixes.
    pub enum_type_suffixes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_no_pkg_logger: true,
            enable_enum_iota: true,
            enable_current_year: true,
            enable_capital_comment: false,
            enable_func_opts: false,
            enable_raw_string: false,
            enable_struct_field_order: false,
            enable_interface_check: false,
            logger_type_patterns: to_strings(DEFAULT_LOGGER_TYPE_PATTERNS),
            enum_type_suffixes: to_strings(DEFAULT_ENUM_TYPE_SUFFIXES),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

impl Settings {
    /// Applies user overrides on top of these settings.
    #[must_use]
    pub fn merge(mut self, overrides: &SettingsOverride) -> Self {
        let flags = [
            (&mut self.enable_no_pkg_logger, overrides.enable_no_pkg_logger),
            (&mut self.enable_enum_iota, overrides.enable_enum_iota),
            (&mut self.enable_current_year, overrides.enable_current_year),
            (&mut self.enable_capital_comment, overrides.enable_capital_comment),
            (&mut self.enable_func_opts, overrides.enable_func_opts),
            (&mut self.enable_raw_string, overrides.enable_raw_string),
            (&mut self.enable_struct_field_order, overrides.enable_struct_field_order),
            (&mut self.enable_interface_check, overrides.enable_interface_check),
        ];
        for (flag, value) in flags {
            if let Some(value) = value {
                *flag = value;
            }
        }

        if let Some(patterns) = overrides.logger_type_patterns.as_ref().filter(|v| !v.is_empty()) {
            self.logger_type_patterns.clone_from(patterns);
        }
        if let Some(suffixes) = overrides.enum_type_suffixes.as_ref().filter(|v| !v.is_empty()) {
            self.enum_type_suffixes.clone_from(suffixes);
        }
        self
    }
}

/// Rule settings as supplied by the user; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsOverride {
    /// See [`Settings::enable_no_pkg_logger`].
    pub enable_no_pkg_logger: Option<bool>,
    /// See [`Settings::enable_enum_iota`].
    pub enable_enum_iota: Option<bool>,
    /// See [`Settings::enable_current_year`].
    pub enable_current_year: Option<bool>,
    /// See [`Settings::enable_capital_comment`].
    pub enable_capital_comment: Option<bool>,
    /// See [`Settings::enable_func_opts`].
    pub enable_func_opts: Option<bool>,
    /// See [`Settings::enable_raw_string`].
    pub enable_raw_string: Option<bool>,
    /// See [`Settings::enable_struct_field_order`].
    pub enable_struct_field_order: Option<bool>,
    /// See [`Settings::enable_interface_check`].
    pub enable_interface_check: Option<bool>,
    /// See [`Settings::logger_type_patterns`].
    pub logger_type_patterns: Option<Vec<String>>,
    /// See [`Settings::enum_type_suffixes`].
    pub enum_type_suffixes: Option<Vec<String>>,
}

impl SettingsOverride {
    /// Reads settings from a TOML table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming the first setting that
    /// cannot be decoded.
    pub fn from_toml(table: &toml::Table) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        for (key, value) in table {
            settings.set(key, value.clone())?;
        }
        Ok(settings)
    }

    /// Reads settings from a JSON object, as passed by a plugin host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a JSON object and
    /// [`ConfigError::InvalidField`] for a setting that cannot be decoded.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;
        let serde_json::Value::Object(object) = value else {
            return Err(ConfigError::Parse {
                message: "settings must be a JSON object".to_string(),
            });
        };

        let mut settings = Self::default();
        for (key, value) in object {
            settings.set(&key, value)?;
        }
        Ok(settings)
    }

    fn set<'de, D: Deserializer<'de>>(&mut self, key: &str, value: D) -> Result<(), ConfigError> {
        match key {
            "enable_no_pkg_logger" => self.enable_no_pkg_logger = Some(decode(key, value)?),
            "enable_enum_iota" => self.enable_enum_iota = Some(decode(key, value)?),
            "enable_current_year" => self.enable_current_year = Some(decode(key, value)?),
            "enable_capital_comment" => self.enable_capital_comment = Some(decode(key, value)?),
            "enable_func_opts" => self.enable_func_opts = Some(decode(key, value)?),
            "enable_raw_string" => self.enable_raw_string = Some(decode(key, value)?),
            "enable_struct_field_order" => {
                self.enable_struct_field_order = Some(decode(key, value)?);
            }
            "enable_interface_check" => self.enable_interface_check = Some(decode(key, value)?),
            "logger_type_patterns" => self.logger_type_patterns = Some(decode(key, value)?),
            "enum_type_suffixes" => self.enum_type_suffixes = Some(decode(key, value)?),
            other => warn!(setting = other, "ignoring unknown setting"),
        }
        Ok(())
    }
}

fn decode<'de, T: Deserialize<'de>, D: Deserializer<'de>>(
    field: &str,
    value: D,
) -> Result<T, ConfigError> {
    T::deserialize(value).map_err(|e| ConfigError::InvalidField {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File discovery options.
    pub analyzer: AnalyzerConfig,
    /// Rule settings from the `[settings]` table.
    pub settings: SettingsOverride,
    /// Per-rule options keyed by identifier or name.
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or any field has the wrong
    /// shape.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let mut config = Self::default();
        for (key, value) in table {
            match key.as_str() {
                "analyzer" => config.analyzer = decode(&key, value)?,
                "rules" => config.rules = decode(&key, value)?,
                "settings" => {
                    let toml::Value::Table(settings) = value else {
                        return Err(ConfigError::InvalidField {
                            field: key,
                            message: "expected a table".to_string(),
                        });
                    };
                    config.settings = SettingsOverride::from_toml(&settings)?;
                }
                other => warn!(section = other, "ignoring unknown config section"),
            }
        }
        Ok(config)
    }

    /// Effective rule settings: defaults merged with this file's overrides.
    #[must_use]
    pub fn effective_settings(&self) -> Settings {
        Settings::default().merge(&self.settings)
    }

    /// Gets the severity override for a rule, looked up by identifier first
    /// and then by name.
    #[must_use]
    pub fn rule_severity(&self, code: &str, name: &str) -> Option<Severity> {
        self.rules
            .get(code)
            .or_else(|| self.rules.get(name))
            .and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude from analysis.
    pub exclude: Vec<String>,

    /// Whether `_test.go` files are analyzed.
    pub include_tests: bool,

    /// Whether to respect .gitignore files.
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/vendor/**".to_string(), "**/testdata/**".to_string()],
            include_tests: true,
            respect_gitignore: true,
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A setting is present but has the wrong shape.
    #[error("Invalid value for `{field}`: {message}")]
    InvalidField {
        /// Offending key.
        field: String,
        /// Decoder message.
        message: String,
    },
}
