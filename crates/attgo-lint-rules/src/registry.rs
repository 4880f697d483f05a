//! The closed set of built-in rules and their configuration mapping.
//!
//! Identifiers and names only matter here, at the configuration and
//! reporting boundary. Everything past [`build_rules`] works with
//! [`RuleBox`] values.

use crate::{
    capital_comment, current_year, enum_iota, func_opts, interface_check, no_pkg_logger,
    raw_string, struct_field_order, CapitalComment, CurrentYear, EnumIota, FuncOpts,
    InterfaceCheck, NoPkgLogger, RawString, StructFieldOrder,
};
use attgo_lint_core::{RuleBox, Settings};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// A rule key that names no built-in rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule: {0}")]
pub struct UnknownRule(pub String);

/// How strongly a rule is recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Enabled by default.
    High,
    /// Opt-in.
    Medium,
    /// Opt-in; noisier heuristics.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// Static description of one built-in rule.
#[derive(Clone, Copy)]
pub struct RuleEntry {
    /// Stable identifier, e.g. `attgo_raw_string`.
    pub code: &'static str,
    /// Kebab-case name, e.g. `raw-string`.
    pub name: &'static str,
    /// Recommendation level.
    pub priority: Priority,
    enabled: fn(&Settings) -> bool,
    build: fn(&Settings) -> RuleBox,
}

impl RuleEntry {
    /// Whether the settings turn this rule on.
    #[must_use]
    pub fn is_enabled(&self, settings: &Settings) -> bool {
        (self.enabled)(settings)
    }

    /// Whether the rule runs when no configuration is given.
    #[must_use]
    pub fn default_enabled(&self) -> bool {
        self.is_enabled(&Settings::default())
    }

    /// Instantiates the rule with `settings` applied.
    #[must_use]
    pub fn build(&self, settings: &Settings) -> RuleBox {
        (self.build)(settings)
    }

    /// Whether `key` is this rule's identifier or name.
    #[must_use]
    pub fn is_named(&self, key: &str) -> bool {
        self.code == key || self.name == key
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

const ENTRIES: &[RuleEntry] = &[
    RuleEntry {
        code: no_pkg_logger::CODE,
        name: no_pkg_logger::NAME,
        priority: Priority::High,
        enabled: |s| s.enable_no_pkg_logger,
        build: |s| Box::new(NoPkgLogger::new().patterns(s.logger_type_patterns.clone())),
    },
    RuleEntry {
        code: enum_iota::CODE,
        name: enum_iota::NAME,
        priority: Priority::High,
        enabled: |s| s.enable_enum_iota,
        build: |s| Box::new(EnumIota::new().suffixes(s.enum_type_suffixes.clone())),
    },
    RuleEntry {
        code: current_year::CODE,
        name: current_year::NAME,
        priority: Priority::High,
        enabled: |s| s.enable_current_year,
        build: |_| Box::new(CurrentYear::new()),
    },
    RuleEntry {
        code: capital_comment::CODE,
        name: capital_comment::NAME,
        priority: Priority::Medium,
        enabled: |s| s.enable_capital_comment,
        build: |_| Box::new(CapitalComment::new()),
    },
    RuleEntry {
        code: func_opts::CODE,
        name: func_opts::NAME,
        priority: Priority::Medium,
        enabled: |s| s.enable_func_opts,
        build: |_| Box::new(FuncOpts::new()),
    },
    RuleEntry {
        code: raw_string::CODE,
        name: raw_string::NAME,
        priority: Priority::Medium,
        enabled: |s| s.enable_raw_string,
        build: |_| Box::new(RawString::new()),
    },
    RuleEntry {
        code: struct_field_order::CODE,
        name: struct_field_order::NAME,
        priority: Priority::Low,
        enabled: |s| s.enable_struct_field_order,
        build: |_| Box::new(StructFieldOrder::new()),
    },
    RuleEntry {
        code: interface_check::CODE,
        name: interface_check::NAME,
        priority: Priority::Low,
        enabled: |s| s.enable_interface_check,
        build: |_| Box::new(InterfaceCheck::new()),
    },
];

/// Every built-in rule, in priority order.
#[must_use]
pub fn entries() -> &'static [RuleEntry] {
    ENTRIES
}

/// Looks a rule up by identifier or name.
#[must_use]
pub fn rule_by_name(key: &str) -> Option<&'static RuleEntry> {
    ENTRIES.iter().find(|entry| entry.is_named(key))
}

/// Instantiates the rules the settings enable, in priority order.
#[must_use]
pub fn build_rules(settings: &Settings) -> Vec<RuleBox> {
    ENTRIES
        .iter()
        .filter(|entry| entry.is_enabled(settings))
        .inspect(|entry| debug!(rule = entry.code, "rule enabled"))
        .map(|entry| entry.build(settings))
        .collect()
}

/// Instantiates exactly the named rules, ignoring enable flags.
///
/// # Errors
///
/// Returns the first key that names no built-in rule.
pub fn build_selected<S: AsRef<str>>(
    keys: &[S],
    settings: &Settings,
) -> Result<Vec<RuleBox>, UnknownRule> {
    let mut selected: Vec<&'static str> = Vec::new();
    for key in keys.iter().map(|k| k.as_ref().trim()).filter(|k| !k.is_empty()) {
        let entry = rule_by_name(key).ok_or_else(|| UnknownRule(key.to_string()))?;
        selected.push(entry.code);
    }
    Ok(ENTRIES
        .iter()
        .filter(|entry| selected.contains(&entry.code))
        .map(|entry| entry.build(settings))
        .collect())
}

/// Every built-in rule with default settings, enabled or not.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    let settings = Settings::default();
    ENTRIES.iter().map(|entry| entry.build(&settings)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use attgo_lint_core::SettingsOverride;

    fn codes(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.code()).collect()
    }

    #[test]
    fn defaults_build_high_priority_rules() {
        let rules = build_rules(&Settings::default());
        assert_eq!(
            codes(&rules),
            vec!["attgo_no_pkg_logger", "attgo_enum_iota", "attgo_current_year"]
        );
    }

    #[test]
    fn overrides_toggle_rules() {
        let overrides = SettingsOverride {
            enable_current_year: Some(false),
            enable_interface_check: Some(true),
            ..SettingsOverride::default()
        };
        let rules = build_rules(&Settings::default().merge(&overrides));
        assert_eq!(
            codes(&rules),
            vec!["attgo_no_pkg_logger", "attgo_enum_iota", "attgo_interface_check"]
        );
    }

    #[test]
    fn entries_match_rule_metadata() {
        let rules = all_rules();
        assert_eq!(rules.len(), entries().len());
        for (entry, rule) in entries().iter().zip(&rules) {
            assert_eq!(entry.code, rule.code());
            assert_eq!(entry.name, rule.name());
            assert!(entry.code.starts_with("attgo_"));
            assert_eq!(
                entry.code.strip_prefix("attgo_"),
                Some(entry.name.replace('-', "_").as_str())
            );
            assert_eq!(entry.default_enabled(), entry.priority == Priority::High);
        }
    }

    #[test]
    fn registry_table() {
        let table: String = entries()
            .iter()
            .map(|e| format!("{:<26} {:<20} {:<7} {}\n", e.code, e.name, e.priority, e.default_enabled()))
            .collect();
        insta::assert_snapshot!(table, @r"
        attgo_no_pkg_logger        no-pkg-logger        high    true
        attgo_enum_iota            enum-iota            high    true
        attgo_current_year         current-year         high    true
        attgo_capital_comment      capital-comment      medium  false
        attgo_func_opts            func-opts            medium  false
        attgo_raw_string           raw-string           medium  false
        attgo_struct_field_order   struct-field-order   low     false
        attgo_interface_check      interface-check      low     false
        ");
    }

    #[test]
    fn lookup_by_code_or_name() {
        assert_eq!(rule_by_name("raw-string").map(|e| e.code), Some("attgo_raw_string"));
        assert_eq!(
            rule_by_name("attgo_func_opts").map(|e| e.name),
            Some("func-opts")
        );
        assert!(rule_by_name("no-unwrap").is_none());
    }

    #[test]
    fn selection_dedups_and_keeps_registry_order() {
        let rules = build_selected(
            &["interface-check", "attgo_raw_string", "raw-string", " "],
            &Settings::default(),
        )
        .expect("known rules");
        assert_eq!(codes(&rules), vec!["attgo_raw_string", "attgo_interface_check"]);

        let Err(err) = build_selected(&["raw-string", "bogus"], &Settings::default()) else {
            panic!("bogus should be rejected");
        };
        assert_eq!(err, UnknownRule("bogus".to_string()));
        assert_eq!(err.to_string(), "unknown rule: bogus");
    }
}
