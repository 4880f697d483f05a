//! # attgo-lint-rules
//!
//! House-style rules for Go packages.
//!
//! ## Available Rules
//!
//! | Identifier | Name | Priority | Description |
//! |------------|------|----------|-------------|
//! | `attgo_no_pkg_logger` | `no-pkg-logger` | high | Forbids package-level logger variables |
//! | `attgo_enum_iota` | `enum-iota` | high | Forbids string-valued enum constants |
//! | `attgo_current_year` | `current-year` | high | Requires the current year in copyright headers |
//! | `attgo_capital_comment` | `capital-comment` | medium | Requires comments to start with a capital letter |
//! | `attgo_func_opts` | `func-opts` | medium | Suggests functional options for wide service constructors |
//! | `attgo_raw_string` | `raw-string` | medium | Suggests raw strings over escape-heavy literals |
//! | `attgo_struct_field_order` | `struct-field-order` | low | Orders struct fields by category |
//! | `attgo_interface_check` | `interface-check` | low | Suggests compile-time interface assertions |
//!
//! High priority rules are enabled by default.
//!
//! ## Usage
//!
//! ```ignore
//! use attgo_lint_core::{Analyzer, Settings};
//! use attgo_lint_rules::build_rules;
//!
//! let analyzer = Analyzer::builder()
//!     .rules(build_rules(&Settings::default()))
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capital_comment;
mod current_year;
mod enum_iota;
mod func_opts;
mod interface_check;
mod no_pkg_logger;
mod raw_string;
mod registry;
mod struct_field_order;

#[cfg(test)]
mod test_support;

pub use capital_comment::{needs_capital, CapitalComment};
pub use current_year::{copyright_year, CurrentYear};
pub use enum_iota::EnumIota;
pub use func_opts::FuncOpts;
pub use interface_check::InterfaceCheck;
pub use no_pkg_logger::NoPkgLogger;
pub use raw_string::{count_escapes, decode as decode_escapes, RawString};
pub use registry::{
    all_rules, build_rules, build_selected, entries, rule_by_name, Priority, RuleEntry,
    UnknownRule,
};
pub use struct_field_order::{FieldCategory, StructFieldOrder};

/// Re-export core types for convenience.
pub use attgo_lint_core::{Diagnostic, Rule, Severity};
