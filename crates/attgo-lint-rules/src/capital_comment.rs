//! Rule to require comments to start with a capital letter.
//!
//! Only the first line of each comment group is inspected. A comment is
//! accepted when it starts with punctuation or a digit, is a directive
//! (`nolint`, `TODO`, `+build`, `go:`...), contains a URL, looks like license
//! boilerplate, or starts with an identifier:
//!
//! ```go
//! // myVariable contains the data    (internal upper-case letter)
//! // my_variable is set here         (underscore)
//! // handler is invoked per request  (followed by "is")
//! ```
//!
//! Common English words such as `this`, `see` or `the` are never taken for
//! identifiers.

use attgo_lint_core::{Diagnostic, Rule, Severity, UnitContext};

/// Rule code for capital-comment.
pub const CODE: &str = "attgo_capital_comment";

/// Rule name for capital-comment.
pub const NAME: &str = "capital-comment";

const DIRECTIVE_PREFIXES: &[&str] = &["nolint", "todo", "fixme", "hack", "xxx", "bug"];

const LICENSE_PHRASES: &[&str] = &[
    "you may not use this file",
    "distributed under the license",
    "without warranties or conditions",
    "limitations under the license",
    "permission is hereby granted",
    "the above copyright notice",
    "in no event shall",
    "as is",
];

const COMMON_WORDS: &[&str] = &[
    "this", "that", "these", "those", "it", "its", "the", "a", "an", "here", "there", "where",
    "when", "see", "use", "set", "get", "all", "any", "some", "each", "for", "not", "but", "and",
    "or",
];

const IDENTIFIER_FOLLOWERS: &[&str] = &[
    "is",
    "are",
    "was",
    "were",
    "has",
    "have",
    "had",
    "contains",
    "returns",
    "holds",
    "stores",
    "represents",
    "defines",
    "implements",
    "provides",
    "specifies",
];

/// Flags comment groups whose first line starts with a lower-case word.
#[derive(Debug, Clone)]
pub struct CapitalComment {
    /// Severity level.
    pub severity: Severity,
}

impl Default for CapitalComment {
    fn default() -> Self {
        Self::new()
    }
}

impl CapitalComment {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for CapitalComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires comments to start with a capital letter"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        ctx.files()
            .flat_map(|file| {
                file.comments
                    .iter()
                    .filter_map(|group| group.first())
                    .filter(|comment| needs_capital(comment.content()))
                    .map(move |comment| {
                        self.diagnostic(
                            &file.path,
                            comment.position,
                            "comment should start with a capital letter".to_string(),
                        )
                    })
            })
            .collect()
    }
}

/// Returns true when `text` (markers already stripped) should be capitalised.
pub fn needs_capital(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if is_punctuation(first) || first.is_numeric() || is_exempt(text) {
        return false;
    }
    first.is_lowercase() && !looks_like_identifier(text)
}

fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | ',' | '-' | '.' | '/' | ':' | ';'
            | '?' | '@' | '[' | '\\' | ']' | '_' | '{' | '}'
            | '¡' | '§' | '«' | '¶' | '·' | '»' | '¿'
    ) || ('\u{2010}'..='\u{2027}').contains(&c)
        || ('\u{2030}'..='\u{205e}').contains(&c)
        || ('\u{3001}'..='\u{3003}').contains(&c)
}

fn is_exempt(text: &str) -> bool {
    let lower = text.to_lowercase();

    DIRECTIVE_PREFIXES.iter().any(|p| lower.starts_with(p))
        || text.contains("://")
        || text.starts_with("+build")
        || text.starts_with("go:")
        || LICENSE_PHRASES.iter().any(|p| lower.contains(p))
}

fn looks_like_identifier(text: &str) -> bool {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };

    if COMMON_WORDS.contains(&first.to_lowercase().as_str()) {
        return false;
    }
    if first.contains('_') || first.chars().skip(1).any(char::is_uppercase) {
        return true;
    }

    words
        .next()
        .is_some_and(|follower| IDENTIFIER_FOLLOWERS.contains(&follower.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn lower_case_prose_needs_capital() {
        assert!(needs_capital("this is a bad comment"));
        assert!(needs_capital("see the documentation"));
        assert!(needs_capital("handles retries"));
    }

    #[test]
    fn identifiers_are_exempt() {
        assert!(!needs_capital("someFunc is used to do things"));
        assert!(!needs_capital("myVariable contains the data"));
        assert!(!needs_capital("my_variable is set here"));
        assert!(!needs_capital("handler returns early"));
    }

    #[test]
    fn directives_and_boilerplate_are_exempt() {
        assert!(!needs_capital("nolint:errcheck"));
        assert!(!needs_capital("todo: fix this later"));
        assert!(!needs_capital("see https://example.com for more info"));
        assert!(!needs_capital("+build linux"));
        assert!(!needs_capital("go:generate stringer -type=Foo"));
        assert!(!needs_capital("distributed under the License is distributed"));
        assert!(!needs_capital("... continued from above"));
        assert!(!needs_capital("123 is the magic number"));
        assert!(!needs_capital(""));
    }

    #[test]
    fn upper_case_and_non_letters_pass() {
        assert!(!needs_capital("This is fine"));
        assert!(!needs_capital("«quoted» text"));
    }

    #[test]
    fn only_first_comment_of_group_is_checked() {
        let diagnostics = check(
            &CapitalComment::new(),
            r#"package svc

// Capitalised first line
// lower second line

/* block comment */

// this one is flagged
var x = 1
"#,
        );
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].location.line, 6);
        assert_eq!(diagnostics[1].location.line, 8);
    }

    #[test]
    fn own_line_comment_after_trailing_comment_is_checked() {
        let diagnostics = check(
            &CapitalComment::new(),
            "package svc\n\nfunc f() {\n\tx := 1 // Count.\n\t// increment the counter now\n\tx++\n}\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 5);
    }
}
