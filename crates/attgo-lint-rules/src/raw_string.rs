//! Rule to prefer raw strings over escape-heavy interpreted strings.
//!
//! ```go
//! var path = "C:\\Users\\name\\Documents" // flagged: 3 escapes
//! var path = `C:\Users\name\Documents`    // preferred
//! ```
//!
//! Only escapes a raw string would remove are counted: `\"`, `\\` and any
//! other escape form except `\n`, `\t` and `\r`, which express characters a
//! raw string cannot hold on one line. Literals whose decoded value contains a
//! backtick can never become raw strings and are skipped.

use attgo_lint_core::{Diagnostic, Rule, Severity, UnitContext};

/// Rule code for raw-string.
pub const CODE: &str = "attgo_raw_string";

/// Rule name for raw-string.
pub const NAME: &str = "raw-string";

/// Escape count at which a literal is flagged.
pub const DEFAULT_MIN_ESCAPES: usize = 3;

/// Flags interpreted string literals with many eliminable escapes.
#[derive(Debug, Clone)]
pub struct RawString {
    /// Severity level.
    pub severity: Severity,
    /// Minimum number of eliminable escapes to report.
    pub min_escapes: usize,
}

impl Default for RawString {
    fn default() -> Self {
        Self::new()
    }
}

impl RawString {
    /// Creates a new rule with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            min_escapes: DEFAULT_MIN_ESCAPES,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the escape threshold.
    #[must_use]
    pub fn min_escapes(mut self, min_escapes: usize) -> Self {
        self.min_escapes = min_escapes;
        self
    }
}

impl Rule for RawString {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests raw strings (backticks) over double-quoted strings with many escapes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &UnitContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for file in ctx.files() {
            for lit in file.strings.iter().filter(|s| s.raw.starts_with('"')) {
                let Some(body) = inner(&lit.raw) else {
                    continue;
                };
                match decode(body) {
                    Some(value) if !value.contains(&b'`') => {}
                    _ => continue,
                }

                let count = count_escapes(body);
                if count >= self.min_escapes {
                    diagnostics.push(self.diagnostic(
                        &file.path,
                        lit.position,
                        format!(
                            "string has {count} escape sequences; consider using a raw string (backticks) for better readability"
                        ),
                    ));
                }
            }
        }
        diagnostics
    }
}

/// Source text between the quotes, or `None` for a literal shorter than two
/// characters.
fn inner(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    raw.get(1..raw.len() - 1)
}

/// Counts eliminable escapes in the raw literal body.
///
/// Every backslash consumes exactly one following byte, so `\x41` counts once
/// and its hex digits are scanned as plain text.
pub fn count_escapes(body: &str) -> usize {
    let bytes = body.as_bytes();
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            if !matches!(bytes[i + 1], b'n' | b't' | b'r') {
                count += 1;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// Decodes the escapes of an interpreted string body to bytes.
///
/// Returns `None` for malformed escapes.
pub fn decode(body: &str) -> Option<Vec<u8>> {
    let bytes = body.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let escape = *bytes.get(i + 1)?;
        i += 2;
        match escape {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'\\' | b'\'' | b'"' => out.push(escape),
            b'x' => {
                out.push(u8::try_from(digits(bytes, i, 2, 16)?).ok()?);
                i += 2;
            }
            b'0'..=b'7' => {
                out.push(u8::try_from(digits(bytes, i - 1, 3, 8)?).ok()?);
                i += 2;
            }
            b'u' | b'U' => {
                let width = if escape == b'u' { 4 } else { 8 };
                let ch = char::from_u32(digits(bytes, i, width, 16)?)?;
                let mut buf = [0; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                i += width;
            }
            _ => return None,
        }
    }
    Some(out)
}

fn digits(bytes: &[u8], start: usize, width: usize, radix: u32) -> Option<u32> {
    let text = std::str::from_utf8(bytes.get(start..start + width)?).ok()?;
    if !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(text, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn counts_only_eliminable_escapes() {
        assert_eq!(count_escapes(r"C:\\Users\\name\\Documents\\file.txt"), 4);
        assert_eq!(count_escapes(r#"hello \"world\""#), 2);
        assert_eq!(count_escapes(r"line1\nline2\ttab\r"), 0);
        assert_eq!(count_escapes(r"\x41\u00e9"), 2);
        assert_eq!(count_escapes(r"trailing\"), 0);
    }

    #[test]
    fn decodes_all_escape_forms() {
        assert_eq!(decode(r"a\tb").as_deref(), Some(&b"a\tb"[..]));
        assert_eq!(decode(r"\x60").as_deref(), Some(&b"`"[..]));
        assert_eq!(decode(r"\140").as_deref(), Some(&b"`"[..]));
        assert_eq!(decode(r"\u00e9").as_deref(), Some("é".as_bytes()));
        assert_eq!(decode(r"\U0001F600").as_deref(), Some("😀".as_bytes()));
        assert_eq!(decode(r"\q"), None);
        assert_eq!(decode(r"\x6"), None);
        assert_eq!(decode(r"\400"), None);
        assert_eq!(decode(r"\uD800"), None);
    }

    #[test]
    fn flags_windows_paths() {
        let diagnostics = check(
            &RawString::new(),
            r#"package svc

var path = "C:\\Users\\name\\Documents\\file.txt"
"#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "string has 4 escape sequences; consider using a raw string (backticks) for better readability"
        );
        assert_eq!(diagnostics[0].location.column, 12);
    }

    #[test]
    fn below_threshold_and_purposeful_escapes_pass() {
        let diagnostics = check(
            &RawString::new(),
            r#"package svc

var a = "hello \"world\""
var b = "line1\nline2\n\t\t\r"
var c = `C:\Users\name`
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn backtick_content_is_never_flagged() {
        let diagnostics = check(
            &RawString::new(),
            r#"package svc

var a = "use `\"quoted\"` \\here"
var b = "\x60 \"x\" \"y\""
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn literals_inside_functions_are_checked() {
        let diagnostics = check(
            &RawString::new(),
            r#"package svc

func run() {
	query := fmt.Sprintf("{\"key\": \"%s\", \"num\": %d}", k, n)
	_ = query
}
"#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("string has 6 escape sequences"));
    }

    #[test]
    fn malformed_literal_is_skipped() {
        let diagnostics = check(
            &RawString::new(),
            "package svc\n\nvar a = \"\\\\a\\\\b\\\\c\\q\"\n",
        );
        assert!(diagnostics.is_empty());
    }
}
