//! iCalendar text escaping utilities.

use crate::rfc::ical::parse::is_forbidden_control;

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes: backslash, comma, semicolon, and newlines.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes one parameter value.
///
/// Quoted values are wrapped in `"` with `"` and `\` backslash-escaped.
/// Unquoted values backslash-escape `,`, `"`, `;`, `:`, `\` and `'`. In
/// both forms a newline becomes `\n`. Other control characters except HTAB
/// have no representation in a parameter value and are dropped.
#[must_use]
pub fn escape_param_value(s: &str, quoted: bool) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    if quoted {
        result.push('"');
    }
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '"' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            ',' | ';' | ':' | '\'' if !quoted => {
                result.push('\\');
                result.push(c);
            }
            c if is_forbidden_control(c) => {}
            _ => result.push(c),
        }
    }
    if quoted {
        result.push('"');
    }
    result
}
