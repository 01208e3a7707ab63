//! Content line tokenizer for iCalendar (RFC 5545 §3.1).
//!
//! Format: `name *(";" param) ":" value`

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::values::unescape_text;
use crate::rfc::ical::core::{Parameters, Property, ValueType};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Parses one logical content line into a property.
///
/// TEXT-typed values are unescaped; other values are kept literally.
///
/// ## Errors
/// Returns an error if the line is malformed or a parameter value contains
/// a control character.
pub fn parse_property(line: &str, line_num: usize) -> ParseResult<Property> {
    let mut chars = line.char_indices().peekable();

    let name_end = scan_token(&mut chars, 0);
    if name_end == 0 {
        return Err(
            ParseError::new(ParseErrorKind::MissingPropertyName, line_num, 1)
                .with_context(format!("unparseable line {:?}", preview(line))),
        );
    }
    let name = &line[..name_end];

    let mut params = Parameters::new();
    let mut after_param = false;
    loop {
        match chars.next() {
            Some((_, ':')) => break,
            Some((_, ';')) => {
                parse_parameter(&mut chars, line, name, line_num, &mut params)?;
                after_param = true;
            }
            Some((i, c)) => {
                let kind = if after_param {
                    ParseErrorKind::InvalidParameter
                } else {
                    ParseErrorKind::InvalidPropertyName
                };
                return Err(ParseError::new(kind, line_num, i + 1)
                    .with_context(format!("unexpected character {c:?} in {name}")));
            }
            None => {
                return Err(
                    ParseError::new(ParseErrorKind::MissingColon, line_num, line.len() + 1)
                        .with_context(format!("no value for {name}")),
                );
            }
        }
    }

    let value_start = chars.peek().map_or(line.len(), |&(i, _)| i);
    let raw = &line[value_start..];
    let value = if ValueType::resolve(name, &params).is_text() {
        unescape_text(raw)
    } else {
        raw.to_string()
    };

    Ok(Property {
        name: name.to_string(),
        params,
        value,
    })
}

/// Consumes `[A-Za-z0-9-]*` and returns the end offset.
fn scan_token(chars: &mut Chars<'_>, start: usize) -> usize {
    let mut end = start;
    while let Some(&(i, c)) = chars.peek() {
        if !c.is_ascii_alphanumeric() && c != '-' {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }
    end
}

/// Parses `name=value(,value)*` after a `;`, leaving the delimiter that
/// follows the last value unconsumed.
fn parse_parameter(
    chars: &mut Chars<'_>,
    line: &str,
    property: &str,
    line_num: usize,
    params: &mut Parameters,
) -> ParseResult<()> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);
    let end = scan_token(chars, start);
    if end == start {
        return Err(
            ParseError::new(ParseErrorKind::MissingParameterName, line_num, start + 1)
                .with_context(format!("in property {property}")),
        );
    }
    let key = &line[start..end];

    if !matches!(chars.next(), Some((_, '='))) {
        return Err(
            ParseError::new(ParseErrorKind::MissingParameterValue, line_num, end + 1)
                .with_context(format!("expected '=' after parameter {key} in property {property}")),
        );
    }

    loop {
        let value = parse_param_value(chars, key, property, line_num)?;
        params.append(key, value);

        if matches!(chars.peek(), Some(&(_, ','))) {
            chars.next();
        } else {
            return Ok(());
        }
    }
}

/// Parses one parameter value, quoted or not.
fn parse_param_value(
    chars: &mut Chars<'_>,
    key: &str,
    property: &str,
    line_num: usize,
) -> ParseResult<String> {
    let mut value = String::new();
    let open_quote = match chars.peek() {
        Some(&(i, '"')) => {
            chars.next();
            Some(i)
        }
        _ => None,
    };
    let quoted = open_quote.is_some();

    loop {
        let Some(&(i, c)) = chars.peek() else {
            return match open_quote {
                Some(open) => Err(
                    ParseError::new(ParseErrorKind::UnclosedQuote, line_num, open + 1)
                        .with_context(format!("in parameter {key} of {property}")),
                ),
                None => Ok(value),
            };
        };

        match c {
            '"' if quoted => {
                chars.next();
                return Ok(value);
            }
            '"' => {
                return Err(
                    ParseError::new(ParseErrorKind::UnexpectedQuote, line_num, i + 1)
                        .with_context(format!("in parameter {key} of {property}")),
                );
            }
            ';' | ':' | ',' if !quoted => return Ok(value),
            '\\' => {
                chars.next();
                let Some((_, escaped)) = chars.next() else {
                    return Err(
                        ParseError::new(ParseErrorKind::DanglingEscape, line_num, i + 1)
                            .with_context(format!("in parameter {key} of {property}")),
                    );
                };
                match escaped {
                    'n' | 'N' => value.push('\n'),
                    c if is_forbidden_control(c) => {
                        return Err(control_character(c, line_num, i + 2, key, property));
                    }
                    other => value.push(other),
                }
            }
            c if is_forbidden_control(c) => {
                return Err(control_character(c, line_num, i + 1, key, property));
            }
            c => {
                value.push(c);
                chars.next();
            }
        }
    }
}

/// CTL characters other than HTAB.
pub(crate) fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0A}'..='\u{1F}')
}

fn control_character(
    c: char,
    line_num: usize,
    column: usize,
    key: &str,
    property: &str,
) -> ParseError {
    ParseError::new(ParseErrorKind::ControlCharacter, line_num, column).with_context(format!(
        "unexpected char {:#04x} in parameter {key} of {property}",
        u32::from(c)
    ))
}

fn preview(line: &str) -> &str {
    const MAX: usize = 32;
    if line.len() <= MAX {
        return line;
    }
    let mut end = MAX;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
