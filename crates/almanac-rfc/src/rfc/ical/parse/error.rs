//! iCalendar parsing error types.

use std::fmt;

/// Result type for iCalendar grammar and structure checks.
pub type ParseResult<T> = Result<T, ParseError>;

/// Grammar or structural error, located by physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Line number where the offending content line starts (1-based).
    pub line: usize,
    /// Column within the unfolded content line (1-based).
    pub column: usize,
    /// Names involved, or the expected-vs-actual token.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns whether this error concerns BEGIN/END structure rather than
    /// content line grammar.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::ExpectedBegin
                | ParseErrorKind::ExpectedVCalendar
                | ParseErrorKind::ExpectedEnd
                | ParseErrorKind::ExpectedBeginOrEnd
                | ParseErrorKind::VCalendarNotWhereExpected
                | ParseErrorKind::UnbalancedEnd
                | ParseErrorKind::OutOfLines
                | ParseErrorKind::ContentAfterEnd
                | ParseErrorKind::NestingTooDeep
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.kind, self.line, self.column)?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line does not start with a property name.
    MissingPropertyName,
    /// Property name followed by something other than `;` or `:`.
    InvalidPropertyName,
    /// Missing colon separator.
    MissingColon,
    /// `;` not followed by a parameter name.
    MissingParameterName,
    /// Parameter name not followed by `=`.
    MissingParameterValue,
    /// Garbage after a parameter value.
    InvalidParameter,
    /// Unclosed quoted string.
    UnclosedQuote,
    /// Double quote inside an unquoted parameter value.
    UnexpectedQuote,
    /// Backslash at the very end of the line.
    DanglingEscape,
    /// Control character inside a parameter value.
    ControlCharacter,
    /// Content line is not valid UTF-8.
    InvalidUtf8,
    /// First line is not a BEGIN.
    ExpectedBegin,
    /// First BEGIN is not VCALENDAR.
    ExpectedVCalendar,
    /// END of something other than VCALENDAR at calendar level.
    ExpectedEnd,
    /// Calendar property after the first component.
    ExpectedBeginOrEnd,
    /// Nested BEGIN:VCALENDAR.
    VCalendarNotWhereExpected,
    /// END does not match the open BEGIN.
    UnbalancedEnd,
    /// Input ended inside a component.
    OutOfLines,
    /// Content after END:VCALENDAR.
    ContentAfterEnd,
    /// Components nested beyond the supported depth.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::MissingParameterName => write!(f, "missing parameter name"),
            Self::MissingParameterValue => write!(f, "missing parameter value"),
            Self::InvalidParameter => write!(f, "invalid parameter format"),
            Self::UnclosedQuote => write!(f, "unclosed quoted string"),
            Self::UnexpectedQuote => write!(f, "unexpected double quote in parameter value"),
            Self::DanglingEscape => write!(f, "unexpected end of parameter value"),
            Self::ControlCharacter => write!(f, "control character in parameter value"),
            Self::InvalidUtf8 => write!(f, "invalid UTF-8"),
            Self::ExpectedBegin => write!(f, "malformed calendar; expected begin"),
            Self::ExpectedVCalendar => write!(f, "malformed calendar; expected a vcalendar"),
            Self::ExpectedEnd => write!(f, "malformed calendar; expected end"),
            Self::ExpectedBeginOrEnd => write!(f, "malformed calendar; expected begin or end"),
            Self::VCalendarNotWhereExpected => {
                write!(f, "malformed calendar; vcalendar not where expected")
            }
            Self::UnbalancedEnd => write!(f, "unbalanced end"),
            Self::OutOfLines => write!(f, "ran out of lines"),
            Self::ContentAfterEnd => write!(f, "malformed calendar; unexpected content after end"),
            Self::NestingTooDeep => write!(f, "component nesting too deep"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
