//! iCalendar parsing (RFC 5545).
//!
//! - Unfold: joins folded physical lines into logical content lines
//! - Lexer: splits a content line into name, parameters and value
//! - Parser: builds the component tree from `BEGIN`/`END` structure
//! - Values: typed parsers for non-TEXT values

mod error;
mod lexer;
mod parser;
mod unfold;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::parse_property;
pub(crate) use lexer::is_forbidden_control;
pub use parser::{MAX_NESTING_DEPTH, Parser, parse_reader, parse_str};
pub use unfold::{ContentLine, LineUnfolder};
pub use values::{
    parse_boolean, parse_duration, parse_durations, parse_geo, parse_integer, parse_time_value,
    parse_utc_offset, unescape_text,
};
