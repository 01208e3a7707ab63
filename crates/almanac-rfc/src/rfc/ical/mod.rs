//! iCalendar (RFC 5545) codec.
//!
//! `parse` turns text into a [`core::Calendar`] tree, `build` turns the tree
//! back into folded, escaped text, and `helpers` adds typed accessors for the
//! common properties.
//!
//! ```
//! use almanac_rfc::rfc::ical::build::serialize;
//! use almanac_rfc::rfc::ical::parse::parse_str;
//!
//! let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
//!              BEGIN:VEVENT\r\nUID:1@example.com\r\nSUMMARY:Hello\\, world\r\n\
//!              END:VEVENT\r\nEND:VCALENDAR\r\n";
//!
//! let calendar = parse_str(input)?;
//! assert_eq!(calendar.events()[0].summary(), Some("Hello, world"));
//! assert_eq!(serialize(&calendar), input);
//! # Ok::<(), almanac_rfc::error::RfcError>(())
//! ```

pub mod build;
pub mod core;
pub mod helpers;
pub mod parse;
