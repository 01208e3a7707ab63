//! Streaming line unfolding for iCalendar (RFC 5545 §3.1).
//!
//! A line terminator (`\n`, optionally preceded by `\r`) immediately followed
//! by a single SPACE or HTAB is a fold: both are removed and the next physical
//! line continues the current logical line.

use std::io::{self, BufRead};

use super::error::{ParseError, ParseErrorKind};
use crate::error::{RfcError, RfcResult};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// One logical (unfolded) content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Physical line number where this logical line starts (1-based).
    pub number: usize,
    pub text: String,
}

impl ContentLine {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Forward-only reader of logical lines.
///
/// Bytes are joined before UTF-8 decoding, so a fold that splits a
/// multi-byte sequence still decodes.
#[derive(Debug)]
pub struct LineUnfolder<R> {
    reader: R,
    physical_line: usize,
    started: bool,
    finished: bool,
}

impl<R: BufRead> LineUnfolder<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            physical_line: 0,
            started: false,
            finished: false,
        }
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.physical_line
    }

    /// Reads the next logical line.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. Empty logical lines
    /// are returned as-is for the caller to skip.
    ///
    /// ## Errors
    ///
    /// Returns `RfcError::Io` on a read failure and a parse error when the
    /// logical line is not valid UTF-8.
    pub fn read_next_line(&mut self) -> RfcResult<Option<ContentLine>> {
        if self.finished {
            return Ok(None);
        }
        if !self.started {
            self.started = true;
            self.skip_bom()?;
        }

        let number = self.physical_line + 1;
        let mut bytes = Vec::new();
        let mut read_any = false;

        loop {
            let mut chunk = Vec::new();
            let read = self
                .reader
                .read_until(b'\n', &mut chunk)
                .map_err(|source| read_error(number, source))?;

            if read == 0 {
                self.finished = true;
                break;
            }
            read_any = true;
            self.physical_line += 1;

            let terminated = chunk.last() == Some(&b'\n');
            if terminated {
                chunk.pop();
                if chunk.last() == Some(&b'\r') {
                    chunk.pop();
                }
            }
            bytes.extend_from_slice(&chunk);

            if !terminated {
                self.finished = true;
                break;
            }
            if !self.consume_fold_marker(number)? {
                break;
            }
        }

        if !read_any && bytes.is_empty() {
            return Ok(None);
        }

        let text = String::from_utf8(bytes).map_err(|e| {
            ParseError::new(
                ParseErrorKind::InvalidUtf8,
                number,
                e.utf8_error().valid_up_to() + 1,
            )
        })?;

        Ok(Some(ContentLine { number, text }))
    }

    /// Discards one SPACE or HTAB if it starts the next physical line.
    fn consume_fold_marker(&mut self, number: usize) -> RfcResult<bool> {
        let next = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => return Err(read_error(number, source)),
            }
        };

        if matches!(next, Some(b' ' | b'\t')) {
            self.reader.consume(1);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn skip_bom(&mut self) -> RfcResult<()> {
        let buf = self
            .reader
            .fill_buf()
            .map_err(|source| read_error(1, source))?;
        if buf.starts_with(BOM) {
            self.reader.consume(BOM.len());
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for LineUnfolder<R> {
    type Item = RfcResult<ContentLine>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn read_error(line: usize, source: io::Error) -> RfcError {
    RfcError::Io {
        context: format!("reading line {line}"),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold_all(input: &[u8]) -> Vec<(usize, String)> {
        LineUnfolder::new(input)
            .map(|line| line.map(|l| (l.number, l.text)))
            .collect::<RfcResult<_>>()
            .unwrap()
    }

    #[test]
    fn unfold_simple() {
        let lines = unfold_all(b"DESCRIPTION:This is a long description\r\n that continues here\r\n");
        assert_eq!(
            lines,
            [(1, "DESCRIPTION:This is a long descriptionthat continues here".to_string())]
        );
    }

    #[test]
    fn unfold_multiple() {
        let lines = unfold_all(b"DESCRIPTION:First\r\n Second\r\n\tThird\r\nUID:1\r\n");
        assert_eq!(
            lines,
            [
                (1, "DESCRIPTION:FirstSecondThird".to_string()),
                (4, "UID:1".to_string())
            ]
        );
    }

    #[test]
    fn unfold_bare_lf() {
        let lines = unfold_all(b"DESCRIPTION:First\n Second\nUID:2\n");
        assert_eq!(lines[0].1, "DESCRIPTION:FirstSecond");
        assert_eq!(lines[1], (3, "UID:2".to_string()));
    }

    #[test]
    fn only_one_whitespace_is_removed() {
        let lines = unfold_all(b"SUMMARY:a\r\n  b\r\n");
        assert_eq!(lines[0].1, "SUMMARY:a b");
    }

    #[test]
    fn final_line_without_terminator() {
        let lines = unfold_all(b"VERSION:2.0\r\nEND:VCALENDAR");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], (2, "END:VCALENDAR".to_string()));
    }

    #[test]
    fn empty_lines_are_yielded_empty() {
        let lines = unfold_all(b"A:1\r\n\r\nB:2\r\n");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].1.is_empty());
    }

    #[test]
    fn fold_inside_multibyte_sequence() {
        // "é" is 0xC3 0xA9, folded between the two bytes.
        let lines = unfold_all(b"SUMMARY:caf\xC3\r\n \xA9\r\n");
        assert_eq!(lines[0].1, "SUMMARY:café");
    }

    #[test]
    fn leading_bom_is_skipped() {
        let lines = unfold_all(b"\xEF\xBB\xBFBEGIN:VCALENDAR\r\n");
        assert_eq!(lines[0].1, "BEGIN:VCALENDAR");
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let mut unfolder = LineUnfolder::new(&b"A:1\r\nB:\xFF\r\n"[..]);
        assert!(unfolder.read_next_line().unwrap().is_some());
        let err = unfolder.read_next_line().unwrap_err();
        assert!(matches!(
            err,
            RfcError::Parse(ParseError { kind: ParseErrorKind::InvalidUtf8, line: 2, column: 3, .. })
        ));
    }

    #[test]
    fn exhausted_stream_stays_exhausted() {
        let mut unfolder = LineUnfolder::new(&b"A:1"[..]);
        assert!(unfolder.read_next_line().unwrap().is_some());
        assert!(unfolder.read_next_line().unwrap().is_none());
        assert!(unfolder.read_next_line().unwrap().is_none());
        assert_eq!(unfolder.line_number(), 1);
    }

    #[test]
    fn read_failure_is_surfaced() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut unfolder = LineUnfolder::new(io::BufReader::new(Broken));
        let err = unfolder.read_next_line().unwrap_err();
        assert!(matches!(err, RfcError::Io { .. }));
    }
}
