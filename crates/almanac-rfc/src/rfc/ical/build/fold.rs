//! Content line folding for iCalendar (RFC 5545 §3.1).

use almanac_core::config::NewlineStyle;

/// Folds a content line to `max_len` octets per physical line, terminators
/// excluded.
///
/// The first segment holds at most `max_len` octets; each continuation is a
/// single space plus at most `max_len - 1` octets. Breaks prefer the last
/// word boundary (before a space or `<`, after a `>`) within the segment and
/// never split a UTF-8 sequence.
///
/// With [`NewlineStyle::Lf`] a CR directly before a terminator would read
/// back as part of it, so breaks are moved off CRs and trailing CRs of the
/// line are dropped.
#[must_use]
pub fn fold_line(line: &str, max_len: usize, newline: NewlineStyle) -> String {
    let lf_only = newline == NewlineStyle::Lf;
    let line = if lf_only { line.trim_end_matches('\r') } else { line };
    let newline = newline.as_str();
    if line.len() <= max_len {
        let mut out = String::with_capacity(line.len() + newline.len());
        out.push_str(line);
        out.push_str(newline);
        return out;
    }

    let continuation_len = max_len.saturating_sub(1).max(1);
    let mut out = String::with_capacity(line.len() + (line.len() / continuation_len + 1) * 3);

    let first = cut(line, max_len, lf_only);
    out.push_str(&line[..first]);
    out.push_str(newline);
    let mut rest = &line[first..];

    while rest.len() > continuation_len {
        let end = cut(rest, continuation_len, lf_only);
        out.push(' ');
        out.push_str(&rest[..end]);
        out.push_str(newline);
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        out.push(' ');
        out.push_str(rest);
        out.push_str(newline);
    }
    out
}

fn cut(s: &str, max_len: usize, lf_only: bool) -> usize {
    let end = split_point(s, max_len);
    if lf_only { off_carriage_return(s, end) } else { end }
}

/// Moves `end` so that `s[..end]` does not end in CR.
///
/// `s` must not itself end in CR.
fn off_carriage_return(s: &str, end: usize) -> usize {
    let trimmed = s[..end].trim_end_matches('\r').len();
    if trimmed > 0 {
        return trimmed;
    }
    // Nothing but CRs before `end`: carry them and the next character.
    let after = s.len() - s[end..].trim_start_matches('\r').len();
    s[after..]
        .chars()
        .next()
        .map_or(s.len(), |c| after + c.len_utf8())
}

/// Byte offset at which to cut `s` so the head fits in `max_len` octets.
///
/// Always at least one character, so folding makes progress.
fn split_point(s: &str, max_len: usize) -> usize {
    let mut fitted = 0;
    let mut boundary = 0;
    let mut previous = None;

    for (i, c) in s.char_indices() {
        if c == ' ' || c == '<' || previous == Some('>') {
            boundary = i;
        }
        previous = Some(c);

        let next = i + c.len_utf8();
        if next > max_len {
            break;
        }
        fitted = next;
    }

    if boundary > 0 {
        boundary
    } else if fitted > 0 {
        fitted
    } else {
        s.chars().next().map_or(s.len(), char::len_utf8)
    }
}
