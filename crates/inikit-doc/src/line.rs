//! Stateless line classification.
//!
//! One line of text (already stripped of its end-of-line marker) maps to
//! exactly one [`ParsedLine`]. Classification never fails and never copies:
//! the produced key/value fields borrow from the input line.
//!
//! The rules preserve the format's historical quirks on purpose:
//! - comment and group checks look at the raw line, with no whitespace
//!   trimming anywhere,
//! - the key/value split happens at the *first* `=`; a line whose `=` is the
//!   final character carries no value and is unrecognized,
//! - quote trimming strips at most one `"` from each end of the key and the
//!   value, independently, with no inner unescaping.

use nom::{
    bytes::complete::take_till,
    character::complete::char as pchar,
    combinator::{all_consuming, rest, verify},
    sequence::separated_pair,
    IResult,
};

/// What one input line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Line starts with `;` or `#`.
    Comment,
    /// `[name]` — the name is taken verbatim between the brackets.
    Group { name: &'a str },
    /// `key=value`, both sides quote-trimmed.
    Value { key: &'a str, value: &'a str },
    /// Anything else, including empty and whitespace-only lines.
    Unrecognized,
}

/// Split `key=value` at the first `=`, requiring a non-empty value.
fn key_value(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(
        take_till(|c| c == '='),
        pchar('='),
        verify(rest, |v: &str| !v.is_empty()),
    ))(input)
}

/// Classify one line of text.
pub fn classify_line(line: &str) -> ParsedLine<'_> {
    if line.starts_with(';') || line.starts_with('#') {
        return ParsedLine::Comment;
    }
    // Both brackets can only hold on a line of at least two bytes, so the
    // inner slice is always in bounds.
    if line.starts_with('[') && line.ends_with(']') {
        return ParsedLine::Group {
            name: &line[1..line.len() - 1],
        };
    }
    match key_value(line) {
        Ok((_, (key, value))) => ParsedLine::Value {
            key: trim_quotes(key),
            value: trim_quotes(value),
        },
        Err(_) => ParsedLine::Unrecognized,
    }
}

/// Strip at most one `"` from each end of `s`.
///
/// The head and tail checks are independent and both may fire; a lone `"`
/// trims to the empty string. No other characters are touched.
pub fn trim_quotes(s: &str) -> &str {
    let end = s.len() - usize::from(s.ends_with('"'));
    let start = usize::from(s.starts_with('"'));
    if start >= end {
        ""
    } else {
        &s[start..end]
    }
}
