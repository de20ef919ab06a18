//! Date token formatting.
//!
//! Formats are plain text with a fixed set of tokens. The format string is
//! scanned once from left to right; at each position the first matching
//! token is replaced and scanning resumes after it. Replacement output is
//! never rescanned, so "MM" can not eat into an already substituted year.

use chrono::{Datelike, Timelike};

/// Tokens in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateToken {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateToken {
    const ALL: [DateToken; 6] = [
        DateToken::Year,
        DateToken::Month,
        DateToken::Day,
        DateToken::Hour,
        DateToken::Minute,
        DateToken::Second,
    ];

    fn pattern(self) -> &'static str {
        match self {
            DateToken::Year => "YYYY",
            DateToken::Month => "MM",
            DateToken::Day => "DD",
            DateToken::Hour => "hh",
            DateToken::Minute => "mm",
            DateToken::Second => "ss",
        }
    }

    fn render<T: Datelike + Timelike>(self, when: &T, out: &mut String) {
        use std::fmt::Write;

        // Writing into a String never fails.
        let _ = match self {
            DateToken::Year => write!(out, "{:04}", when.year()),
            DateToken::Month => write!(out, "{:02}", when.month()),
            DateToken::Day => write!(out, "{:02}", when.day()),
            DateToken::Hour => write!(out, "{:02}", when.hour()),
            DateToken::Minute => write!(out, "{:02}", when.minute()),
            DateToken::Second => write!(out, "{:02}", when.second()),
        };
    }
}

/// Substitute YYYY, MM, DD, hh, mm and ss in `format` with fields of `when`.
///
/// Tokens are case sensitive (`MM` is the month, `mm` the minute) and every
/// occurrence is replaced. Everything else is copied through unchanged.
pub fn format_date<T: Datelike + Timelike>(format: &str, when: &T) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;

    'scan: while let Some(ch) = rest.chars().next() {
        for token in DateToken::ALL {
            if let Some(tail) = rest.strip_prefix(token.pattern()) {
                token.render(when, &mut out);
                rest = tail;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
