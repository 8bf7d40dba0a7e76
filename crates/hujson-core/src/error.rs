//! Parse diagnostics.
//!
//! Every failure is a single one-line message of the form
//! `hujson: line L, column C: <kind>`, where `line` and `column` are 1-based
//! and the column counts bytes. Offending characters are rendered the way
//! they would appear in source: printable ASCII verbatim, broken or
//! non-printable bytes as `\xNN`, and decoded non-ASCII code points as
//! `\uNNNN` or `\UNNNNNNNN`.

use crate::types::Value;
use thiserror::Error;

/// Convenience alias used throughout hujson-core.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A positioned parse failure.
///
/// `partial` is the best-effort tree built before the failure: completed
/// siblings and ancestors are present, and offsets on nodes the parser never
/// finished stay zero. Callers inspecting it should refresh offsets with
/// [`Value::update_offsets`] before relying on positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hujson: line {line}, column {column}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ErrorKind,
    pub partial: Value,
}

/// What went wrong, positioned at the offending byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid character '{0}' at start of value")]
    InvalidCharAtValueStart(String),
    #[error("invalid character '{0}' at start of object name")]
    InvalidCharAtNameStart(String),
    #[error("invalid character '{0}' after top-level value")]
    InvalidCharAfterTopLevel(String),
    #[error("invalid character '{0}' after object name")]
    InvalidCharAfterName(String),
    #[error("invalid character '{0}' after object value (expecting ',' or '}}')")]
    InvalidCharAfterMemberValue(String),
    #[error("invalid character '{0}' after array value (expecting ',' or ']')")]
    InvalidCharAfterElement(String),
    /// A run of bytes that lexes as no keyword, number, string, or key.
    #[error("invalid literal: {0}")]
    InvalidLiteral(String),
    #[error("invalid UTF-8 in comment")]
    InvalidCommentUtf8,
    /// Truncated input, wrapped in the context that was being parsed.
    #[error("parsing {0}: unexpected EOF")]
    UnexpectedEof(&'static str),
}

/// A failure before line/column resolution: the parser works in byte
/// offsets and converts once, at the top, where the partial tree is known.
#[derive(Debug)]
pub(crate) struct RawError {
    pub(crate) offset: usize,
    pub(crate) kind: ErrorKind,
}

/// Render the character starting at `rest[0]` for an `invalid character`
/// message.
pub(crate) fn render_char(rest: &[u8]) -> String {
    let Some(&first) = rest.first() else {
        return String::new();
    };
    if first < 0x80 {
        return match first {
            b'\'' => "\\'".to_owned(),
            b'\\' => "\\\\".to_owned(),
            0x20..=0x7e => (first as char).to_string(),
            _ => format!("\\x{first:02x}"),
        };
    }
    match decode_char(rest) {
        Some(c) if (c as u32) <= 0xffff => format!("\\u{:04x}", c as u32),
        Some(c) => format!("\\U{:08x}", c as u32),
        None => format!("\\x{first:02x}"),
    }
}

/// Render a whole literal run for an `invalid literal` message: valid UTF-8
/// passes through, everything else falls back to `\xNN`.
pub(crate) fn render_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if (0x20..=0x7e).contains(&b) {
            out.push(b as char);
            i += 1;
        } else if b < 0x80 {
            out.push_str(&format!("\\x{b:02x}"));
            i += 1;
        } else if let Some(c) = decode_char(&bytes[i..]) {
            out.push(c);
            i += c.len_utf8();
        } else {
            out.push_str(&format!("\\x{b:02x}"));
            i += 1;
        }
    }
    out
}

/// Decode the UTF-8 character starting at `rest[0]`, if there is one.
fn decode_char(rest: &[u8]) -> Option<char> {
    let len = match *rest.first()? {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return None,
    };
    let head = rest.get(..len)?;
    std::str::from_utf8(head).ok()?.chars().next()
}
