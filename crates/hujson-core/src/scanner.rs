//! Byte-level scanning: extras (whitespace and comments), literal
//! recognizers, and source positions.
//!
//! The scanner is position-agnostic: it reports *what* a run of bytes lexes
//! as ([`LiteralKind`]) and leaves the decision of whether that kind is
//! legal here to the parser. All errors carry a frozen byte offset; comment
//! errors are pinned to the comment's first slash, truncation errors to the
//! end of input.

use crate::error::{render_literal, ErrorKind, RawError};
use memchr::{memchr, memchr_iter, memrchr};

/// Classification of a successfully scanned literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LiteralKind {
    Keyword,
    Number,
    String,
    UnquotedKey,
}

/// First byte of an unquoted object key.
pub(crate) fn is_unquoted_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Continuation byte of an unquoted object key.
pub(crate) fn is_unquoted_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'(' | b')')
}

/// Byte that can appear in a literal-looking run; used to bound the text
/// quoted by `invalid literal` diagnostics.
fn is_literal_run_byte(b: u8) -> bool {
    is_unquoted_key_byte(b) || matches!(b, b'+' | b'-')
}

/// Resolve a byte offset to a 1-based `(line, column)` pair. Columns count
/// bytes; only `\n` starts a new line.
pub(crate) fn position(input: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let prefix = &input[..offset];
    let line = 1 + memchr_iter(b'\n', prefix).count();
    let line_start = memrchr(b'\n', prefix).map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

pub(crate) struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// The unconsumed remainder of the input.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    /// An `unexpected EOF` error frozen at the cursor.
    pub(crate) fn eof_here(&self, context: &'static str) -> RawError {
        RawError {
            offset: self.pos,
            kind: ErrorKind::UnexpectedEof(context),
        }
    }

    /// Consume any run of whitespace and comments, returning the consumed
    /// bytes verbatim.
    pub(crate) fn consume_extra(&mut self) -> Result<Vec<u8>, RawError> {
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.bump(),
                Some(b'/') => match self.input.get(self.pos + 1).copied() {
                    Some(b'/') => self.consume_line_comment()?,
                    Some(b'*') => self.consume_block_comment()?,
                    // A lone slash is not an extra; leave it for the caller.
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(self.input[start..self.pos].to_vec())
    }

    /// Consume `//...` through its terminating newline. The cursor sits on
    /// the first slash.
    fn consume_line_comment(&mut self) -> Result<(), RawError> {
        let comment = self.pos;
        let body = &self.input[self.pos + 2..];
        let Some(newline) = memchr(b'\n', body) else {
            return Err(RawError {
                offset: comment,
                kind: ErrorKind::UnexpectedEof("comment"),
            });
        };
        if std::str::from_utf8(&body[..newline]).is_err() {
            return Err(RawError {
                offset: comment,
                kind: ErrorKind::InvalidCommentUtf8,
            });
        }
        self.pos += 2 + newline + 1;
        Ok(())
    }

    /// Consume `/* ... */`. The cursor sits on the slash.
    fn consume_block_comment(&mut self) -> Result<(), RawError> {
        let comment = self.pos;
        let body = &self.input[self.pos + 2..];
        let Some(end) = find_block_comment_end(body) else {
            return Err(RawError {
                offset: comment,
                kind: ErrorKind::UnexpectedEof("comment"),
            });
        };
        if std::str::from_utf8(&body[..end]).is_err() {
            return Err(RawError {
                offset: comment,
                kind: ErrorKind::InvalidCommentUtf8,
            });
        }
        self.pos += 2 + end + 2;
        Ok(())
    }

    /// Scan one literal at the cursor. On success the cursor sits one past
    /// it and the returned slice covers it exactly.
    pub(crate) fn scan_literal(&mut self) -> Result<(&'a [u8], LiteralKind), RawError> {
        match self.peek() {
            None => Err(self.eof_here("value")),
            Some(b'"') => self.scan_string(),
            Some(b'-' | b'+' | b'0'..=b'9') => self.scan_number(),
            Some(b) if is_unquoted_key_start(b) => Ok(self.scan_identifier()),
            Some(_) => Err(RawError {
                offset: self.pos,
                kind: ErrorKind::InvalidCharAtValueStart(crate::error::render_char(self.rest())),
            }),
        }
    }

    /// A string literal, quotes included. Escape sequences, control bytes,
    /// and UTF-8 are validated once the closing quote is found; truncation
    /// is reported at the end of input.
    fn scan_string(&mut self) -> Result<(&'a [u8], LiteralKind), RawError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.peek() {
                None => return Err(self.eof_at_end("string")),
                Some(b'\\') => {
                    self.bump();
                    if self.peek().is_none() {
                        return Err(self.eof_at_end("string"));
                    }
                    self.bump();
                }
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(_) => self.bump(),
            }
        }
        let literal = &self.input[start..self.pos];
        if !valid_string_literal(literal) {
            return Err(RawError {
                offset: start,
                kind: ErrorKind::InvalidLiteral(render_literal(literal)),
            });
        }
        Ok((literal, LiteralKind::String))
    }

    /// An RFC 8259 number. Anything number-shaped that violates the grammar
    /// (leading `+`, leading zero, trailing identifier bytes) is reported as
    /// one `invalid literal` run.
    fn scan_number(&mut self) -> Result<(&'a [u8], LiteralKind), RawError> {
        let start = self.pos;
        if !self.scan_number_grammar() {
            self.pos = start;
            let run = self.take_literal_run();
            return Err(RawError {
                offset: start,
                kind: ErrorKind::InvalidLiteral(render_literal(run)),
            });
        }
        Ok((&self.input[start..self.pos], LiteralKind::Number))
    }

    fn scan_number_grammar(&mut self) -> bool {
        if self.peek() == Some(b'-') {
            self.bump();
        }
        match self.peek() {
            Some(b'0') => self.bump(),
            Some(b'1'..=b'9') => self.take_digits(),
            _ => return false,
        }
        if self.peek() == Some(b'.') {
            self.bump();
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return false;
            }
            self.take_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.bump();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return false;
            }
            self.take_digits();
        }
        // A digit glued to more literal bytes ("1xy", "01") is one bad run.
        !matches!(self.peek(), Some(b) if is_literal_run_byte(b))
    }

    fn take_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.bump();
        }
    }

    /// An identifier-like run: either an exact keyword or an unquoted key.
    fn scan_identifier(&mut self) -> (&'a [u8], LiteralKind) {
        let start = self.pos;
        self.bump();
        while matches!(self.peek(), Some(b) if is_unquoted_key_byte(b)) {
            self.bump();
        }
        let run = &self.input[start..self.pos];
        let kind = if run == b"null" || run == b"true" || run == b"false" {
            LiteralKind::Keyword
        } else {
            LiteralKind::UnquotedKey
        };
        (run, kind)
    }

    /// Consume the maximal literal-looking run at the cursor, for error
    /// reporting.
    fn take_literal_run(&mut self) -> &'a [u8] {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if is_literal_run_byte(b)) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Truncation error at the end of input (not at the construct's start:
    /// the whole rest of the input was consumed looking for the terminator).
    fn eof_at_end(&self, context: &'static str) -> RawError {
        RawError {
            offset: self.input.len(),
            kind: ErrorKind::UnexpectedEof(context),
        }
    }
}

/// Find the offset of `*/` within a block-comment body.
fn find_block_comment_end(body: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(star) = memchr(b'*', &body[from..]) {
        let at = from + star;
        if body.get(at + 1) == Some(&b'/') {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

/// Validate a complete string literal (quotes included): escape sequences,
/// no raw control bytes, valid UTF-8.
fn valid_string_literal(literal: &[u8]) -> bool {
    let body = &literal[1..literal.len() - 1];
    let mut i = 0;
    while i < body.len() {
        let b = body[i];
        if b == b'\\' {
            match body.get(i + 1) {
                Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => i += 2,
                Some(b'u') => {
                    let Some(hex) = body.get(i + 2..i + 6) else {
                        return false;
                    };
                    if !hex.iter().all(u8::is_ascii_hexdigit) {
                        return false;
                    }
                    i += 6;
                }
                _ => return false,
            }
        } else if b < 0x20 {
            return false;
        } else {
            i += 1;
        }
    }
    std::str::from_utf8(body).is_ok()
}
