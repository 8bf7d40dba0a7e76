//! Recursive-descent parser over the HuJSON grammar.
//!
//! ```text
//! Document  := Extras Value Extras EOF
//! Value     := String | Number | Keyword | Object | Array
//! Object    := '{' Members? Extras '}'
//! Members   := Member (',' Member)* ','?
//! Member    := Extras Name Extras ':' Extras Value Extras
//! Array     := '[' Elements? Extras ']'
//! Elements  := Value (',' Value)* ','?
//! Name      := String | UnquotedKey
//! ```
//!
//! Extras attach to the nearest adjacent value: what precedes a value is its
//! `before_extra`, what separates a value from the following comma is its
//! `after_extra`, and what sits between the last child (or a trailing comma)
//! and the closing bracket is the composite's `after_extra`.
//!
//! Composites are installed in the tree before their children are parsed and
//! children are appended as soon as their value completes, so a failing parse
//! still hands back every finished sibling and ancestor.

use crate::error::{render_char, render_literal, ErrorKind, ParseError, RawError};
use crate::scanner::{position, LiteralKind, Scanner};
use crate::types::{Array, Extra, Literal, Object, ObjectMember, Payload, Value};

/// Parse a HuJSON document.
///
/// Exactly one error is reported per input; on failure the returned
/// [`ParseError`] carries the positioned diagnostic together with the
/// best-effort partial tree in [`ParseError::partial`].
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    let mut parser = Parser {
        scanner: Scanner::new(input),
    };
    let mut root = Value::default();
    match parser.parse_document(&mut root) {
        Ok(()) => Ok(root),
        Err(raw) => {
            let (line, column) = position(input, raw.offset);
            Err(ParseError {
                line,
                column,
                kind: raw.kind,
                partial: root,
            })
        }
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    fn parse_document(&mut self, root: &mut Value) -> Result<(), RawError> {
        root.before_extra = Extra(self.scanner.consume_extra()?);
        self.parse_value(root)?;
        root.after_extra = Extra(self.scanner.consume_extra()?);
        match self.scanner.peek() {
            None => Ok(()),
            Some(_) => Err(self.invalid_char(ErrorKind::InvalidCharAfterTopLevel)),
        }
    }

    /// Parse one value into `v`, whose `before_extra` the caller has already
    /// filled. `end_offset` is only assigned once the value completes.
    fn parse_value(&mut self, v: &mut Value) -> Result<(), RawError> {
        v.start_offset = self.scanner.pos();
        match self.scanner.peek() {
            Some(b'{') => self.parse_object(v)?,
            Some(b'[') => self.parse_array(v)?,
            _ => {
                let start = self.scanner.pos();
                let (bytes, kind) = self.scanner.scan_literal()?;
                if kind == LiteralKind::UnquotedKey {
                    // Identifier runs are only meaningful as object names.
                    return Err(RawError {
                        offset: start,
                        kind: ErrorKind::InvalidLiteral(render_literal(bytes)),
                    });
                }
                v.payload = Payload::Literal(Literal(bytes.to_vec()));
            }
        }
        v.end_offset = self.scanner.pos();
        Ok(())
    }

    fn parse_object(&mut self, v: &mut Value) -> Result<(), RawError> {
        let mut obj = Object::default();
        let result = self.parse_object_members(&mut obj);
        v.payload = Payload::Object(obj);
        result
    }

    fn parse_object_members(&mut self, obj: &mut Object) -> Result<(), RawError> {
        self.scanner.bump(); // '{'
        loop {
            // Start of a member, or the close after zero members or after a
            // trailing comma.
            let extra = Extra(self.scanner.consume_extra()?);
            if self.scanner.peek() == Some(b'}') {
                obj.after_extra = extra;
                obj.trailing_comma = !obj.members.is_empty();
                self.scanner.bump();
                return Ok(());
            }
            let mut name = Value {
                before_extra: extra,
                ..Value::default()
            };
            self.parse_name(&mut name)?;
            name.after_extra = Extra(self.scanner.consume_extra()?);
            match self.scanner.peek() {
                Some(b':') => self.scanner.bump(),
                None => return Err(self.scanner.eof_here("object after name")),
                Some(_) => return Err(self.invalid_char(ErrorKind::InvalidCharAfterName)),
            }
            let mut value = Value {
                before_extra: Extra(self.scanner.consume_extra()?),
                ..Value::default()
            };
            self.parse_value(&mut value)?;
            obj.members.push(ObjectMember { name, value });
            let after = Extra(self.scanner.consume_extra()?);
            match self.scanner.peek() {
                None => return Err(self.scanner.eof_here("object after value")),
                Some(b',') => {
                    self.scanner.bump();
                    if let Some(last) = obj.members.last_mut() {
                        last.value.after_extra = after;
                    }
                }
                Some(b'}') => {
                    obj.after_extra = after;
                    self.scanner.bump();
                    return Ok(());
                }
                Some(_) => return Err(self.invalid_char(ErrorKind::InvalidCharAfterMemberValue)),
            }
        }
    }

    /// Parse an object name: a string or an unquoted key. A literal of any
    /// other kind is rejected at its first byte.
    fn parse_name(&mut self, name: &mut Value) -> Result<(), RawError> {
        name.start_offset = self.scanner.pos();
        if self.scanner.peek().is_none() {
            return Err(self.scanner.eof_here("unquoted key"));
        }
        let start = self.scanner.pos();
        let rest = self.scanner.rest();
        let (bytes, kind) = self.scanner.scan_literal()?;
        match kind {
            LiteralKind::String | LiteralKind::UnquotedKey => {
                name.payload = Payload::Literal(Literal(bytes.to_vec()));
                name.end_offset = self.scanner.pos();
                Ok(())
            }
            LiteralKind::Keyword | LiteralKind::Number => Err(RawError {
                offset: start,
                kind: ErrorKind::InvalidCharAtNameStart(render_char(rest)),
            }),
        }
    }

    fn parse_array(&mut self, v: &mut Value) -> Result<(), RawError> {
        let mut arr = Array::default();
        let result = self.parse_array_elements(&mut arr);
        v.payload = Payload::Array(arr);
        result
    }

    fn parse_array_elements(&mut self, arr: &mut Array) -> Result<(), RawError> {
        self.scanner.bump(); // '['
        loop {
            let extra = Extra(self.scanner.consume_extra()?);
            if self.scanner.peek() == Some(b']') {
                arr.after_extra = extra;
                arr.trailing_comma = !arr.elements.is_empty();
                self.scanner.bump();
                return Ok(());
            }
            let mut element = Value {
                before_extra: extra,
                ..Value::default()
            };
            self.parse_value(&mut element)?;
            arr.elements.push(element);
            let after = Extra(self.scanner.consume_extra()?);
            match self.scanner.peek() {
                None => return Err(self.scanner.eof_here("array after value")),
                Some(b',') => {
                    self.scanner.bump();
                    if let Some(last) = arr.elements.last_mut() {
                        last.after_extra = after;
                    }
                }
                Some(b']') => {
                    arr.after_extra = after;
                    self.scanner.bump();
                    return Ok(());
                }
                Some(_) => return Err(self.invalid_char(ErrorKind::InvalidCharAfterElement)),
            }
        }
    }

    /// An `invalid character` error for the byte at the cursor.
    fn invalid_char(&self, kind: fn(String) -> ErrorKind) -> RawError {
        RawError {
            offset: self.scanner.pos(),
            kind: kind(render_char(self.scanner.rest())),
        }
    }
}
