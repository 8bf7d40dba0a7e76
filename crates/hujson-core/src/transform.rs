//! In-place transforms between HuJSON and Standard JSON.

use crate::types::{Extra, Literal, Payload, Value};
use memchr::memchr;

impl Value {
    /// Whether the tree is already plain RFC 8259 JSON: no comments anywhere,
    /// no trailing commas, and no unquoted object names.
    pub fn is_standard(&self) -> bool {
        if self.before_extra.has_comment() || self.after_extra.has_comment() {
            return false;
        }
        match &self.payload {
            Payload::Literal(_) => true,
            Payload::Object(obj) => {
                !obj.trailing_comma
                    && !obj.after_extra.has_comment()
                    && obj.members.iter().all(|member| {
                        let name_quoted = match &member.name.payload {
                            Payload::Literal(lit) => !lit.is_unquoted_key(),
                            _ => true,
                        };
                        name_quoted && member.name.is_standard() && member.value.is_standard()
                    })
            }
            Payload::Array(arr) => {
                !arr.trailing_comma
                    && !arr.after_extra.has_comment()
                    && arr.elements.iter().all(Value::is_standard)
            }
        }
    }

    /// Reduce to the minimal Standard JSON form: every extra cleared, every
    /// trailing comma dropped. Literals keep their source spelling (strings
    /// their escapes, numbers their notation, unquoted keys their bareness)
    /// and offsets are refreshed on exit.
    pub fn minimize(&mut self) {
        self.minimize_tree();
        self.update_offsets();
    }

    fn minimize_tree(&mut self) {
        self.before_extra.clear();
        match &mut self.payload {
            Payload::Literal(_) => {}
            Payload::Object(obj) => {
                for member in &mut obj.members {
                    member.name.minimize_tree();
                    member.value.minimize_tree();
                }
                obj.after_extra.clear();
                obj.trailing_comma = false;
            }
            Payload::Array(arr) => {
                for element in &mut arr.elements {
                    element.minimize_tree();
                }
                arr.after_extra.clear();
                arr.trailing_comma = false;
            }
        }
        self.after_extra.clear();
    }

    /// Rewrite to Standard JSON while keeping the visual layout: comment
    /// glyphs become spaces (whitespace inside comments survives as-is),
    /// unquoted keys gain quotes, trailing commas are dropped. Offsets are
    /// refreshed on exit.
    ///
    /// A trailing comma glued to the last child is removed outright; one
    /// separated from it by extras is blanked to a space instead, keeping
    /// the closing bracket in its column.
    pub fn standardize(&mut self) {
        self.standardize_tree();
        self.update_offsets();
    }

    fn standardize_tree(&mut self) {
        self.before_extra.standardize();
        match &mut self.payload {
            Payload::Literal(lit) => {
                if lit.is_unquoted_key() {
                    lit.quote();
                }
            }
            Payload::Object(obj) => {
                for member in &mut obj.members {
                    member.name.standardize_tree();
                    member.value.standardize_tree();
                }
                if obj.trailing_comma {
                    if let Some(last) = obj.members.last_mut() {
                        fold_trailing_comma(&mut last.value.after_extra, &mut obj.after_extra);
                    }
                    obj.trailing_comma = false;
                }
                obj.after_extra.standardize();
            }
            Payload::Array(arr) => {
                for element in &mut arr.elements {
                    element.standardize_tree();
                }
                if arr.trailing_comma {
                    if let Some(last) = arr.elements.last_mut() {
                        fold_trailing_comma(&mut last.after_extra, &mut arr.after_extra);
                    }
                    arr.trailing_comma = false;
                }
                arr.after_extra.standardize();
            }
        }
        self.after_extra.standardize();
    }
}

/// Drop a composite's trailing comma. When extras sit between the last child
/// and the comma, they migrate into the composite's `after_extra` with one
/// space standing in for the comma byte; a comma directly after the child
/// just disappears.
fn fold_trailing_comma(last_after: &mut Extra, composite_after: &mut Extra) {
    if last_after.is_empty() {
        return;
    }
    let mut folded = std::mem::take(&mut last_after.0);
    folded.push(b' ');
    folded.append(&mut composite_after.0);
    composite_after.0 = folded;
}

impl Extra {
    /// In a valid extra a slash can only start a comment.
    fn has_comment(&self) -> bool {
        memchr(b'/', &self.0).is_some()
    }

    /// Replace every byte that is not plain whitespace with a single space,
    /// byte-wise, so the extra's length and its line structure survive.
    fn standardize(&mut self) {
        for b in &mut self.0 {
            if !matches!(*b, b' ' | b'\t' | b'\r' | b'\n') {
                *b = b' ';
            }
        }
    }
}

impl Literal {
    /// Wrap the literal's bytes in double quotes.
    fn quote(&mut self) {
        let mut quoted = Vec::with_capacity(self.0.len() + 2);
        quoted.push(b'"');
        quoted.extend_from_slice(&self.0);
        quoted.push(b'"');
        self.0 = quoted;
    }
}
