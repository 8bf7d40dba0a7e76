//! Byte-exact serialization of the syntax tree, plus offset refresh.

use crate::types::{Payload, Value};
use std::fmt;

impl Value {
    /// Serialize the value as HuJSON.
    ///
    /// The output is valid HuJSON as long as every extra and literal in the
    /// tree is valid for its position, and it never aliases the tree's own
    /// buffers. A freshly parsed tree packs back to the input byte for byte.
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.append_to(&mut out, false);
        out
    }

    /// Like [`Value::pack`], but unquoted-key literals are emitted wrapped
    /// in double quotes.
    pub fn pack_with_quoted_keys(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.append_to(&mut out, true);
        out
    }

    fn append_to(&self, out: &mut Vec<u8>, quote_keys: bool) {
        out.extend_from_slice(self.before_extra.as_bytes());
        match &self.payload {
            Payload::Literal(lit) => {
                if quote_keys && lit.is_unquoted_key() {
                    out.push(b'"');
                    out.extend_from_slice(lit.as_bytes());
                    out.push(b'"');
                } else {
                    out.extend_from_slice(lit.as_bytes());
                }
            }
            Payload::Object(obj) => {
                out.push(b'{');
                for member in &obj.members {
                    member.name.append_to(out, quote_keys);
                    out.push(b':');
                    member.value.append_to(out, quote_keys);
                    out.push(b',');
                }
                if !obj.members.is_empty() && !obj.trailing_comma {
                    out.pop();
                }
                out.extend_from_slice(obj.after_extra.as_bytes());
                out.push(b'}');
            }
            Payload::Array(arr) => {
                out.push(b'[');
                for element in &arr.elements {
                    element.append_to(out, quote_keys);
                    out.push(b',');
                }
                if !arr.elements.is_empty() && !arr.trailing_comma {
                    out.pop();
                }
                out.extend_from_slice(arr.after_extra.as_bytes());
                out.push(b']');
            }
        }
        out.extend_from_slice(self.after_extra.as_bytes());
    }

    /// Recompute every `start_offset`/`end_offset` in the tree so they match
    /// what [`Value::pack`] would emit. Call after structural edits; parsing
    /// leaves offsets fresh already.
    pub fn update_offsets(&mut self) {
        self.update_offsets_from(0);
    }

    /// Thread a running byte count through the node, mirroring the packer's
    /// emission order (including the interior-comma rule).
    fn update_offsets_from(&mut self, mut n: usize) -> usize {
        n += self.before_extra.len();
        self.start_offset = n;
        match &mut self.payload {
            Payload::Literal(lit) => n += lit.len(),
            Payload::Object(obj) => {
                n += 1; // '{'
                for member in &mut obj.members {
                    n = member.name.update_offsets_from(n);
                    n += 1; // ':'
                    n = member.value.update_offsets_from(n);
                    n += 1; // ','
                }
                if !obj.members.is_empty() && !obj.trailing_comma {
                    n -= 1;
                }
                n += obj.after_extra.len();
                n += 1; // '}'
            }
            Payload::Array(arr) => {
                n += 1; // '['
                for element in &mut arr.elements {
                    n = element.update_offsets_from(n);
                    n += 1; // ','
                }
                if !arr.elements.is_empty() && !arr.trailing_comma {
                    n -= 1;
                }
                n += arr.after_extra.len();
                n += 1; // ']'
            }
        }
        self.end_offset = n;
        n + self.after_extra.len()
    }
}

impl fmt::Display for Value {
    /// The packed bytes, decoded lossily as UTF-8.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.pack()))
    }
}
