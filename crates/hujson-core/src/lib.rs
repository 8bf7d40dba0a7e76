//! # hujson-core
//!
//! Lossless parser, printer, and transformer for **HuJSON** — the JSON
//! superset that additionally allows `//` and `/* */` comments, one optional
//! trailing comma per object or array, and identifier-like unquoted object
//! keys.
//!
//! Parsing preserves every byte of the input: whitespace and comments are
//! kept as [`Extra`] runs attached to each node, leaf values keep their
//! exact source spelling, and every node records its byte offsets into the
//! original text, so [`Value::pack`] reproduces the document exactly.
//!
//! ## Quick start
//!
//! ```rust
//! use hujson_core::parse;
//!
//! let src = b" { pos: {x: 1, y: 2}, } ";
//! let value = parse(src).unwrap();
//! assert_eq!(value.pack(), src);
//!
//! // Formatting-preserving Standard JSON: keys quoted, trailing comma gone.
//! let mut standard = value.clone();
//! standard.standardize();
//! assert_eq!(standard.to_string(), " { \"pos\": {\"x\": 1, \"y\": 2} } ");
//!
//! // Minimal form: extras and trailing commas stripped, spelling kept.
//! let mut minimal = value.clone();
//! minimal.minimize();
//! assert_eq!(minimal.to_string(), "{pos:{x:1,y:2}}");
//! ```
//!
//! Parse errors are one-line positioned diagnostics, and the error still
//! carries the partial tree built before the failure:
//!
//! ```rust
//! let err = hujson_core::parse(b" null,").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "hujson: line 1, column 6: invalid character ',' after top-level value",
//! );
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — [`parse`]: bytes → tree, with partial-tree error recovery
//! - [`types`] — the [`Value`] tree model
//! - [`error`] — [`ParseError`] and its kinds
//!
//! Packing ([`Value::pack`], [`Value::pack_with_quoted_keys`]), offset
//! refresh ([`Value::update_offsets`]), and the in-place transforms
//! ([`Value::minimize`], [`Value::standardize`], [`Value::is_standard`])
//! are inherent methods on [`Value`].

pub mod error;
mod packer;
pub mod parser;
mod scanner;
mod transform;
pub mod types;

pub use error::{ErrorKind, ParseError, Result};
pub use parser::parse;
pub use types::{Array, Extra, Literal, Object, ObjectMember, Payload, Value};
