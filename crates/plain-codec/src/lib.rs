//! # plain-codec
//!
//! Encoder and decoder for a small JSON-like text format over plain values:
//! null, booleans, integers, floats, strings, sequences and string-keyed
//! mappings that keep their insertion order.
//!
//! The format is deliberately narrow. Strings escape only `\` and `"`, numbers
//! never use exponents, and there are no comments. In return the decoder is a
//! short recursive descent with a depth-aware splitter.
//!
//! ## Quick start
//!
//! ```rust
//! use plain_codec::{decode, encode, Value};
//!
//! let text = r#"{"name":"A\"B","n":2}"#;
//! let value = decode(text).unwrap();
//! assert_eq!(value.get("name"), Some(&Value::from("A\"B")));
//! assert_eq!(value.get("n"), Some(&Value::Integer(2)));
//!
//! assert_eq!(encode(&value, None).unwrap(), text);
//! ```
//!
//! ## Modules
//!
//! - [`types`] — the `Value` model
//! - [`encoder`] — `Value` → text, compact or indented
//! - [`decoder`] — text → `Value`, with an optional depth ceiling
//! - [`ser`] / [`de`] — serde adapters between host types and `Value`
//! - [`json`] — JSON documents to text and back
//! - [`error`] — error types

pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod ser;
pub mod types;

pub use de::{from_text, from_value};
pub use decoder::{decode, Decoder};
pub use encoder::encode;
pub use error::{CodecError, ErrorKind, Result};
pub use json::{json_to_text, text_to_json};
pub use ser::{to_text, to_value};
pub use types::Value;
