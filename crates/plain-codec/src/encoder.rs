//! Encoder: turns a [`Value`] tree into text.
//!
//! Two layouts share one scalar encoding:
//!
//! - **Compact** (`indent = None`): `{"a":1,"b":[true,null]}`, no inserted whitespace
//! - **Indented** (`indent = Some(n)`): one element or pair per line, `n` extra
//!   spaces per nesting level, `key: value` inside mappings, empty containers
//!   stay `[]` / `{}`
//!
//! Strings escape only `\` and `"`. Every other character, newlines included,
//! is written literally between the quotes.
//!
//! # Example
//! ```
//! use plain_codec::{encode, Value};
//! let value = Value::mapping([("name", Value::from("A\"B")), ("n", Value::from(2))]);
//! assert_eq!(encode(&value, None).unwrap(), r#"{"name":"A\"B","n":2}"#);
//! assert_eq!(encode(&value, Some(2)).unwrap(), "{\n  \"name\": \"A\\\"B\",\n  \"n\": 2\n}");
//! ```

use crate::error::{CodecError, Result};
use crate::types::Value;

/// Encode a value as text, compact when `indent` is `None`.
///
/// Fails with a type error if the tree holds a NaN or infinite float, which
/// has no textual form in this format.
pub fn encode(value: &Value, indent: Option<usize>) -> Result<String> {
    tracing::trace!(indent = ?indent, "encoding value");
    let mut out = String::new();
    match indent {
        None => encode_compact(value, &mut out)?,
        Some(step) => encode_indented(value, step, 0, &mut out)?,
    }
    Ok(out)
}

fn encode_compact(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_compact(item, out)?;
            }
            out.push(']');
        }
        Value::Mapping(pairs) => {
            out.push('{');
            for (i, (key, val)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(key, out);
                out.push(':');
                encode_compact(val, out)?;
            }
            out.push('}');
        }
        scalar => encode_scalar(scalar, out)?,
    }
    Ok(())
}

/// Indented layout. `current` is the column of the enclosing bracket; children
/// sit at `current + step` and the closing bracket returns to `current`.
fn encode_indented(value: &Value, step: usize, current: usize, out: &mut String) -> Result<()> {
    let inner = current + step;
    match value {
        Value::Sequence(items) if items.is_empty() => out.push_str("[]"),
        Value::Mapping(pairs) if pairs.is_empty() => out.push_str("{}"),
        Value::Sequence(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                push_spaces(inner, out);
                encode_indented(item, step, inner, out)?;
            }
            out.push('\n');
            push_spaces(current, out);
            out.push(']');
        }
        Value::Mapping(pairs) => {
            out.push_str("{\n");
            for (i, (key, val)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                push_spaces(inner, out);
                encode_string(key, out);
                out.push_str(": ");
                encode_indented(val, step, inner, out)?;
            }
            out.push('\n');
            push_spaces(current, out);
            out.push('}');
        }
        scalar => encode_scalar(scalar, out)?,
    }
    Ok(())
}

fn encode_scalar(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)?),
        Value::String(s) => encode_string(s, out),
        // containers in scalar position
        Value::Sequence(_) | Value::Mapping(_) => encode_compact(value, out)?,
    }
    Ok(())
}

/// Format a float in plain decimal notation.
///
/// `Display` for `f64` never uses exponents and prints the shortest digits
/// that parse back to the same value. Whole floats get a trailing `.0` so
/// they decode as floats rather than integers.
fn format_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(CodecError::unsupported(format!(
            "float {f} has no textual representation"
        )));
    }
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    Ok(s)
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn push_spaces(n: usize, out: &mut String) {
    out.extend(std::iter::repeat_n(' ', n));
}
