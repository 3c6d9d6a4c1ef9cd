//! Decoder: turns text back into a [`Value`] tree.
//!
//! Recursive descent over trimmed text. Each level classifies the whole text by
//! its shape, tried in order:
//!
//! 1. `null`, `true`, `false`
//! 2. numeric literal: optional `-`, ASCII digits, at most one `.` (a `.` makes it a float)
//! 3. `"…"` → string, unescaping `\\` and `\"`
//! 4. `[…]` → sequence, body split by the top-level splitter
//! 5. `{…}` → mapping, each segment split on its first top-level `:`
//!
//! Anything else is a format error carrying the text that failed.
//!
//! # Top-level splitting
//!
//! Container bodies are split on commas that sit outside any string and at
//! bracket depth zero. A `"` toggles the in-string state unless the byte
//! before it is a backslash. That rule misreads an escaped backslash followed
//! by a closing quote (`"a\\"`) as an escaped quote; text already stored in
//! this format depends on the exact rule, so it is kept.
//!
//! Unterminated strings or brackets are not reported separately: the
//! remainder of the body becomes one segment and fails classification.

use std::collections::HashMap;

use crate::error::{CodecError, Result};
use crate::types::Value;

/// Decode text into a value with no nesting limit.
///
/// Equivalent to `Decoder::new().decode(text)`.
pub fn decode(text: &str) -> Result<Value> {
    Decoder::new().decode(text)
}

/// Decoder configuration.
///
/// Recursion follows the nesting of the input, one stack frame per level.
/// Services decoding untrusted text should set [`Decoder::max_depth`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    max_depth: Option<usize>,
}

impl Decoder {
    /// An unbounded decoder.
    pub const fn new() -> Self {
        Self { max_depth: None }
    }

    /// Reject text whose sequences/mappings nest deeper than `limit` levels.
    /// A top-level `[1]` is depth 1.
    pub const fn max_depth(self, limit: usize) -> Self {
        Self {
            max_depth: Some(limit),
        }
    }

    pub fn decode(&self, text: &str) -> Result<Value> {
        tracing::trace!(len = text.len(), "decoding text");
        self.decode_at(text, 0).inspect_err(|err| {
            tracing::debug!(error = %err, "decode failed");
        })
    }

    fn decode_at(&self, text: &str, depth: usize) -> Result<Value> {
        let s = text.trim();

        match s {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }

        if let Some(number) = parse_number(s)? {
            return Ok(number);
        }

        if let Some(body) = strip_delimiters(s, '"', '"') {
            return Ok(Value::String(unescape_string(body)));
        }

        if let Some(body) = strip_delimiters(s, '[', ']') {
            let depth = self.enter(depth, s)?;
            let items = split_top_level(body)
                .into_iter()
                .map(|segment| self.decode_at(segment, depth))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Value::Sequence(items));
        }

        if let Some(body) = strip_delimiters(s, '{', '}') {
            let depth = self.enter(depth, s)?;
            return self.decode_mapping(body, depth);
        }

        Err(CodecError::format("unrecognized text", s))
    }

    fn decode_mapping(&self, body: &str, depth: usize) -> Result<Value> {
        let mut pairs: Vec<(String, Value)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for segment in split_top_level(body) {
            let (key_text, value_text) = split_key_value(segment)
                .ok_or_else(|| CodecError::format("expected ':' between key and value", segment))?;
            let key = match self.decode_at(key_text, depth)? {
                Value::String(key) => key,
                _ => {
                    return Err(CodecError::format(
                        "mapping key must be a string",
                        key_text.trim(),
                    ))
                }
            };
            let value = self.decode_at(value_text, depth)?;

            // A repeated key overwrites the earlier value in place.
            match positions.get(&key) {
                Some(&idx) => pairs[idx].1 = value,
                None => {
                    positions.insert(key.clone(), pairs.len());
                    pairs.push((key, value));
                }
            }
        }

        Ok(Value::Mapping(pairs))
    }

    /// Step one container level deeper, enforcing `max_depth`.
    fn enter(&self, depth: usize, text: &str) -> Result<usize> {
        let depth = depth + 1;
        match self.max_depth {
            Some(limit) if depth > limit => Err(CodecError::format(
                format!("nesting exceeds maximum depth of {limit}"),
                text,
            )),
            _ => Ok(depth),
        }
    }
}

/// Classify and parse a numeric literal.
///
/// Returns `Ok(None)` when `s` is not shaped like a number at all, so the
/// caller can try the other shapes. Shapes that look numeric but cannot be
/// parsed (`--5`, integers beyond `i64`) fail here rather than falling through.
fn parse_number(s: &str) -> Result<Option<Value>> {
    let unsigned = s.trim_start_matches('-');
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in unsigned.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return Ok(None),
        }
    }
    if digits == 0 || dots > 1 {
        return Ok(None);
    }
    if s.len() - unsigned.len() > 1 {
        return Err(CodecError::format("more than one leading '-' in number", s));
    }

    if dots == 1 {
        s.parse::<f64>()
            .map(|f| Some(Value::Float(f)))
            .map_err(|_| CodecError::format("invalid float literal", s))
    } else {
        s.parse::<i64>()
            .map(|n| Some(Value::Integer(n)))
            .map_err(|_| CodecError::format("integer literal out of range", s))
    }
}

/// Strip a matching open/close delimiter pair. Needs at least two characters
/// so a lone `"` is not mistaken for an empty string.
fn strip_delimiters(s: &str, open: char, close: char) -> Option<&str> {
    if s.len() >= 2 && s.starts_with(open) && s.ends_with(close) {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Reverse the encoder's escaping. Only `\\` and `\"` are escapes; a backslash
/// before anything else is kept along with that character.
fn unescape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('\\' | '"')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Byte offsets of `delim` occurrences outside strings and at bracket depth 0.
struct TopLevel<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: isize,
    in_string: bool,
    delim: u8,
}

impl<'a> TopLevel<'a> {
    fn new(text: &'a str, delim: u8) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            in_string: false,
            delim,
        }
    }
}

impl Iterator for TopLevel<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.bytes.len() {
            let i = self.pos;
            let b = self.bytes[i];
            self.pos += 1;

            if b == b'"' {
                if i == 0 || self.bytes[i - 1] != b'\\' {
                    self.in_string = !self.in_string;
                }
                continue;
            }
            if self.in_string {
                continue;
            }
            match b {
                b'[' | b'{' => self.depth += 1,
                b']' | b'}' => self.depth -= 1,
                _ if b == self.delim && self.depth == 0 => return Some(i),
                _ => {}
            }
        }
        None
    }
}

/// Split a container body into trimmed, non-empty top-level segments.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for pos in TopLevel::new(body, b',') {
        segments.push(&body[start..pos]);
        start = pos + 1;
    }
    segments.push(&body[start..]);
    segments
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Split a mapping segment on its first top-level `:`.
fn split_key_value(segment: &str) -> Option<(&str, &str)> {
    let pos = TopLevel::new(segment, b':').next()?;
    Some((&segment[..pos], &segment[pos + 1..]))
}
