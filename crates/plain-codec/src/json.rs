//! JSON bridge: convert JSON documents to codec text and back.
//!
//! Both directions go through [`Value`], so mapping order is kept and
//! integers stay distinct from floats.

use crate::decoder::Decoder;
use crate::encoder::encode;
use crate::error::Result;
use crate::types::Value;

/// Parse a JSON document and encode it as codec text.
///
/// # Errors
///
/// Returns `CodecError::Json` for malformed JSON (or integers above
/// `i64::MAX`) and `CodecError::Type` for values the encoder rejects.
pub fn json_to_text(json: &str, indent: Option<usize>) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    encode(&value, indent)
}

/// Decode codec text with `decoder` and render it as pretty-printed JSON.
pub fn text_to_json(text: &str, decoder: &Decoder) -> Result<String> {
    let value = decoder.decode(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
