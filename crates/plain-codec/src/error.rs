//! Error types for plain-value encoding and decoding.

use std::fmt::Display;

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or adapting values.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A value outside the closed set of encodable shapes (non-finite float,
    /// non-string mapping key, byte buffer, out-of-range integer).
    #[error("Type error: {0}")]
    Type(String),

    /// Text that does not match any recognized shape. `fragment` is the
    /// innermost piece of text that failed to decode.
    #[error("Format error: {message}: {fragment}")]
    Format { message: String, fragment: String },

    /// The JSON bridge failed. Never raised by `encode` or `decode`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Format,
    Json,
}

impl CodecError {
    pub(crate) fn unsupported(what: impl Display) -> Self {
        CodecError::Type(what.to_string())
    }

    pub(crate) fn format(message: impl Into<String>, fragment: &str) -> Self {
        CodecError::Format {
            message: message.into(),
            fragment: fragment.to_string(),
        }
    }

    /// Which error kind this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Type(_) => ErrorKind::Type,
            CodecError::Format { .. } => ErrorKind::Format,
            CodecError::Json(_) => ErrorKind::Json,
        }
    }
}

impl serde::ser::Error for CodecError {
    fn custom<T: Display>(msg: T) -> Self {
        CodecError::Type(msg.to_string())
    }
}

impl serde::de::Error for CodecError {
    fn custom<T: Display>(msg: T) -> Self {
        CodecError::Format {
            message: msg.to_string(),
            fragment: String::new(),
        }
    }
}

/// Convenience alias used throughout plain-codec.
pub type Result<T> = std::result::Result<T, CodecError>;
