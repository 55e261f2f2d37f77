//! Encoding Utilities

use base64::{Engine, engine::general_purpose};
use thiserror::Error;

/// Failure to turn a base64 payload into text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base64TextError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded payload is not valid UTF-8")]
    Utf8,
}

/// Encode bytes as standard (padded) base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard (padded) base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Decode standard base64 and require the result to be UTF-8 text
pub fn base64_to_text(s: &str) -> Result<String, Base64TextError> {
    let bytes = from_base64(s)?;
    String::from_utf8(bytes).map_err(|_| Base64TextError::Utf8)
}
