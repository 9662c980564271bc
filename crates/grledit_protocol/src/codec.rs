//! Binary-safe text encoding for request fields.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ProtocolError;

/// Encode a buffer's UTF-8 bytes as standard padded base64.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Inverse of [`encode`].
pub fn decode(encoded: &str) -> Result<String, ProtocolError> {
    let bytes = STANDARD.decode(encoded.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}
