//! Record codec
//!
//! Reversible mapping between raw byte strings and their delimiter-safe text
//! form.
//!
//! ## Alphabet
//! ```text
//! A-Z a-z 0-9 + /      (standard base64, padding omitted)
//! ```
//!
//! Neither `=` nor `\n` can appear in encoded output, so a record line
//! `<key>=<value>` always splits unambiguously at its first `=`.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;

use crate::error::{LineKvError, Result};

/// Encode raw bytes to delimiter-safe text
///
/// Total: every input, including the empty slice, has an encoding.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

/// Decode text produced by [`encode`] back to raw bytes
///
/// Fails with `Decode` on characters outside the alphabet, padding, or a
/// length no encoding can produce.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(text)
        .map_err(|e| LineKvError::Decode(format!("invalid encoded text {:?}: {}", text, e)))
}

/// Decode text and require the result to be valid UTF-8
pub fn decode_utf8(text: &str) -> Result<String> {
    let bytes = decode(text)?;
    String::from_utf8(bytes)
        .map_err(|e| LineKvError::Decode(format!("decoded bytes are not UTF-8: {}", e)))
}
