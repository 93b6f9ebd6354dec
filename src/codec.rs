//! Obfuscation codec for the lookup table.
//!
//! The table is serialized to JSON, XOR-masked with [`OBFUSCATION_KEY`]
//! repeated over its bytes, and base64 encoded. The key is fixed and shipped
//! with every reader, so this only keeps assignments out of sight of someone
//! glancing at a snapshot file. It is not encryption and offers no
//! confidentiality. Changing the key invalidates every snapshot already
//! published.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::CodecError;
use crate::exchange::LookupTable;

pub const OBFUSCATION_KEY: &[u8] = b"SECRETSANTA2024";

/// XOR with the cycled key. Applying it twice is the identity.
fn mask(bytes: &mut [u8]) {
    for (byte, key) in bytes.iter_mut().zip(OBFUSCATION_KEY.iter().cycle()) {
        *byte ^= key;
    }
}

pub fn encode(table: &LookupTable) -> Result<String, CodecError> {
    let mut bytes = serde_json::to_vec(table)?;
    mask(&mut bytes);
    Ok(STANDARD.encode(bytes))
}

/// Reverses [`encode`]. Fails as a whole on any malformed input.
///
/// Payloads written by the browser setup mask one byte per character, so
/// bytes that are not UTF-8 are read as Latin-1.
pub fn decode(encoded: &str) -> Result<LookupTable, CodecError> {
    let mut bytes = STANDARD.decode(encoded.trim())?;
    mask(&mut bytes);
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    };
    let table: LookupTable = serde_json::from_str(&text)?;
    table.validate()?;
    Ok(table)
}
