//! Direct byte-to-byte conversion between character encodings.

use log::trace;

use super::text;
use crate::buffer::types::error::{BufferError, Result};
use crate::buffer::types::models::Encoding;

/// Re-encodes `bytes` from `from` to `to`.
///
/// Behaves as `encode(decode(bytes, from), to)`. Only utf8, utf16le, latin1
/// and ascii take part; hex and base64 are representations rather than
/// character encodings and fail with `UnsupportedConversion`. Converting an
/// encoding to itself returns the input unchanged, malformed sequences
/// included.
pub fn transcode(bytes: &[u8], from: Encoding, to: Encoding) -> Result<Vec<u8>> {
    if !from.is_transcodable() || !to.is_transcodable() {
        return Err(BufferError::UnsupportedConversion { from, to });
    }
    if from == to {
        return Ok(bytes.to_vec());
    }
    trace!("Transcoding {} bytes from {} to {}", bytes.len(), from, to);

    // Narrow inputs widen without an intermediate string.
    match (from, to) {
        (Encoding::Latin1, Encoding::Utf16Le) => {
            return Ok(bytes.iter().flat_map(|&b| [b, 0]).collect());
        }
        (Encoding::Ascii, Encoding::Latin1) => {
            return Ok(bytes.iter().map(|&b| b & 0x7F).collect());
        }
        _ => {}
    }

    let decoded = text::decode(bytes, from);
    text::encode(&decoded, to)
}
