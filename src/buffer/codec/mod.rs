//! Text codec layer.
//!
//! # Submodules
//!
//! - [`text`][]: bytes ⇄ text under a named [`Encoding`]
//! - [`transcode`][]: bytes ⇄ bytes between character encodings

pub mod text;
pub mod transcode;

pub use text::{byte_length, decode, decode_with, encode, encode_with};
pub use transcode::transcode;

use super::bytes::{clamp_index, ByteSeq};
use super::types::error::{BufferError, Result};
use super::types::models::{DecodeMode, Encoding};

impl ByteSeq {
    /// Decodes the whole sequence, replacing malformed input.
    pub fn to_string(&self, encoding: Encoding) -> String {
        decode(&self.bytes(), encoding)
    }

    /// Decodes `[start, end)`, with the same clamping rules as [`slice`](Self::slice).
    pub fn to_string_range(&self, encoding: Encoding, start: isize, end: isize) -> String {
        let start = clamp_index(start, self.len());
        let end = clamp_index(end, self.len()).max(start);
        decode(&self.bytes()[start..end], encoding)
    }

    /// Decodes the whole sequence, failing with `InvalidEncoding` on malformed input.
    pub fn to_string_strict(&self, encoding: Encoding) -> Result<String> {
        decode_with(&self.bytes(), encoding, DecodeMode::Strict)
    }

    /// Encodes `text` into this sequence at `offset`, returning the number of
    /// bytes written.
    ///
    /// At most `max_length` bytes (default: the rest of the sequence) are
    /// written. A character that does not fit whole is not written at all.
    pub fn write_str(
        &self,
        text: &str,
        offset: usize,
        max_length: Option<usize>,
        encoding: Encoding,
    ) -> Result<usize> {
        if offset > self.len() {
            return Err(BufferError::out_of_range(
                "offset",
                format!(">= 0 and <= {}", self.len()),
                offset,
            ));
        }
        let remaining = self.len() - offset;
        let limit = max_length.map_or(remaining, |max| max.min(remaining));

        let encoded = encode(text, encoding)?;
        let count = text::fit_prefix(text, encoding, &encoded, limit);
        self.bytes_mut()[offset..offset + count].copy_from_slice(&encoded[..count]);
        Ok(count)
    }

    /// Fills `[start, end)` with the encoding of `text`, repeated.
    pub fn fill_str(&self, text: &str, encoding: Encoding, start: usize, end: usize) -> Result<&Self> {
        let pattern = encode(text, encoding)?;
        self.fill_pattern(&pattern, start, end)
    }
}
