//! Conversion between byte sequences and text.
//!
//! `encode` always goes from text to bytes and `decode` from bytes to text.
//! For the textual representations (hex, base64) that means `encode` parses
//! the representation and `decode` renders it.
//!
//! | Encoding  | `decode` (bytes → text)                | `encode` (text → bytes)                      |
//! |-----------|----------------------------------------|----------------------------------------------|
//! | utf8      | malformed sequences → U+FFFD           | canonical UTF-8                              |
//! | utf16le   | odd trailing byte dropped, lone surrogates → U+FFFD | surrogate pairs above U+FFFF    |
//! | latin1    | byte `b` → U+00`b`                     | codepoints above 255 fail with `OutOfRange`  |
//! | ascii     | high bit cleared                       | codepoint clipped to its low 7 bits          |
//! | hex       | lowercase digits                       | stops at the first invalid pair              |
//! | base64    | padded standard alphabet               | either alphabet, skips noise, stops at `=`   |
//! | base64url | unpadded url-safe alphabet             | same as base64                               |
//!
//! [`DecodeMode::Strict`] turns every lenient case of the utf8, utf16le, hex
//! and base64 rows into an `InvalidEncoding` error.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::{DecodeError, Engine};
use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::{UTF_16LE, UTF_8};
use log::trace;

use crate::buffer::types::error::{BufferError, Result};
use crate::buffer::types::models::{DecodeMode, Encoding};

/// Accepts unpadded input and ignores leftover bits in the final symbol.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

fn invalid(encoding: Encoding, position: usize, reason: impl Into<String>) -> BufferError {
    BufferError::InvalidEncoding {
        encoding,
        position,
        reason: reason.into(),
    }
}

/// Decodes `bytes` to text, replacing malformed input.
pub fn decode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => UTF_8.decode_without_bom_handling(bytes).0.into_owned(),
        Encoding::Utf16Le => {
            let even = bytes.len() & !1;
            UTF_16LE.decode_without_bom_handling(&bytes[..even]).0.into_owned()
        }
        Encoding::Latin1 => encoding_rs::mem::decode_latin1(bytes).into_owned(),
        Encoding::Ascii => bytes.iter().map(|&b| (b & 0x7F) as char).collect(),
        Encoding::Hex => hex::encode(bytes),
        Encoding::Base64 => STANDARD.encode(bytes),
        Encoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
    }
}

/// Decodes `bytes` to text under the given strictness.
pub fn decode_with(bytes: &[u8], encoding: Encoding, mode: DecodeMode) -> Result<String> {
    if mode == DecodeMode::Replace {
        return Ok(decode(bytes, encoding));
    }
    match encoding {
        Encoding::Utf8 => UTF_8
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| {
                let position = encoding_rs::Encoding::utf8_valid_up_to(bytes);
                invalid(encoding, position, "malformed UTF-8 sequence")
            }),
        Encoding::Utf16Le => decode_utf16le_strict(bytes),
        _ => Ok(decode(bytes, encoding)),
    }
}

fn decode_utf16le_strict(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(invalid(Encoding::Utf16Le, bytes.len() - 1, "truncated code unit"));
    }
    let mut units = vec![0u16; bytes.len() / 2];
    LittleEndian::read_u16_into(bytes, &mut units);

    let mut text = String::with_capacity(units.len());
    let mut position = 0;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) => {
                position += c.len_utf16() * 2;
                text.push(c);
            }
            Err(_) => return Err(invalid(Encoding::Utf16Le, position, "unpaired surrogate")),
        }
    }
    Ok(text)
}

/// Encodes `text` to bytes, parsing hex and base64 leniently.
pub fn encode(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    encode_with(text, encoding, DecodeMode::Replace)
}

/// Encodes `text` to bytes. `mode` governs how invalid hex and base64 input
/// is treated; the other encodings ignore it.
pub fn encode_with(text: &str, encoding: Encoding, mode: DecodeMode) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Utf16Le => {
            let units: Vec<u16> = text.encode_utf16().collect();
            let mut bytes = vec![0u8; units.len() * 2];
            LittleEndian::write_u16_into(&units, &mut bytes);
            Ok(bytes)
        }
        Encoding::Latin1 => {
            check_latin1(text)?;
            Ok(encoding_rs::mem::encode_latin1_lossy(text).into_owned())
        }
        Encoding::Ascii => Ok(text.chars().map(|c| (c as u32 & 0x7F) as u8).collect()),
        Encoding::Hex => parse_hex(text, mode),
        Encoding::Base64 | Encoding::Base64Url => parse_base64(text, encoding, mode),
    }
}

fn check_latin1(text: &str) -> Result<()> {
    match text.char_indices().find(|(_, c)| *c as u32 > 0xFF) {
        Some((index, c)) => Err(BufferError::out_of_range(
            "text",
            "latin1 codepoints <= U+00FF",
            format!("U+{:04X} at byte {}", c as u32, index),
        )),
        None => Ok(()),
    }
}

fn parse_hex(text: &str, mode: DecodeMode) -> Result<Vec<u8>> {
    let digits = text.as_bytes();
    let pairs = digits
        .chunks_exact(2)
        .take_while(|pair| pair.iter().all(u8::is_ascii_hexdigit))
        .count();
    let valid = pairs * 2;

    if valid < digits.len() {
        if mode == DecodeMode::Strict {
            let reason = if valid + 1 == digits.len() {
                "odd number of digits"
            } else {
                "invalid hex pair"
            };
            return Err(invalid(Encoding::Hex, valid, reason));
        }
        trace!("Hex input stopped at position {} of {}", valid, digits.len());
    }
    hex::decode(&digits[..valid]).map_err(|e| invalid(Encoding::Hex, valid, e.to_string()))
}

fn parse_base64(text: &str, encoding: Encoding, mode: DecodeMode) -> Result<Vec<u8>> {
    if mode == DecodeMode::Strict {
        let engine = match encoding {
            Encoding::Base64Url => &URL_SAFE_NO_PAD,
            _ => &STANDARD,
        };
        return engine
            .decode(text)
            .map_err(|e| invalid(encoding, base64_error_position(&e, text.len()), e.to_string()));
    }

    let mut symbols = Vec::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => symbols.push(byte),
            b'-' => symbols.push(b'+'),
            b'_' => symbols.push(b'/'),
            b'=' => break,
            _ => {}
        }
    }
    // A single leftover symbol cannot complete a byte.
    if symbols.len() % 4 == 1 {
        trace!("Dropping dangling base64 symbol");
        symbols.pop();
    }
    LENIENT_BASE64
        .decode(&symbols)
        .map_err(|e| invalid(encoding, base64_error_position(&e, text.len()), e.to_string()))
}

fn base64_error_position(err: &DecodeError, len: usize) -> usize {
    match err {
        DecodeError::InvalidByte(position, _) | DecodeError::InvalidLastSymbol(position, _) => *position,
        _ => len,
    }
}

/// Number of bytes `text` occupies once encoded.
pub fn byte_length(text: &str, encoding: Encoding) -> usize {
    match encoding {
        Encoding::Utf8 => text.len(),
        Encoding::Utf16Le => text.encode_utf16().count() * 2,
        Encoding::Latin1 | Encoding::Ascii => text.chars().count(),
        Encoding::Hex | Encoding::Base64 | Encoding::Base64Url => {
            encode(text, encoding).map_or(0, |bytes| bytes.len())
        }
    }
}

/// Length of the longest prefix of `encoded` (the encoding of `text`) that
/// fits in `limit` bytes without splitting a character.
pub(crate) fn fit_prefix(text: &str, encoding: Encoding, encoded: &[u8], limit: usize) -> usize {
    if encoded.len() <= limit {
        return encoded.len();
    }
    let unit_len = |c: char| match encoding {
        Encoding::Utf8 => c.len_utf8(),
        Encoding::Utf16Le => c.len_utf16() * 2,
        _ => 1,
    };
    match encoding {
        Encoding::Utf8 | Encoding::Utf16Le | Encoding::Latin1 | Encoding::Ascii => {
            let mut used = 0;
            for c in text.chars() {
                let next = used + unit_len(c);
                if next > limit {
                    break;
                }
                used = next;
            }
            used
        }
        Encoding::Hex | Encoding::Base64 | Encoding::Base64Url => limit,
    }
}
