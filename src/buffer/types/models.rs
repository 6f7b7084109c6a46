//! Core data structures shared by the codecs.
//!
//! This module defines the closed descriptor sets used throughout the library:
//! - Byte order and text encoding descriptors
//! - Decode strictness
//! - Numeric operation descriptors and their results

use std::fmt;
use std::str::FromStr;

use super::error::{BufferError, Result};

/// Byte order of a multi-byte numeric value. Always chosen per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endian::Big => write!(f, "BE"),
            Endian::Little => write!(f, "LE"),
        }
    }
}

/// Declared byte-width policy of an [`Encoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteWidth {
    /// Every unit occupies exactly this many bytes.
    Fixed(usize),
    /// A codepoint occupies between `min` and `max` bytes.
    Variable { min: usize, max: usize },
    /// A textual representation of arbitrary bytes (hex, base64).
    Textual,
}

/// The closed set of supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Latin1,
    Ascii,
    Hex,
    Base64,
    Base64Url,
}

impl Encoding {
    pub const ALL: [Encoding; 7] = [
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Latin1,
        Encoding::Ascii,
        Encoding::Hex,
        Encoding::Base64,
        Encoding::Base64Url,
    ];

    /// Canonical lowercase name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
        }
    }

    pub fn byte_width(&self) -> ByteWidth {
        match self {
            Encoding::Utf8 => ByteWidth::Variable { min: 1, max: 4 },
            Encoding::Utf16Le => ByteWidth::Variable { min: 2, max: 4 },
            Encoding::Latin1 | Encoding::Ascii => ByteWidth::Fixed(1),
            Encoding::Hex | Encoding::Base64 | Encoding::Base64Url => ByteWidth::Textual,
        }
    }

    /// Whether this encoding may appear on either side of `transcode`.
    pub fn is_transcodable(&self) -> bool {
        !matches!(self.byte_width(), ByteWidth::Textual)
    }

    /// Returns true if `name` is a recognised encoding label.
    pub fn is_encoding(name: &str) -> bool {
        name.parse::<Encoding>().is_ok()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(label: &str) -> Result<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "utf16-le" | "ucs2" | "ucs-2" => Ok(Encoding::Utf16Le),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "ascii" => Ok(Encoding::Ascii),
            "hex" | "hexadecimal" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            "base64url" | "base64-url" => Ok(Encoding::Base64Url),
            _ => Err(BufferError::invalid_type(
                "encoding",
                "a supported encoding name",
                format!("{:?}", label),
            )),
        }
    }
}

impl TryFrom<&str> for Encoding {
    type Error = BufferError;
    fn try_from(label: &str) -> Result<Self> {
        label.parse()
    }
}

/// How byte-to-text decoding treats malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Malformed sequences become U+FFFD; text-only encodings return the valid prefix.
    #[default]
    Replace,
    /// Malformed input fails with `InvalidEncoding`.
    Strict,
}

/// Descriptor of one member of the numeric read/write family.
///
/// Parses reference-contract names such as `"UInt32BE"`, `"readIntLE"`,
/// `"writeDoubleBE"` or `"BigUInt64LE"` (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Integer of `width` bytes; `None` takes the width from a `byteLength` argument.
    Int {
        signed: bool,
        width: Option<usize>,
        endian: Endian,
    },
    Float32(Endian),
    Float64(Endian),
    BigInt64(Endian),
    BigUInt64(Endian),
}

impl FromStr for NumericKind {
    type Err = BufferError;

    fn from_str(name: &str) -> Result<Self> {
        let invalid = || {
            BufferError::invalid_type("kind", "a numeric accessor name", format!("{:?}", name))
        };
        let lower = name.to_ascii_lowercase();
        let body = lower
            .strip_prefix("read")
            .or_else(|| lower.strip_prefix("write"))
            .unwrap_or(&lower);

        // 8-bit accessors carry no byte order.
        match body {
            "int8" => return Ok(NumericKind::Int { signed: true, width: Some(1), endian: Endian::Big }),
            "uint8" => return Ok(NumericKind::Int { signed: false, width: Some(1), endian: Endian::Big }),
            _ => {}
        }

        let (stem, endian) = if let Some(stem) = body.strip_suffix("be") {
            (stem, Endian::Big)
        } else if let Some(stem) = body.strip_suffix("le") {
            (stem, Endian::Little)
        } else {
            return Err(invalid());
        };

        let kind = match stem {
            "int" => NumericKind::Int { signed: true, width: None, endian },
            "uint" => NumericKind::Int { signed: false, width: None, endian },
            "int16" => NumericKind::Int { signed: true, width: Some(2), endian },
            "uint16" => NumericKind::Int { signed: false, width: Some(2), endian },
            "int32" => NumericKind::Int { signed: true, width: Some(4), endian },
            "uint32" => NumericKind::Int { signed: false, width: Some(4), endian },
            "float" | "float32" => NumericKind::Float32(endian),
            "double" | "float64" => NumericKind::Float64(endian),
            "bigint64" => NumericKind::BigInt64(endian),
            "biguint64" => NumericKind::BigUInt64(endian),
            _ => return Err(invalid()),
        };
        Ok(kind)
    }
}

/// A value produced by a dynamic numeric read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    BigInt(i128),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
            Number::BigInt(v) => write!(f, "{}n", v),
        }
    }
}
