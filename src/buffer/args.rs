//! Boundary adapter for loosely typed arguments.
//!
//! Callers that hold dynamically typed values (script bindings, command-line
//! input) wrap them in [`Arg`] and convert them here, once, into the strict
//! primitives the rest of the crate accepts. No other module coerces.

use std::fmt;

use super::arena::MAX_LENGTH;
use super::types::error::{BufferError, Result};
use super::types::models::Encoding;

/// Largest integer an `f64` represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A dynamically typed argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Undefined,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(&'a str),
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arg::Undefined => write!(f, "undefined"),
            Arg::Bool(b) => write!(f, "type boolean ({})", b),
            Arg::Number(n) => write!(f, "{}", n),
            Arg::BigInt(n) => write!(f, "{}n", n),
            Arg::Str(s) => write!(f, "type string ({:?})", s),
        }
    }
}

impl From<f64> for Arg<'_> {
    fn from(n: f64) -> Self {
        Arg::Number(n)
    }
}

impl From<i64> for Arg<'_> {
    fn from(n: i64) -> Self {
        Arg::Number(n as f64)
    }
}

impl From<i32> for Arg<'_> {
    fn from(n: i32) -> Self {
        Arg::Number(n as f64)
    }
}

impl From<bool> for Arg<'_> {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<i128> for Arg<'_> {
    fn from(n: i128) -> Self {
        Arg::BigInt(n)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

impl<'a> Arg<'a> {
    /// Parses a command-line token: integers with an `n` suffix become
    /// `BigInt`, other numerals become `Number`, anything else stays a string.
    pub fn parse(token: &'a str) -> Self {
        match token {
            "undefined" => return Arg::Undefined,
            "true" => return Arg::Bool(true),
            "false" => return Arg::Bool(false),
            _ => {}
        }
        if let Some(digits) = token.strip_suffix('n') {
            if let Ok(n) = digits.parse::<i128>() {
                return Arg::BigInt(n);
            }
        }
        if let Some(hex) = token.strip_prefix("0x") {
            if let Ok(n) = u64::from_str_radix(hex, 16) {
                return Arg::Number(n as f64);
            }
        }
        match token.parse::<f64>() {
            Ok(n) => Arg::Number(n),
            Err(_) => Arg::Str(token),
        }
    }

    /// A byte offset: a non-negative integer, defaulting to 0.
    pub fn to_offset(&self, name: &'static str) -> Result<usize> {
        match self {
            Arg::Undefined => Ok(0),
            Arg::Number(n) => non_negative_integer(*n)
                .ok_or_else(|| BufferError::invalid_type(name, "a non-negative integer", self)),
            _ => Err(BufferError::invalid_type(name, "of type number", self)),
        }
    }

    /// An allocation size: a non-negative integer no larger than [`MAX_LENGTH`].
    pub fn to_size(&self, name: &'static str) -> Result<usize> {
        let Arg::Number(n) = self else {
            return Err(BufferError::invalid_type(name, "of type number", self));
        };
        if n.is_finite() && n.fract() == 0.0 && *n > MAX_LENGTH as f64 {
            return Err(BufferError::out_of_range(
                name,
                format!(">= 0 and <= {}", MAX_LENGTH),
                n,
            ));
        }
        non_negative_integer(*n)
            .ok_or_else(|| BufferError::invalid_type(name, "a non-negative integer", self))
    }

    /// A `byteLength` argument of the variable-width integer accessors.
    /// The `[1, 6]` bound is enforced by the accessor itself.
    pub fn to_byte_length(&self) -> Result<usize> {
        match self {
            Arg::Number(n) => non_negative_integer(*n).ok_or_else(|| {
                BufferError::out_of_range("byteLength", ">= 1 and <= 6", n)
            }),
            _ => Err(BufferError::invalid_type("byteLength", "of type number", self)),
        }
    }

    /// An integer value to be written.
    ///
    /// Non-finite and fractional numbers fail with `OutOfRange`: they are not
    /// representable in any integer width.
    pub fn to_integer(&self, name: &'static str) -> Result<i128> {
        match self {
            Arg::Bool(b) => Ok(*b as i128),
            Arg::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(*n as i128),
            Arg::Number(n) => Err(BufferError::out_of_range(name, "an integer", n)),
            Arg::Undefined => Err(BufferError::out_of_range(name, "an integer", self)),
            _ => Err(BufferError::invalid_type(name, "of type number", self)),
        }
    }

    /// A floating-point value to be written. Every number is accepted.
    pub fn to_float(&self, name: &'static str) -> Result<f64> {
        match self {
            Arg::Undefined => Ok(f64::NAN),
            Arg::Bool(b) => Ok(*b as u8 as f64),
            Arg::Number(n) => Ok(*n),
            _ => Err(BufferError::invalid_type(name, "of type number", self)),
        }
    }

    /// A value for the 64-bit accessors, which accept only `BigInt`.
    pub fn to_bigint(&self, name: &'static str) -> Result<i128> {
        match self {
            Arg::BigInt(n) => Ok(*n),
            _ => Err(BufferError::invalid_type(name, "of type bigint", self)),
        }
    }

    /// A relative index for slicing and searching, defaulting to `default`.
    ///
    /// `NaN` becomes 0, infinities saturate, fractions truncate toward zero.
    pub fn to_index(&self, name: &'static str, default: isize) -> Result<isize> {
        match self {
            Arg::Undefined => Ok(default),
            Arg::Bool(b) => Ok(*b as isize),
            Arg::Number(n) if n.is_nan() => Ok(0),
            Arg::Number(n) => Ok(n.trunc().clamp(isize::MIN as f64, isize::MAX as f64) as isize),
            _ => Err(BufferError::invalid_type(name, "of type number", self)),
        }
    }

    /// An encoding name, defaulting to `default`.
    pub fn to_encoding(&self, default: Encoding) -> Result<Encoding> {
        match self {
            Arg::Undefined => Ok(default),
            Arg::Str(label) => label.parse(),
            _ => Err(BufferError::invalid_type("encoding", "of type string", self)),
        }
    }
}

fn non_negative_integer(n: f64) -> Option<usize> {
    (n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n <= MAX_SAFE_INTEGER).then(|| n as usize)
}
