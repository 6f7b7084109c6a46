//! Fixed- and variable-width numeric reads and writes.
//!
//! Every accessor takes the byte order explicitly, either as an [`Endian`]
//! argument or through its `_be`/`_le` suffix. Writes validate the value and
//! the bounds before touching any byte and return the offset just past the
//! written field.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::args::Arg;
use super::bytes::ByteSeq;
use super::types::error::{BufferError, Result};
use super::types::models::{Endian, Number, NumericKind};

/// Widest field the variable-width integer accessors support.
pub const MAX_BYTE_LENGTH: usize = 6;

fn check_byte_length(byte_length: usize) -> Result<()> {
    if !(1..=MAX_BYTE_LENGTH).contains(&byte_length) {
        return Err(BufferError::out_of_range(
            "byteLength",
            format!(">= 1 and <= {}", MAX_BYTE_LENGTH),
            byte_length,
        ));
    }
    Ok(())
}

/// Inclusive range of a `width`-byte integer.
fn int_range(width: usize, signed: bool) -> (i128, i128) {
    let bits = (width * 8) as u32;
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

fn check_int(value: i128, width: usize, signed: bool) -> Result<()> {
    let (min, max) = int_range(width, signed);
    if value < min || value > max {
        return Err(BufferError::out_of_range(
            "value",
            format!(">= {} and <= {}", min, max),
            value,
        ));
    }
    Ok(())
}

macro_rules! fixed_width {
    ($ty:ty, $width:expr, $read_fn:ident, $write_fn:ident,
     $read:ident, $read_be:ident, $read_le:ident,
     $write:ident, $write_be:ident, $write_le:ident) => {
        impl ByteSeq {
            pub fn $read(&self, offset: usize, endian: Endian) -> Result<$ty> {
                let bytes = self.window(offset, $width)?;
                Ok(match endian {
                    Endian::Big => BigEndian::$read_fn(&bytes),
                    Endian::Little => LittleEndian::$read_fn(&bytes),
                })
            }

            pub fn $read_be(&self, offset: usize) -> Result<$ty> {
                self.$read(offset, Endian::Big)
            }

            pub fn $read_le(&self, offset: usize) -> Result<$ty> {
                self.$read(offset, Endian::Little)
            }

            pub fn $write(&self, value: $ty, offset: usize, endian: Endian) -> Result<usize> {
                let mut bytes = self.window_mut(offset, $width)?;
                match endian {
                    Endian::Big => BigEndian::$write_fn(&mut bytes, value),
                    Endian::Little => LittleEndian::$write_fn(&mut bytes, value),
                }
                Ok(offset + $width)
            }

            pub fn $write_be(&self, value: $ty, offset: usize) -> Result<usize> {
                self.$write(value, offset, Endian::Big)
            }

            pub fn $write_le(&self, value: $ty, offset: usize) -> Result<usize> {
                self.$write(value, offset, Endian::Little)
            }
        }
    };
}

fixed_width!(u16, 2, read_u16, write_u16,
    read_u16, read_u16_be, read_u16_le, write_u16, write_u16_be, write_u16_le);
fixed_width!(i16, 2, read_i16, write_i16,
    read_i16, read_i16_be, read_i16_le, write_i16, write_i16_be, write_i16_le);
fixed_width!(u32, 4, read_u32, write_u32,
    read_u32, read_u32_be, read_u32_le, write_u32, write_u32_be, write_u32_le);
fixed_width!(i32, 4, read_i32, write_i32,
    read_i32, read_i32_be, read_i32_le, write_i32, write_i32_be, write_i32_le);
fixed_width!(f32, 4, read_f32, write_f32,
    read_f32, read_f32_be, read_f32_le, write_f32, write_f32_be, write_f32_le);
fixed_width!(f64, 8, read_f64, write_f64,
    read_f64, read_f64_be, read_f64_le, write_f64, write_f64_be, write_f64_le);
fixed_width!(u64, 8, read_u64, write_u64,
    read_big_u64, read_big_u64_be, read_big_u64_le,
    write_big_u64, write_big_u64_be, write_big_u64_le);
fixed_width!(i64, 8, read_i64, write_i64,
    read_big_i64, read_big_i64_be, read_big_i64_le,
    write_big_i64, write_big_i64_be, write_big_i64_le);

impl ByteSeq {
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.window(offset, 1)?[0])
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.window(offset, 1)?[0] as i8)
    }

    pub fn write_u8(&self, value: u8, offset: usize) -> Result<usize> {
        self.window_mut(offset, 1)?[0] = value;
        Ok(offset + 1)
    }

    pub fn write_i8(&self, value: i8, offset: usize) -> Result<usize> {
        self.write_u8(value as u8, offset)
    }

    /// Reads an unsigned integer of `byte_length` bytes (1 to 6).
    pub fn read_uint(&self, offset: usize, byte_length: usize, endian: Endian) -> Result<u64> {
        check_byte_length(byte_length)?;
        let bytes = self.window(offset, byte_length)?;
        Ok(match endian {
            Endian::Big => BigEndian::read_uint(&bytes, byte_length),
            Endian::Little => LittleEndian::read_uint(&bytes, byte_length),
        })
    }

    /// Reads a two's-complement integer of `byte_length` bytes (1 to 6),
    /// sign-extended from its most significant bit.
    pub fn read_int(&self, offset: usize, byte_length: usize, endian: Endian) -> Result<i64> {
        check_byte_length(byte_length)?;
        let bytes = self.window(offset, byte_length)?;
        Ok(match endian {
            Endian::Big => BigEndian::read_int(&bytes, byte_length),
            Endian::Little => LittleEndian::read_int(&bytes, byte_length),
        })
    }

    /// Writes `value` as an unsigned integer of `byte_length` bytes (1 to 6).
    ///
    /// Fails with `OutOfRange`, writing nothing, unless `value < 2^(8 * byte_length)`.
    pub fn write_uint(&self, value: u64, offset: usize, byte_length: usize, endian: Endian) -> Result<usize> {
        check_byte_length(byte_length)?;
        check_int(value as i128, byte_length, false)?;
        let mut bytes = self.window_mut(offset, byte_length)?;
        match endian {
            Endian::Big => BigEndian::write_uint(&mut bytes, value, byte_length),
            Endian::Little => LittleEndian::write_uint(&mut bytes, value, byte_length),
        }
        Ok(offset + byte_length)
    }

    /// Writes `value` as a two's-complement integer of `byte_length` bytes (1 to 6).
    ///
    /// Fails with `OutOfRange`, writing nothing, unless
    /// `-2^(8w-1) <= value <= 2^(8w-1) - 1`.
    pub fn write_int(&self, value: i64, offset: usize, byte_length: usize, endian: Endian) -> Result<usize> {
        check_byte_length(byte_length)?;
        check_int(value as i128, byte_length, true)?;
        let mut bytes = self.window_mut(offset, byte_length)?;
        match endian {
            Endian::Big => BigEndian::write_int(&mut bytes, value, byte_length),
            Endian::Little => LittleEndian::write_int(&mut bytes, value, byte_length),
        }
        Ok(offset + byte_length)
    }

    pub fn read_uint_be(&self, offset: usize, byte_length: usize) -> Result<u64> {
        self.read_uint(offset, byte_length, Endian::Big)
    }

    pub fn read_uint_le(&self, offset: usize, byte_length: usize) -> Result<u64> {
        self.read_uint(offset, byte_length, Endian::Little)
    }

    pub fn read_int_be(&self, offset: usize, byte_length: usize) -> Result<i64> {
        self.read_int(offset, byte_length, Endian::Big)
    }

    pub fn read_int_le(&self, offset: usize, byte_length: usize) -> Result<i64> {
        self.read_int(offset, byte_length, Endian::Little)
    }

    pub fn write_uint_be(&self, value: u64, offset: usize, byte_length: usize) -> Result<usize> {
        self.write_uint(value, offset, byte_length, Endian::Big)
    }

    pub fn write_uint_le(&self, value: u64, offset: usize, byte_length: usize) -> Result<usize> {
        self.write_uint(value, offset, byte_length, Endian::Little)
    }

    pub fn write_int_be(&self, value: i64, offset: usize, byte_length: usize) -> Result<usize> {
        self.write_int(value, offset, byte_length, Endian::Big)
    }

    pub fn write_int_le(&self, value: i64, offset: usize, byte_length: usize) -> Result<usize> {
        self.write_int(value, offset, byte_length, Endian::Little)
    }

    /// Reads the field described by `kind` from dynamically typed arguments.
    ///
    /// `byte_length` is only consulted by the variable-width integer kinds.
    pub fn read_number(&self, kind: NumericKind, offset: &Arg, byte_length: &Arg) -> Result<Number> {
        let offset = offset.to_offset("offset")?;
        match kind {
            NumericKind::Int { signed, width, endian } => {
                let width = match width {
                    Some(width) => width,
                    None => byte_length.to_byte_length()?,
                };
                if signed {
                    self.read_int(offset, width, endian).map(Number::Int)
                } else {
                    self.read_uint(offset, width, endian).map(|v| Number::Int(v as i64))
                }
            }
            NumericKind::Float32(endian) => self.read_f32(offset, endian).map(|v| Number::Float(v as f64)),
            NumericKind::Float64(endian) => self.read_f64(offset, endian).map(Number::Float),
            NumericKind::BigInt64(endian) => self.read_big_i64(offset, endian).map(|v| Number::BigInt(v as i128)),
            NumericKind::BigUInt64(endian) => self.read_big_u64(offset, endian).map(|v| Number::BigInt(v as i128)),
        }
    }

    /// Writes `value` into the field described by `kind` from dynamically
    /// typed arguments.
    ///
    /// Integer kinds reject non-finite, fractional and out-of-range values
    /// with `OutOfRange`; float kinds accept every number, including `NaN`
    /// and the infinities; 64-bit kinds require a `BigInt` value.
    pub fn write_number(&self, kind: NumericKind, value: &Arg, offset: &Arg, byte_length: &Arg) -> Result<usize> {
        match kind {
            NumericKind::Int { signed, width, endian } => {
                let value = value.to_integer("value")?;
                let offset = offset.to_offset("offset")?;
                let width = match width {
                    Some(width) => width,
                    None => byte_length.to_byte_length()?,
                };
                check_byte_length(width)?;
                check_int(value, width, signed)?;
                // In range for `width`, so the narrowing casts below are exact.
                if signed {
                    self.write_int(value as i64, offset, width, endian)
                } else {
                    self.write_uint(value as u64, offset, width, endian)
                }
            }
            NumericKind::Float32(endian) => {
                let value = value.to_float("value")?;
                let offset = offset.to_offset("offset")?;
                self.write_f32(value as f32, offset, endian)
            }
            NumericKind::Float64(endian) => {
                let value = value.to_float("value")?;
                let offset = offset.to_offset("offset")?;
                self.write_f64(value, offset, endian)
            }
            NumericKind::BigInt64(endian) => {
                let value = value.to_bigint("value")?;
                let offset = offset.to_offset("offset")?;
                let value = i64::try_from(value).map_err(|_| {
                    BufferError::out_of_range("value", format!(">= {} and <= {}", i64::MIN, i64::MAX), value)
                })?;
                self.write_big_i64(value, offset, endian)
            }
            NumericKind::BigUInt64(endian) => {
                let value = value.to_bigint("value")?;
                let offset = offset.to_offset("offset")?;
                let value = u64::try_from(value).map_err(|_| {
                    BufferError::out_of_range("value", format!(">= 0 and <= {}", u64::MAX), value)
                })?;
                self.write_big_u64(value, offset, endian)
            }
        }
    }
}
