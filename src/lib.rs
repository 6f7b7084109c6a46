//! # bytekit
//!
//! Fixed-capacity byte sequences with zero-copy aliasing views, numeric
//! encode/decode at every common width and byte order, text conversion under
//! a closed set of encodings, search and comparison, and live iteration.
//!
//! ```
//! use bytekit::{Arena, Encoding};
//!
//! let arena = Arena::default();
//! let seq = arena.allocate(4, true).unwrap();
//! seq.write_u32_be(0x12345678, 0).unwrap();
//! assert_eq!(seq.read_u32_le(0).unwrap(), 0x78563412);
//!
//! let view = seq.slice(1, 3);
//! view.write_u8(0xFF, 0).unwrap();
//! assert_eq!(seq.to_string(Encoding::Hex), "12ff5678");
//! ```
pub mod buffer;

// Re-export the main types for convenience
pub use buffer::{
    codec::{byte_length, decode, decode_with, encode, encode_with, transcode},
    Arena,
    Arg,
    BufferError,
    ByteSeq,
    ByteWidth,
    DecodeMode,
    Encoding,
    Endian,
    ErrorKind,
    Needle,
    Number,
    NumericKind,
    Result,
    MAX_LENGTH,
};
