//! Core byte-container module

pub mod args;
pub mod arena;
pub mod bytes;
pub mod codec;
pub mod iter;
pub mod numeric;
pub mod search;
pub mod types;

pub use arena::{Arena, DEFAULT_POOL_SIZE, MAX_LENGTH};
pub use args::Arg;
pub use bytes::ByteSeq;
pub use iter::{Entries, Keys, Values};
pub use search::Needle;
pub use types::error::{BufferError, ErrorKind, Result};
pub use types::models::{ByteWidth, DecodeMode, Encoding, Endian, Number, NumericKind};
