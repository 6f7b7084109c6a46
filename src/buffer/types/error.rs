//! Custom error types for the bytekit crate.

use thiserror::Error;

use super::models::Encoding;

/// The primary error type for all operations in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BufferError {
    /// An offset, width, size or value falls outside its valid bound.
    #[error("The value of \"{name}\" is out of range. It must be {bound}. Received {received}")]
    OutOfRange {
        name: &'static str,
        bound: String,
        received: String,
    },

    /// An argument cannot be interpreted as the required primitive.
    #[error("The \"{name}\" argument must be {expected}. Received {received}")]
    InvalidType {
        name: &'static str,
        expected: &'static str,
        received: String,
    },

    /// Malformed input to a decode operation.
    #[error("Invalid {encoding} data at position {position}: {reason}")]
    InvalidEncoding {
        encoding: Encoding,
        position: usize,
        reason: String,
    },

    /// `transcode` was asked for a pair outside the supported matrix.
    #[error("Unable to transcode from {from} to {to}")]
    UnsupportedConversion { from: Encoding, to: Encoding },
}

/// Coarse category of a [`BufferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    InvalidType,
    InvalidEncoding,
    UnsupportedConversion,
}

impl BufferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BufferError::OutOfRange { .. } => ErrorKind::OutOfRange,
            BufferError::InvalidType { .. } => ErrorKind::InvalidType,
            BufferError::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            BufferError::UnsupportedConversion { .. } => ErrorKind::UnsupportedConversion,
        }
    }

    pub(crate) fn out_of_range(
        name: &'static str,
        bound: impl Into<String>,
        received: impl ToString,
    ) -> Self {
        BufferError::OutOfRange {
            name,
            bound: bound.into(),
            received: received.to_string(),
        }
    }

    pub(crate) fn invalid_type(
        name: &'static str,
        expected: &'static str,
        received: impl ToString,
    ) -> Self {
        BufferError::InvalidType {
            name,
            expected,
            received: received.to_string(),
        }
    }

    /// Error for an access of `width` bytes at `offset` into a container of `len` bytes.
    pub(crate) fn bounds(offset: usize, width: usize, len: usize) -> Self {
        let bound = match len.checked_sub(width) {
            Some(last) => format!(">= 0 and <= {}", last),
            None => format!("a readable range of {} bytes, but the length is {}", width, len),
        };
        BufferError::out_of_range("offset", bound, offset)
    }
}

/// A convenience `Result` type alias using the crate's `BufferError` type.
pub type Result<T> = std::result::Result<T, BufferError>;
