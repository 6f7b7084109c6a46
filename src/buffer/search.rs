//! Substring search and lexicographic ordering.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::bytes::ByteSeq;
use super::codec;
use super::types::error::{BufferError, Result};
use super::types::models::Encoding;

/// What to look for in a [`ByteSeq`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Needle<'a> {
    Byte(u8),
    Bytes(Cow<'a, [u8]>),
}

impl Needle<'_> {
    /// Text interpreted under `encoding`.
    pub fn text(text: &str, encoding: Encoding) -> Result<Needle<'static>> {
        codec::encode(text, encoding).map(|bytes| Needle::Bytes(Cow::Owned(bytes)))
    }

    /// Text interpreted under the encoding called `label`.
    ///
    /// Fails with `InvalidType` if the label is not a known encoding.
    pub fn text_labeled(text: &str, label: &str) -> Result<Needle<'static>> {
        Needle::text(text, label.parse()?)
    }

    fn len(&self) -> usize {
        match self {
            Needle::Byte(_) => 1,
            Needle::Bytes(bytes) => bytes.len(),
        }
    }

    fn matches_at(&self, haystack: &[u8], position: usize) -> bool {
        match self {
            Needle::Byte(b) => haystack[position] == *b,
            Needle::Bytes(bytes) => haystack[position..position + bytes.len()] == **bytes,
        }
    }
}

impl From<u8> for Needle<'_> {
    fn from(byte: u8) -> Self {
        Needle::Byte(byte)
    }
}

impl<'a> From<&'a [u8]> for Needle<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Needle::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Needle<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Needle::Bytes(Cow::Borrowed(&bytes[..]))
    }
}

/// UTF-8 text.
impl<'a> From<&'a str> for Needle<'a> {
    fn from(text: &'a str) -> Self {
        Needle::Bytes(Cow::Borrowed(text.as_bytes()))
    }
}

impl From<&ByteSeq> for Needle<'_> {
    fn from(seq: &ByteSeq) -> Self {
        Needle::Bytes(Cow::Owned(seq.to_vec()))
    }
}

fn clamp_offset(offset: isize, len: usize) -> usize {
    if offset < 0 {
        0
    } else {
        (offset as usize).min(len)
    }
}

impl ByteSeq {
    /// Position of the first occurrence of `needle` at or after `byte_offset`.
    ///
    /// `byte_offset` is clamped into `[0, len]`. An empty needle matches at
    /// the clamped offset.
    pub fn index_of<'a>(&self, needle: impl Into<Needle<'a>>, byte_offset: isize) -> Option<usize> {
        let needle = needle.into();
        let haystack = self.bytes();
        let start = clamp_offset(byte_offset, haystack.len());
        let width = needle.len();
        if width == 0 {
            return Some(start);
        }
        let last = haystack.len().checked_sub(width)?;
        (start..=last).find(|&position| needle.matches_at(&haystack, position))
    }

    /// Position of the last occurrence of `needle` starting at or before
    /// `byte_offset` (default: the end).
    pub fn last_index_of<'a>(&self, needle: impl Into<Needle<'a>>, byte_offset: Option<isize>) -> Option<usize> {
        let needle = needle.into();
        let haystack = self.bytes();
        let start = byte_offset.map_or(haystack.len(), |offset| clamp_offset(offset, haystack.len()));
        let width = needle.len();
        if width == 0 {
            return Some(start);
        }
        let last = haystack.len().checked_sub(width)?.min(start);
        (0..=last).rev().find(|&position| needle.matches_at(&haystack, position))
    }

    /// Whether `needle` occurs at or after `byte_offset`.
    pub fn includes<'a>(&self, needle: impl Into<Needle<'a>>, byte_offset: isize) -> bool {
        self.index_of(needle, byte_offset).is_some()
    }

    /// True iff both sequences have the same length and bytes.
    pub fn equals(&self, other: &ByteSeq) -> bool {
        self.len() == other.len() && *self.bytes() == *other.bytes()
    }

    /// Byte-wise lexicographic order; a strict prefix orders first.
    pub fn compare(&self, other: &ByteSeq) -> Ordering {
        (*self.bytes()).cmp(&*other.bytes())
    }

    /// Compares `[source_start, source_end)` of this sequence with
    /// `[target_start, target_end)` of `target`.
    ///
    /// Fails with `OutOfRange` if either range reaches past its sequence.
    pub fn compare_range(
        &self,
        target: &ByteSeq,
        target_start: usize,
        target_end: usize,
        source_start: usize,
        source_end: usize,
    ) -> Result<Ordering> {
        check_range("targetStart", "targetEnd", target_start, target_end, target.len())?;
        check_range("sourceStart", "sourceEnd", source_start, source_end, self.len())?;

        if source_start >= source_end {
            return Ok(if target_start >= target_end { Ordering::Equal } else { Ordering::Less });
        }
        if target_start >= target_end {
            return Ok(Ordering::Greater);
        }
        let source = self.bytes();
        let target = target.bytes();
        Ok(source[source_start..source_end].cmp(&target[target_start..target_end]))
    }
}

fn check_range(start_name: &'static str, end_name: &'static str, start: usize, end: usize, len: usize) -> Result<()> {
    if end > len {
        return Err(BufferError::out_of_range(end_name, format!(">= 0 and <= {}", len), end));
    }
    if start > len {
        return Err(BufferError::out_of_range(start_name, format!(">= 0 and <= {}", len), start));
    }
    Ok(())
}

impl PartialEq for ByteSeq {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for ByteSeq {}

impl PartialOrd for ByteSeq {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteSeq {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for ByteSeq {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self.bytes()).hash(state);
    }
}
