//! Lazy iteration over a [`ByteSeq`].
//!
//! Each factory call returns a fresh iterator with its own position. The
//! value-producing iterators hold a view of the backing store and read it
//! live: a write made before a position is reached is observed when that
//! position is yielded. Exhausted iterators keep returning `None`.

use std::iter::FusedIterator;

use super::bytes::ByteSeq;

/// Iterator over the indices `0..len`.
#[derive(Debug, Clone)]
pub struct Keys {
    index: usize,
    len: usize,
}

impl Iterator for Keys {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.index >= self.len {
            return None;
        }
        self.index += 1;
        Some(self.index - 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Keys {}
impl FusedIterator for Keys {}

/// Iterator over the byte values.
#[derive(Debug, Clone)]
pub struct Values {
    seq: ByteSeq,
    index: usize,
}

impl Iterator for Values {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let value = self.seq.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Values {}
impl FusedIterator for Values {}

/// Iterator over `(index, value)` pairs.
#[derive(Debug, Clone)]
pub struct Entries {
    seq: ByteSeq,
    index: usize,
}

impl Iterator for Entries {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<(usize, u8)> {
        let value = self.seq.get(self.index)?;
        self.index += 1;
        Some((self.index - 1, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Entries {}
impl FusedIterator for Entries {}

impl ByteSeq {
    pub fn keys(&self) -> Keys {
        Keys { index: 0, len: self.len() }
    }

    pub fn values(&self) -> Values {
        Values { seq: self.clone(), index: 0 }
    }

    pub fn entries(&self) -> Entries {
        Entries { seq: self.clone(), index: 0 }
    }
}

impl<'a> IntoIterator for &'a ByteSeq {
    type Item = u8;
    type IntoIter = Values;

    fn into_iter(self) -> Values {
        self.values()
    }
}
