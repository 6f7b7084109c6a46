//! Fixed-capacity byte sequences and the aliasing views derived from them.
//!
//! A [`ByteSeq`] is a `(store, offset, len)` triple over a reference-counted
//! backing store. Every view derived with [`ByteSeq::slice`] holds its own
//! share of that store, so the bytes live as long as the last view does.
//! Writes through any view are visible to every other view over the same
//! range; there is no copy-on-write.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::args::Arg;
use super::types::error::{BufferError, Result};

/// Shared backing memory of one or more [`ByteSeq`]s.
pub(crate) type Store = RefCell<Box<[u8]>>;

/// Maximum number of bytes rendered by the `Debug` implementation.
const INSPECT_MAX_BYTES: usize = 50;

/// A fixed-length, addressable run of bytes, possibly shared with other views.
///
/// `Clone` produces another view over the same bytes, not a copy. Use
/// [`Arena::from_seq`](crate::Arena::from_seq) for a deep copy.
#[derive(Clone)]
pub struct ByteSeq {
    store: Rc<Store>,
    offset: usize,
    len: usize,
}

impl ByteSeq {
    pub(crate) fn from_store(store: Rc<Store>, offset: usize, len: usize) -> Self {
        debug_assert!(offset + len <= store.borrow().len());
        Self { store, offset, len }
    }

    /// Takes ownership of `bytes` as an isolated backing store.
    pub(crate) fn owned(bytes: Box<[u8]>) -> Self {
        let len = bytes.len();
        Self {
            store: Rc::new(RefCell::new(bytes)),
            offset: 0,
            len,
        }
    }

    /// Number of addressable bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the byte at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.store.borrow()[self.offset + index])
        } else {
            None
        }
    }

    /// Overwrites the byte at `index`.
    pub fn set(&self, index: usize, value: u8) -> Result<()> {
        let mut bytes = self.window_mut(index, 1)?;
        bytes[0] = value;
        Ok(())
    }

    /// Copies the viewed bytes out into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes().to_vec()
    }

    /// Creates a view over `[start, end)`.
    ///
    /// Negative indices count from the end. Both bounds are clamped into
    /// `[0, len]`, so this never fails; an inverted range yields an empty view.
    pub fn slice(&self, start: isize, end: isize) -> ByteSeq {
        let start = clamp_index(start, self.len);
        let end = clamp_index(end, self.len).max(start);
        ByteSeq {
            store: Rc::clone(&self.store),
            offset: self.offset + start,
            len: end - start,
        }
    }

    /// Creates a view from `start` to the end of this sequence.
    pub fn slice_from(&self, start: isize) -> ByteSeq {
        self.slice(start, self.len as isize)
    }

    /// [`slice`](Self::slice) with dynamically typed bounds. Missing bounds
    /// default to the whole sequence.
    pub fn slice_dynamic(&self, start: &Arg, end: &Arg) -> Result<ByteSeq> {
        let start = start.to_index("start", 0)?;
        let end = end.to_index("end", self.len as isize)?;
        Ok(self.slice(start, end))
    }

    /// Same as [`slice`](Self::slice).
    pub fn subrange(&self, start: isize, end: isize) -> ByteSeq {
        self.slice(start, end)
    }

    /// Sets every byte in `[start, end)` to `value`.
    ///
    /// Fails with `OutOfRange` if `end` exceeds the length; an empty or
    /// inverted range is a no-op.
    pub fn fill(&self, value: u8, start: usize, end: usize) -> Result<&Self> {
        let range = self.fill_range(start, end)?;
        if let Some((start, end)) = range {
            self.bytes_mut()[start..end].fill(value);
        }
        Ok(self)
    }

    /// Repeats `pattern` over `[start, end)`.
    pub(crate) fn fill_pattern(&self, pattern: &[u8], start: usize, end: usize) -> Result<&Self> {
        let Some((start, end)) = self.fill_range(start, end)? else {
            return Ok(self);
        };
        if pattern.is_empty() {
            return Err(BufferError::out_of_range(
                "value",
                "a non-empty fill pattern",
                "an empty pattern",
            ));
        }
        let mut bytes = self.bytes_mut();
        for (dst, src) in bytes[start..end].iter_mut().zip(pattern.iter().cycle()) {
            *dst = *src;
        }
        Ok(self)
    }

    fn fill_range(&self, start: usize, end: usize) -> Result<Option<(usize, usize)>> {
        if end > self.len {
            return Err(BufferError::out_of_range(
                "end",
                format!(">= 0 and <= {}", self.len),
                end,
            ));
        }
        Ok((start < end).then_some((start, end)))
    }

    /// Copies `[source_start, source_end)` of this sequence into `target` at
    /// `target_start`, returning the number of bytes copied.
    ///
    /// Ranges are clamped to both sequences. Overlapping regions of the same
    /// backing store are copied as if through an intermediate buffer.
    pub fn copy_to(
        &self,
        target: &ByteSeq,
        target_start: usize,
        source_start: usize,
        source_end: usize,
    ) -> usize {
        let source_end = source_end.min(self.len);
        if target_start >= target.len || source_start >= source_end {
            return 0;
        }
        let count = (source_end - source_start).min(target.len - target_start);

        if Rc::ptr_eq(&self.store, &target.store) {
            let from = self.offset + source_start;
            let to = target.offset + target_start;
            self.store.borrow_mut().copy_within(from..from + count, to);
        } else {
            let source = self.bytes();
            let mut dest = target.bytes_mut();
            dest[target_start..target_start + count]
                .copy_from_slice(&source[source_start..source_start + count]);
        }
        count
    }

    /// Reverses byte order in place for every 16-bit unit.
    pub fn swap16(&self) -> Result<&Self> {
        self.swap_units(2)
    }

    /// Reverses byte order in place for every 32-bit unit.
    pub fn swap32(&self) -> Result<&Self> {
        self.swap_units(4)
    }

    /// Reverses byte order in place for every 64-bit unit.
    pub fn swap64(&self) -> Result<&Self> {
        self.swap_units(8)
    }

    fn swap_units(&self, unit: usize) -> Result<&Self> {
        if self.len % unit != 0 {
            return Err(BufferError::out_of_range(
                "length",
                format!("a multiple of {}", unit * 8),
                format!("{} bits", self.len * 8),
            ));
        }
        for chunk in self.bytes_mut().chunks_exact_mut(unit) {
            chunk.reverse();
        }
        Ok(self)
    }

    /// Borrows the viewed bytes.
    pub(crate) fn bytes(&self) -> Ref<'_, [u8]> {
        let (start, end) = (self.offset, self.offset + self.len);
        Ref::map(self.store.borrow(), |store| &store[start..end])
    }

    pub(crate) fn bytes_mut(&self) -> RefMut<'_, [u8]> {
        let (start, end) = (self.offset, self.offset + self.len);
        RefMut::map(self.store.borrow_mut(), |store| &mut store[start..end])
    }

    /// Borrows `width` bytes at `offset`, failing with `OutOfRange` past the end.
    pub(crate) fn window(&self, offset: usize, width: usize) -> Result<Ref<'_, [u8]>> {
        self.check_bounds(offset, width)?;
        Ok(Ref::map(self.bytes(), |bytes| &bytes[offset..offset + width]))
    }

    pub(crate) fn window_mut(&self, offset: usize, width: usize) -> Result<RefMut<'_, [u8]>> {
        self.check_bounds(offset, width)?;
        Ok(RefMut::map(self.bytes_mut(), |bytes| &mut bytes[offset..offset + width]))
    }

    pub(crate) fn check_bounds(&self, offset: usize, width: usize) -> Result<()> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(BufferError::bounds(offset, width, self.len)),
        }
    }
}

impl From<Vec<u8>> for ByteSeq {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSeq::owned(bytes.into_boxed_slice())
    }
}

impl fmt::Debug for ByteSeq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.bytes();
        write!(f, "<Buffer")?;
        for byte in bytes.iter().take(INSPECT_MAX_BYTES) {
            write!(f, " {:02x}", byte)?;
        }
        if bytes.len() > INSPECT_MAX_BYTES {
            write!(f, " ... {} more bytes", bytes.len() - INSPECT_MAX_BYTES)?;
        }
        write!(f, ">")
    }
}

/// Resolves a possibly negative index against `len`, clamped into `[0, len]`.
pub(crate) fn clamp_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}
