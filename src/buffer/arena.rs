//! Allocation entry points and the pooling strategy behind them.
//!
//! Small requests are carved out of a shared pre-reserved chunk so that
//! allocating many short sequences does not hit the global allocator each
//! time. Regions handed out from a chunk never overlap and are never reused,
//! so pooled sequences behave exactly like isolated ones, except that a live
//! pooled slice keeps its whole chunk alive. Callers that care about that use
//! [`Arena::allocate_unpooled`].

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::args::Arg;
use super::bytes::{ByteSeq, Store};
use super::codec;
use super::types::error::{BufferError, Result};
use super::types::models::Encoding;

/// Largest capacity a single sequence may be allocated with.
pub const MAX_LENGTH: usize = u32::MAX as usize;

/// Pool chunk size used by [`Arena::default`].
pub const DEFAULT_POOL_SIZE: usize = 8 * 1024;

struct Chunk {
    store: Rc<Store>,
    offset: usize,
}

impl Chunk {
    fn new(size: usize) -> Self {
        Self {
            store: Rc::new(RefCell::new(vec![0u8; size].into_boxed_slice())),
            offset: 0,
        }
    }

    fn remaining(&self, pool_size: usize) -> usize {
        pool_size.saturating_sub(self.offset)
    }

    fn take(&mut self, size: usize) -> ByteSeq {
        let seq = ByteSeq::from_store(Rc::clone(&self.store), self.offset, size);
        // Keep every region 8-byte aligned.
        self.offset = (self.offset + size + 7) & !7;
        seq
    }
}

/// Allocation strategy for [`ByteSeq`]s.
///
/// An arena is an explicit object: every allocation names the arena it is
/// served from, and independent arenas never share memory.
pub struct Arena {
    pool_size: usize,
    pool: RefCell<Option<Chunk>>,
}

impl Arena {
    /// Creates an arena whose chunks hold `pool_size` bytes.
    ///
    /// Requests smaller than half a chunk are pooled; a `pool_size` of zero
    /// disables pooling.
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            pool: RefCell::new(None),
        }
    }

    /// An arena that serves every request with an isolated backing store.
    pub fn unpooled() -> Self {
        Self::new(0)
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Allocates `size` bytes.
    ///
    /// With `zero` set, every byte is guaranteed to be 0 and the request is
    /// served unpooled. Without it, contents are unspecified and small
    /// requests come from the pool.
    pub fn allocate(&self, size: usize, zero: bool) -> Result<ByteSeq> {
        if zero {
            self.allocate_unpooled(size)
        } else {
            self.allocate_pooled(size)
        }
    }

    /// Allocates an isolated, zero-filled backing store, bypassing the pool.
    pub fn allocate_unpooled(&self, size: usize) -> Result<ByteSeq> {
        check_size(size)?;
        Ok(ByteSeq::owned(vec![0u8; size].into_boxed_slice()))
    }

    /// Allocates from a dynamically typed size argument.
    ///
    /// Fails with `InvalidType` unless `size` is a non-negative integer.
    pub fn allocate_dynamic(&self, size: &Arg, zero: bool) -> Result<ByteSeq> {
        let size = size.to_size("size")?;
        self.allocate(size, zero)
    }

    fn allocate_pooled(&self, size: usize) -> Result<ByteSeq> {
        check_size(size)?;
        if size == 0 || size >= self.pool_size >> 1 {
            if size > 0 {
                debug!("Allocating {} bytes outside the pool", size);
            }
            return self.allocate_unpooled(size);
        }

        let mut pool = self.pool.borrow_mut();
        let needs_chunk = pool
            .as_ref()
            .map_or(true, |chunk| chunk.remaining(self.pool_size) < size);
        if needs_chunk {
            debug!("Reserving a new {} byte pool chunk", self.pool_size);
            *pool = Some(Chunk::new(self.pool_size));
        }
        match pool.as_mut() {
            Some(chunk) => Ok(chunk.take(size)),
            None => self.allocate_unpooled(size),
        }
    }

    /// Deep-copies `bytes` into a new sequence.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<ByteSeq> {
        let seq = self.allocate_pooled(bytes.len())?;
        seq.bytes_mut().copy_from_slice(bytes);
        Ok(seq)
    }

    /// Deep-copies another sequence or view. The result never aliases `source`.
    pub fn from_seq(&self, source: &ByteSeq) -> Result<ByteSeq> {
        let bytes = source.to_vec();
        self.from_bytes(&bytes)
    }

    /// Encodes `text` under `encoding` into a new sequence.
    pub fn from_str(&self, text: &str, encoding: Encoding) -> Result<ByteSeq> {
        let bytes = codec::encode(text, encoding)?;
        self.from_bytes(&bytes)
    }

    /// Concatenates `list` into a new sequence.
    ///
    /// With `total_length`, the result is truncated or zero-padded to exactly
    /// that many bytes.
    pub fn concat(&self, list: &[ByteSeq], total_length: Option<usize>) -> Result<ByteSeq> {
        let total = total_length.unwrap_or_else(|| list.iter().map(ByteSeq::len).sum());
        let result = self.allocate_pooled(total)?;
        let mut position = 0;
        for part in list {
            if position >= total {
                break;
            }
            position += part.copy_to(&result, position, 0, part.len());
        }
        if position < total {
            result.fill(0, position, total)?;
        }
        Ok(result)
    }

    /// Transcodes `source` from one encoding to another into a new sequence.
    pub fn transcode(&self, source: &ByteSeq, from: Encoding, to: Encoding) -> Result<ByteSeq> {
        let bytes = codec::transcode(&source.bytes(), from, to)?;
        self.from_bytes(&bytes)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_LENGTH {
        return Err(BufferError::out_of_range(
            "size",
            format!(">= 0 and <= {}", MAX_LENGTH),
            size,
        ));
    }
    Ok(())
}
