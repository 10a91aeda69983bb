// libndeftag/src/protocol/addressing.rs

//! Block addressing for the 1K sector layout.
//!
//! Blocks are walked upward from the first data block. Every fourth block
//! (`index % 4 == 3`) is a sector trailer holding keys and access bits; it
//! never carries payload, and crossing it means the next sector must be
//! authenticated before its first data block is touched.

use crate::constants::BLOCK_SIZE;
use crate::types::{BlockAddress, BlockKind};

/// Classify a raw block index.
pub fn classify(index: u8) -> BlockKind {
    BlockAddress::new(index).kind()
}

/// Trailer indices crossed while scanning `start..end`.
pub fn sectors_between(start: u8, end: u8) -> impl Iterator<Item = BlockAddress> {
    (start..end)
        .map(BlockAddress::new)
        .filter(BlockAddress::is_trailer)
}

/// One step of a block walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Payload block
    Data(BlockAddress),
    /// Trailer; authenticate before the next data block
    Trailer(BlockAddress),
}

/// Iterator over `first..limit` tagging each index as data or trailer.
#[derive(Debug, Clone)]
pub struct BlockWalk {
    next: u8,
    limit: u8,
}

impl BlockWalk {
    /// Walk `first..limit`
    pub fn new(first: u8, limit: u8) -> Self {
        Self { next: first, limit }
    }
}

impl Iterator for BlockWalk {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.limit {
            return None;
        }
        let addr = BlockAddress::new(self.next);
        self.next += 1;
        Some(match addr.kind() {
            BlockKind::Data => Step::Data(addr),
            BlockKind::Trailer => Step::Trailer(addr),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.limit.saturating_sub(self.next) as usize;
        (n, Some(n))
    }
}

/// Data blocks in `first..limit`, trailers skipped.
pub fn data_blocks(first: u8, limit: u8) -> impl Iterator<Item = BlockAddress> {
    BlockWalk::new(first, limit).filter_map(|step| match step {
        Step::Data(addr) => Some(addr),
        Step::Trailer(_) => None,
    })
}

/// Bytes that fit into the data blocks of `first..limit`.
pub fn data_capacity(first: u8, limit: u8) -> usize {
    data_blocks(first, limit).count() * BLOCK_SIZE
}

/// Data blocks needed to hold `len` bytes.
pub fn blocks_needed(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}

/// Map a byte offset in the on-tag byte stream to the data block holding it
/// and the offset inside that block. Returns `None` past the last index.
pub fn block_for_offset(first: u8, offset: usize) -> Option<(BlockAddress, usize)> {
    data_blocks(first, u8::MAX)
        .nth(offset / BLOCK_SIZE)
        .map(|addr| (addr, offset % BLOCK_SIZE))
}
