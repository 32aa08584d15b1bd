//! The incremental hashing session: arbitrary-sized caller input in,
//! 32-byte digest out.
//!
//! Whether a completed 1024-byte chunk is the terminal chunk of the message
//! is unknowable until the caller signals end of input, so the session never
//! forwards the most recently completed chunk to the tree until another
//! complete chunk is known to follow. That one held-back chunk, plus the
//! sub-chunk tail sitting in the block buffer, is resolved at finalize time.

use std::io::Read;

use blockpipe::BlockBuffer;
use tracing::debug;

use crate::constants::{BLOCK_SIZE, BUFFER_CHUNKS, CHUNK_SIZE, DIGEST_SIZE};
use crate::digest::Digest;
use crate::error::{Result, TreeHashError};
use crate::tree::TreeBuilder;

/// Capability interface for incremental hash sessions.
///
/// A session accepts input in arbitrarily sized pieces, produces its digest
/// exactly once per lifecycle, and can be re-armed with [reset]. Sessions
/// are exclusively owned; share one across threads behind external
/// synchronization or not at all.
///
/// [reset]: StreamingHash::reset
pub trait StreamingHash {
    /// Digest size in bytes.
    fn digest_size(&self) -> usize;

    /// The input granularity the session buffers internally, in bytes.
    fn input_block_size(&self) -> usize;

    /// Accumulates `data` into the session. May be called any number of
    /// times before [finalize]. Returns the number of bytes consumed,
    /// always `data.len()`.
    ///
    /// [finalize]: StreamingHash::finalize
    fn feed(&mut self, data: &[u8]) -> u64;

    /// Pulls `reader` to exhaustion into the session. Returns the total
    /// number of bytes read.
    fn feed_from(&mut self, reader: &mut dyn Read) -> Result<u64>;

    /// Consumes all buffered state and returns the digest. Fails with
    /// [TreeHashError::FinalizeAfterFinalize] on every call after the first
    /// until the session is [reset].
    ///
    /// [reset]: StreamingHash::reset
    fn finalize(&mut self) -> Result<Digest>;

    /// Discards all unfinalized state and re-arms the session; afterwards it
    /// is indistinguishable from a freshly constructed one.
    fn reset(&mut self);
}

/// An incremental BLAKE3 hashing session.
pub struct Blake3Hasher {
    buffer: BlockBuffer,
    tree: TreeBuilder,
    held_chunk: [u8; CHUNK_SIZE],
    holds_chunk: bool,
    finalized: bool,
}

impl Blake3Hasher {
    pub fn new() -> Self {
        Blake3Hasher {
            buffer: BlockBuffer::new(BUFFER_CHUNKS, CHUNK_SIZE),
            tree: TreeBuilder::new(),
            held_chunk: [0u8; CHUNK_SIZE],
            holds_chunk: false,
            finalized: false,
        }
    }

    /// Sink for chunk-aligned runs out of the block buffer: forward the
    /// held-back chunk (another complete chunk now follows it), hold back
    /// the run's own last chunk, absorb everything in between.
    fn absorb_aligned(
        tree: &mut TreeBuilder,
        held_chunk: &mut [u8; CHUNK_SIZE],
        holds_chunk: &mut bool,
        run: &[u8],
    ) {
        debug_assert!(!run.is_empty());
        debug_assert_eq!(run.len() % CHUNK_SIZE, 0);

        if *holds_chunk {
            tree.absorb_interior(&held_chunk[..]);
        }

        let split = run.len() - CHUNK_SIZE;
        held_chunk.copy_from_slice(&run[split..]);
        *holds_chunk = true;

        if split > 0 {
            tree.absorb_interior(&run[..split]);
        }
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingHash for Blake3Hasher {
    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn input_block_size(&self) -> usize {
        CHUNK_SIZE
    }

    fn feed(&mut self, data: &[u8]) -> u64 {
        let Blake3Hasher {
            buffer,
            tree,
            held_chunk,
            holds_chunk,
            ..
        } = self;
        buffer.load(data, &mut |run| {
            Self::absorb_aligned(tree, held_chunk, holds_chunk, run)
        })
    }

    fn feed_from(&mut self, reader: &mut dyn Read) -> Result<u64> {
        let Blake3Hasher {
            buffer,
            tree,
            held_chunk,
            holds_chunk,
            ..
        } = self;
        let total = buffer.load_from(reader, &mut |run| {
            Self::absorb_aligned(tree, held_chunk, holds_chunk, run)
        })?;
        Ok(total)
    }

    fn finalize(&mut self) -> Result<Digest> {
        if self.finalized {
            return Err(TreeHashError::FinalizeAfterFinalize);
        }
        self.finalized = true;

        let tail_len = self.buffer.pending().len();
        debug!(
            "finalizing session: {} tail bytes, held chunk: {}",
            tail_len, self.holds_chunk
        );

        if tail_len == 0 && !self.holds_chunk {
            // Nothing was ever buffered: the empty message hashes as a
            // single zero block with a true length of zero.
            let empty_block = [0u8; BLOCK_SIZE];
            return self.tree.finalize_last_chunk(&empty_block, 0);
        }

        if tail_len == 0 {
            // The message ends exactly on the held-back chunk.
            return self
                .tree
                .finalize_last_chunk(&self.held_chunk, BLOCK_SIZE as u32);
        }

        // Tail bytes exist, so the held-back chunk has a successor and is
        // interior after all.
        if self.holds_chunk {
            self.tree.absorb_interior(&self.held_chunk);
            self.holds_chunk = false;
        }

        let pending = self.buffer.pending();
        let interior_len = (tail_len - 1) / CHUNK_SIZE * CHUNK_SIZE;
        if interior_len > 0 {
            self.tree.absorb_interior(&pending[..interior_len]);
        }

        // The true terminal chunk: 1..=1024 bytes, zero-padded to whole
        // blocks, with the real length of its final block passed through.
        let tail = &pending[interior_len..];
        let mut padded = [0u8; CHUNK_SIZE];
        padded[..tail.len()].copy_from_slice(tail);
        let padded_len = (tail.len() - 1) / BLOCK_SIZE * BLOCK_SIZE + BLOCK_SIZE;
        let last_block_len = match tail.len() % BLOCK_SIZE {
            0 => BLOCK_SIZE as u32,
            partial => partial as u32,
        };

        self.tree
            .finalize_last_chunk(&padded[..padded_len], last_block_len)
    }

    fn reset(&mut self) {
        debug!("resetting session");
        self.buffer.clear();
        self.tree.reset();
        self.holds_chunk = false;
        self.finalized = false;
    }
}
