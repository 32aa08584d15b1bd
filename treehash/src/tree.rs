//! Incremental construction of the left-balanced binary chunk tree.
//!
//! Completed chunks arrive in stream order as level-0 leaves. Whenever the
//! top two pending subtrees cover the same number of chunks they merge into
//! a parent, so the pending stack stays sorted by strictly decreasing level
//! and the tree shape is a function of the chunk count alone, independent
//! of how the caller split the input.

use tracing::debug;

use crate::chunk;
use crate::compress::{compress, first_8_words, Flags};
use crate::constants::{BLOCK_SIZE, BLOCK_WORDS, CHUNK_SIZE, CV_WORDS, IV};
use crate::digest::Digest;
use crate::error::{Result, TreeHashError};

/// A completed subtree awaiting a sibling: `cv` summarizes exactly
/// `2^level` consecutive chunks.
#[derive(Clone, Debug)]
struct SubtreeNode {
    cv: [u32; CV_WORDS],
    level: u32,
}

/// Parent compression: the two child chaining values concatenated form the
/// message block, with the IV as chaining input and a zero counter.
fn parent_cv(
    left: &[u32; CV_WORDS],
    right: &[u32; CV_WORDS],
    flags: Flags,
) -> [u32; CV_WORDS] {
    let mut block = [0u32; BLOCK_WORDS];
    block[..CV_WORDS].copy_from_slice(left);
    block[CV_WORDS..].copy_from_slice(right);
    first_8_words(compress(&IV, &block, 0, BLOCK_SIZE as u32, flags))
}

#[derive(Default)]
pub(crate) struct TreeBuilder {
    /// Number of chunk leaves pushed so far; doubles as the compression
    /// counter for the next chunk.
    processed_chunks: u64,
    pending: Vec<SubtreeNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.processed_chunks = 0;
        self.pending.clear();
    }

    pub fn processed_chunks(&self) -> u64 {
        self.processed_chunks
    }

    /// Absorbs a run of interior chunks (chunks known not to be the message
    /// tail). `run` must be a whole number of chunks.
    pub fn absorb_interior(&mut self, run: &[u8]) {
        debug_assert_eq!(run.len() % CHUNK_SIZE, 0);
        for chunk_bytes in run.chunks_exact(CHUNK_SIZE) {
            let cv = chunk::interior_chunk_cv(chunk_bytes, self.processed_chunks);
            self.push_leaf(cv);
        }
    }

    fn push_leaf(&mut self, cv: [u32; CV_WORDS]) {
        self.pending.push(SubtreeNode { cv, level: 0 });
        self.processed_chunks += 1;
        self.merge_ready();
    }

    /// Carry propagation: while the two most recent subtrees cover the same
    /// number of chunks, replace them with their parent.
    fn merge_ready(&mut self) {
        while let [.., left, right] = self.pending.as_slice() {
            if left.level != right.level {
                break;
            }
            let merged = SubtreeNode {
                cv: parent_cv(&left.cv, &right.cv, Flags::PARENT),
                level: left.level + 1,
            };
            let keep = self.pending.len() - 2;
            self.pending.truncate(keep);
            self.pending.push(merged);
        }
    }

    /// Absorbs the terminal chunk and collapses the pending stack to the
    /// root digest. `padded` and `last_block_len` are as in the terminal
    /// chunk contract; the root flag for the single-chunk case is decided
    /// here from the chunk counter.
    pub fn finalize_last_chunk(&mut self, padded: &[u8], last_block_len: u32) -> Result<Digest> {
        let cv = chunk::terminal_chunk_cv(padded, last_block_len, self.processed_chunks);
        self.pending.push(SubtreeNode { cv, level: 0 });
        debug!(
            "collapsing hash tree: {} interior chunks, {} pending subtrees",
            self.processed_chunks,
            self.pending.len()
        );
        self.collapse_to_root()
    }

    /// Drains the stack from the top: the accumulator is always the right
    /// child (it summarizes the later part of the stream), each popped node
    /// the left. The merge that empties the stack carries the root flag.
    fn collapse_to_root(&mut self) -> Result<Digest> {
        let mut acc = match self.pending.pop() {
            Some(node) => node.cv,
            None => {
                return Err(TreeHashError::TreeInvariantError(
                    "finalize reached with no pending subtree".to_owned(),
                ))
            }
        };
        while let Some(left) = self.pending.pop() {
            let mut flags = Flags::PARENT;
            if self.pending.is_empty() {
                flags |= Flags::ROOT;
            }
            acc = parent_cv(&left.cv, &acc, flags);
        }
        Ok(Digest::from_root_words(&acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_levels_strictly_decrease() {
        let chunk = [0x5au8; CHUNK_SIZE];
        let mut builder = TreeBuilder::new();
        for _ in 0..11 {
            builder.absorb_interior(&chunk);
            for pair in builder.pending.windows(2) {
                assert!(pair[0].level > pair[1].level);
            }
        }
        // 11 = 0b1011 chunks leave one subtree per set bit.
        assert_eq!(builder.pending.len(), 3);
        assert_eq!(builder.processed_chunks(), 11);
    }

    #[test]
    fn power_of_two_chunk_counts_collapse_to_one_subtree() {
        let mut builder = TreeBuilder::new();
        builder.absorb_interior(&vec![0u8; 8 * CHUNK_SIZE]);
        assert_eq!(builder.pending.len(), 1);
        assert_eq!(builder.pending[0].level, 3);
    }

    #[test]
    fn reset_clears_all_state() {
        let mut builder = TreeBuilder::new();
        builder.absorb_interior(&[7u8; CHUNK_SIZE]);
        builder.reset();
        assert_eq!(builder.processed_chunks(), 0);
        assert!(builder.pending.is_empty());
    }

    #[test]
    fn finalize_on_empty_builder_is_an_invariant_violation() {
        let mut builder = TreeBuilder::new();
        assert!(matches!(
            builder.collapse_to_root(),
            Err(TreeHashError::TreeInvariantError(_))
        ));
    }
}
