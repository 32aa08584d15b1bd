//! Chunk-to-leaf conversion: folds the blocks of one chunk through the
//! compression function, producing the chunk's chaining value.

use crate::compress::{compress, first_8_words, Flags};
use crate::constants::{BLOCKS_PER_CHUNK, BLOCK_SIZE, CHUNK_SIZE, CV_WORDS, IV};
use crate::words::block_words;

/// Chaining value of a full 1024-byte chunk known not to be the message
/// tail. Block 0 carries `CHUNK_START`, block 15 `CHUNK_END`, never `ROOT`;
/// every block compresses with the chunk's index as the counter.
pub(crate) fn interior_chunk_cv(chunk: &[u8], chunk_index: u64) -> [u32; CV_WORDS] {
    debug_assert_eq!(chunk.len(), CHUNK_SIZE);

    let mut cv = IV;
    for (i, block) in chunk.chunks_exact(BLOCK_SIZE).enumerate() {
        let mut flags = Flags::empty();
        if i == 0 {
            flags |= Flags::CHUNK_START;
        }
        if i == BLOCKS_PER_CHUNK - 1 {
            flags |= Flags::CHUNK_END;
        }
        cv = first_8_words(compress(
            &cv,
            &block_words(block),
            chunk_index,
            BLOCK_SIZE as u32,
            flags,
        ));
    }
    cv
}

/// Chaining value of the terminal chunk of the whole message. `padded` holds
/// 1..=16 whole blocks with the tail zero-filled; `last_block_len` is the
/// true byte count of the final block (0..=64, zero only for the empty
/// message). The final block additionally carries `ROOT` iff this is chunk
/// index 0, i.e. the message fits in a single chunk.
pub(crate) fn terminal_chunk_cv(
    padded: &[u8],
    last_block_len: u32,
    chunk_index: u64,
) -> [u32; CV_WORDS] {
    debug_assert!(!padded.is_empty());
    debug_assert!(padded.len() <= CHUNK_SIZE);
    debug_assert_eq!(padded.len() % BLOCK_SIZE, 0);
    debug_assert!(last_block_len as usize <= BLOCK_SIZE);

    let blocks = padded.len() / BLOCK_SIZE;
    let mut cv = IV;
    for (i, block) in padded.chunks_exact(BLOCK_SIZE).enumerate() {
        let mut flags = Flags::empty();
        let mut block_len = BLOCK_SIZE as u32;
        if i == 0 {
            flags |= Flags::CHUNK_START;
        }
        if i == blocks - 1 {
            flags |= Flags::CHUNK_END;
            if chunk_index == 0 {
                flags |= Flags::ROOT;
            }
            block_len = last_block_len;
        }
        cv = first_8_words(compress(
            &cv,
            &block_words(block),
            chunk_index,
            block_len,
            flags,
        ));
    }
    cv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cv_depends_on_chunk_index() {
        let chunk = [0xabu8; CHUNK_SIZE];
        assert_ne!(interior_chunk_cv(&chunk, 0), interior_chunk_cv(&chunk, 1));
    }

    #[test]
    fn terminal_cv_distinguishes_sole_chunk_from_tail_chunk() {
        let padded = [0u8; BLOCK_SIZE];
        // Same bytes, but only chunk index 0 gets the root flag.
        assert_ne!(
            terminal_chunk_cv(&padded, 64, 0),
            terminal_chunk_cv(&padded, 64, 1)
        );
    }

    #[test]
    fn terminal_cv_distinguishes_true_block_length() {
        let padded = [0u8; BLOCK_SIZE];
        assert_ne!(
            terminal_chunk_cv(&padded, 0, 0),
            terminal_chunk_cv(&padded, 64, 0)
        );
    }
}
