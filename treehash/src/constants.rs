/// Bytes per compression-function message block.
pub const BLOCK_SIZE: usize = 64;
/// 32-bit words per message block.
pub const BLOCK_WORDS: usize = 16;
/// Bytes per chunk, the leaf granularity of the hash tree.
pub const CHUNK_SIZE: usize = 1024;
/// Message blocks in a full chunk.
pub const BLOCKS_PER_CHUNK: usize = CHUNK_SIZE / BLOCK_SIZE;
/// 32-bit words in a chaining value.
pub const CV_WORDS: usize = 8;
/// Bytes in the final digest.
pub const DIGEST_SIZE: usize = 32;

/// Session input buffer capacity, in chunks. Input accumulates up to this
/// many chunks before a bulk absorption pass runs.
pub const BUFFER_CHUNKS: usize = 0x20;

/// Initial chaining value. The same eight words also seed the constant half
/// of the compression working vector (words 8..12 take the first four).
pub const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Message schedule permutation applied between rounds: the schedule for
/// round r+1 at position i is the round-r schedule at `MSG_PERMUTATION[i]`.
pub(crate) const MSG_PERMUTATION: [usize; 16] =
    [2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8];
