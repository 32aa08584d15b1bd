//! The block compression function: a 7-round mix over a 16-word working
//! vector, with the message schedule permuted between rounds.

use bitflags::bitflags;

use crate::constants::{BLOCK_WORDS, CV_WORDS, IV, MSG_PERMUTATION};

bitflags! {
    /// Domain-separation flags mixed into word 15 of the compression input.
    /// Exactly one compression call in a whole hash computation carries
    /// `ROOT`. The keyed-hash and key-derivation flags are part of the wire
    /// protocol but no public entry point sets them.
    pub struct Flags: u32 {
        const CHUNK_START = 1 << 0;
        const CHUNK_END = 1 << 1;
        const PARENT = 1 << 2;
        const ROOT = 1 << 3;
        const KEYED_HASH = 1 << 4;
        const DERIVE_KEY_CONTEXT = 1 << 5;
        const DERIVE_KEY_MATERIAL = 1 << 6;
    }
}

/// The quarter-round. `a..d` index the working vector; `m0`/`m1` are the two
/// message words this call consumes.
#[inline(always)]
fn g(v: &mut [u32; BLOCK_WORDS], a: usize, b: usize, c: usize, d: usize, m0: u32, m1: u32) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m0);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(12);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m1);
    v[d] = (v[d] ^ v[a]).rotate_right(8);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(7);
}

fn round(v: &mut [u32; BLOCK_WORDS], m: &[u32; BLOCK_WORDS]) {
    // Columns.
    g(v, 0, 4, 8, 12, m[0], m[1]);
    g(v, 1, 5, 9, 13, m[2], m[3]);
    g(v, 2, 6, 10, 14, m[4], m[5]);
    g(v, 3, 7, 11, 15, m[6], m[7]);
    // Diagonals.
    g(v, 0, 5, 10, 15, m[8], m[9]);
    g(v, 1, 6, 11, 12, m[10], m[11]);
    g(v, 2, 7, 8, 13, m[12], m[13]);
    g(v, 3, 4, 9, 14, m[14], m[15]);
}

fn permute(m: &mut [u32; BLOCK_WORDS]) {
    let mut permuted = [0u32; BLOCK_WORDS];
    for (dst, &src) in permuted.iter_mut().zip(MSG_PERMUTATION.iter()) {
        *dst = m[src];
    }
    *m = permuted;
}

/// Compresses one message block, returning the full 16-word extended output.
/// Words 0..8 are the next chaining value; words 8..16 are only meaningful
/// to wider-output consumers and are truncated away everywhere in this crate.
pub(crate) fn compress(
    cv: &[u32; CV_WORDS],
    block: &[u32; BLOCK_WORDS],
    counter: u64,
    block_len: u32,
    flags: Flags,
) -> [u32; BLOCK_WORDS] {
    let mut v = [
        cv[0],
        cv[1],
        cv[2],
        cv[3],
        cv[4],
        cv[5],
        cv[6],
        cv[7],
        IV[0],
        IV[1],
        IV[2],
        IV[3],
        counter as u32,
        (counter >> 32) as u32,
        block_len,
        flags.bits(),
    ];
    let mut m = *block;

    round(&mut v, &m); // round 1
    permute(&mut m);
    round(&mut v, &m); // round 2
    permute(&mut m);
    round(&mut v, &m); // round 3
    permute(&mut m);
    round(&mut v, &m); // round 4
    permute(&mut m);
    round(&mut v, &m); // round 5
    permute(&mut m);
    round(&mut v, &m); // round 6
    permute(&mut m);
    round(&mut v, &m); // round 7

    for i in 0..CV_WORDS {
        v[i] ^= v[i + CV_WORDS];
        v[i + CV_WORDS] ^= cv[i];
    }
    v
}

/// Truncates an extended compression output to the next chaining value.
pub(crate) fn first_8_words(output: [u32; BLOCK_WORDS]) -> [u32; CV_WORDS] {
    let mut cv = [0u32; CV_WORDS];
    cv.copy_from_slice(&output[..CV_WORDS]);
    cv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_is_a_bijection() {
        let mut seen = [false; BLOCK_WORDS];
        for &i in MSG_PERMUTATION.iter() {
            assert!(!seen[i]);
            seen[i] = true;
        }
    }

    #[test]
    fn flag_bits_are_disjoint() {
        let all = [
            Flags::CHUNK_START,
            Flags::CHUNK_END,
            Flags::PARENT,
            Flags::ROOT,
            Flags::KEYED_HASH,
            Flags::DERIVE_KEY_CONTEXT,
            Flags::DERIVE_KEY_MATERIAL,
        ];
        let mut acc = Flags::empty();
        for f in all {
            assert!(!acc.intersects(f));
            acc |= f;
        }
        assert_eq!(acc.bits(), 0x7f);
    }

    #[test]
    fn compression_is_deterministic() {
        let cv = IV;
        let block = [0x0123_4567u32; BLOCK_WORDS];
        let a = compress(&cv, &block, 7, 64, Flags::CHUNK_START);
        let b = compress(&cv, &block, 7, 64, Flags::CHUNK_START);
        assert_eq!(a, b);
        assert_eq!(&first_8_words(a)[..], &a[..CV_WORDS]);
    }

    #[test]
    fn compression_depends_on_every_parameter() {
        let cv = IV;
        let block = [0u32; BLOCK_WORDS];
        let base = compress(&cv, &block, 0, 64, Flags::empty());

        assert_ne!(base, compress(&cv, &block, 1, 64, Flags::empty()));
        assert_ne!(base, compress(&cv, &block, 0, 63, Flags::empty()));
        assert_ne!(base, compress(&cv, &block, 0, 64, Flags::CHUNK_END));

        let mut other_block = block;
        other_block[15] = 1;
        assert_ne!(base, compress(&cv, &other_block, 0, 64, Flags::empty()));
    }
}
