//! Little-endian conversions between 32-bit word arrays and byte buffers.
//!
//! The fallible slice helpers validate lengths at the boundary; the internal
//! fixed-size paths rely on the chunk and block geometry being compile-time
//! constants.

use crate::constants::{BLOCK_SIZE, BLOCK_WORDS, CV_WORDS, DIGEST_SIZE};
use crate::error::{Result, TreeHashError};

/// Decodes `src` as little-endian 32-bit words into `dst`. Fails unless
/// `src` is exactly four bytes per destination word.
pub fn le_words_from_bytes(src: &[u8], dst: &mut [u32]) -> Result<()> {
    if src.len() != dst.len() * 4 {
        return Err(TreeHashError::BadConversionLength {
            expected: dst.len() * 4,
            actual: src.len(),
        });
    }
    for (word, bytes) in dst.iter_mut().zip(src.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    Ok(())
}

/// Encodes `src` as little-endian bytes into `dst`. Fails unless `dst` is
/// exactly four bytes per source word.
pub fn le_bytes_from_words(src: &[u32], dst: &mut [u8]) -> Result<()> {
    if dst.len() != src.len() * 4 {
        return Err(TreeHashError::BadConversionLength {
            expected: src.len() * 4,
            actual: dst.len(),
        });
    }
    for (word, bytes) in src.iter().zip(dst.chunks_exact_mut(4)) {
        bytes.copy_from_slice(&word.to_le_bytes());
    }
    Ok(())
}

/// Loads one 64-byte message block as 16 words.
pub(crate) fn block_words(block: &[u8]) -> [u32; BLOCK_WORDS] {
    debug_assert_eq!(block.len(), BLOCK_SIZE);
    let mut words = [0u32; BLOCK_WORDS];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

/// Serializes a chaining value to its 32-byte wire form.
pub(crate) fn cv_bytes(cv: &[u32; CV_WORDS]) -> [u8; DIGEST_SIZE] {
    let mut bytes = [0u8; DIGEST_SIZE];
    for (word, out) in cv.iter().zip(bytes.chunks_exact_mut(4)) {
        out.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_byte_round_trip() {
        let words = [0x01020304u32, 0xdeadbeef, 0, u32::MAX];
        let mut bytes = [0u8; 16];
        le_bytes_from_words(&words, &mut bytes).unwrap();
        assert_eq!(&bytes[..4], &[0x04, 0x03, 0x02, 0x01]);

        let mut decoded = [0u32; 4];
        le_words_from_bytes(&bytes, &mut decoded).unwrap();
        assert_eq!(decoded, words);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut words = [0u32; 4];
        let err = le_words_from_bytes(&[0u8; 15], &mut words).unwrap_err();
        assert!(matches!(
            err,
            TreeHashError::BadConversionLength {
                expected: 16,
                actual: 15
            }
        ));

        let mut bytes = [0u8; 17];
        assert!(le_bytes_from_words(&words, &mut bytes).is_err());
    }
}
