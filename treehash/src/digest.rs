use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

use crate::constants::{CV_WORDS, DIGEST_SIZE};
use crate::words::cv_bytes;

/**************************************************************************/
/*                                                                        */
/*                                 Digest                                 */
/*                                                                        */
/**************************************************************************/

/// A 256-bit BLAKE3 digest: the little-endian serialization of the eight
/// root chaining-value words.
///
/// Convenient trait implementations are provided for printing, comparing,
/// and parsing.
///
/// ```ignore
/// let mut hasher = Blake3Hasher::new();
/// hasher.feed(b"hello world");
/// let digest = hasher.finalize()?;
/// println!("{}", digest);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Serializes the root chaining value to its wire form.
    pub(crate) fn from_root_words(cv: &[u32; CV_WORDS]) -> Self {
        Digest(cv_bytes(cv))
    }

    /// Returns the hexadecimal printout of the digest.
    pub fn hex(&self) -> String {
        let mut out = String::with_capacity(2 * DIGEST_SIZE);
        for byte in self.0.iter() {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// Parses a hexadecimal string as a Digest, returning
    /// Err(DigestHexParseError) on failure.
    pub fn from_hex(h: &str) -> Result<Digest, DigestHexParseError> {
        if h.len() != 2 * DIGEST_SIZE {
            return Err(DigestHexParseError {});
        }
        let good = h.as_bytes().iter().all(|c| c.is_ascii_hexdigit());
        if !good {
            return Err(DigestHexParseError {});
        }
        let mut ret = Digest::default();
        for (i, byte) in ret.0.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&h[2 * i..2 * i + 2], 16)?;
        }
        Ok(ret)
    }

    /// Returns the digest as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_slice(value: &[u8]) -> Result<Self, DigestBytesParseError> {
        if value.len() != DIGEST_SIZE {
            return Err(DigestBytesParseError);
        }
        let mut digest = Digest::default();
        digest.0.copy_from_slice(value);
        Ok(digest)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(value: [u8; DIGEST_SIZE]) -> Self {
        Digest(value)
    }
}

impl From<&[u8; DIGEST_SIZE]> for Digest {
    fn from(value: &[u8; DIGEST_SIZE]) -> Self {
        Digest(*value)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = DigestBytesParseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(value)
    }
}

impl From<Digest> for Vec<u8> {
    fn from(val: Digest) -> Self {
        val.as_bytes().into()
    }
}

/// The error type that is returned if [Digest::from_hex] fails.
#[derive(Debug, Clone)]
pub struct DigestHexParseError;

impl Error for DigestHexParseError {}

impl fmt::Display for DigestHexParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid hex input for Digest")
    }
}

impl From<ParseIntError> for DigestHexParseError {
    fn from(_err: ParseIntError) -> Self {
        DigestHexParseError {}
    }
}

/// The error type that is returned if TryFrom<&[u8]> fails.
#[derive(Debug, Clone)]
pub struct DigestBytesParseError;

impl Error for DigestBytesParseError {}

impl fmt::Display for DigestBytesParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid bytes input for Digest")
    }
}

impl fmt::LowerHex for Digest {
    /// Allow the Digest to be printed with
    /// `println!("{:x}", digest)`
    /// This prints the hexadecimal representation of the digest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.hex())
    }
}

impl fmt::Display for Digest {
    /// Allow the Digest to be printed with
    /// `println!("{}", digest)`
    /// This prints the hexadecimal representation of the digest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.hex())
    }
}

impl fmt::Debug for Digest {
    /// Allow the Digest to be printed with
    /// `println!("{:?}", digest)`
    /// This prints the hexadecimal representation of the digest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.hex())
    }
}
