//! The treehash module provides an incremental BLAKE3 hashing engine.
//!
//! Input is consumed as 1024-byte chunks, each folded block by block through
//! the compression function into a chaining value; chunk chaining values are
//! the leaves of a left-balanced binary tree whose completed subtrees merge
//! eagerly as data arrives. A session holds at most one complete chunk plus
//! a sub-chunk tail un-forwarded, so the same byte stream produces the same
//! digest regardless of how the caller splits it across calls.
//!
//! The main entry point is [Blake3Hasher], used through the [StreamingHash]
//! session interface:
//! ```ignore
//! let mut hasher = Blake3Hasher::new();
//! hasher.feed(b"hello ");
//! hasher.feed(b"world");
//! let digest = hasher.finalize()?;
//! println!("{digest}");
//! ```
//!
//! Digests are [Digest] values: 32 raw bytes (the little-endian
//! serialization of the eight root chaining-value words) with hex
//! formatting and parsing attached.
//!
//! Keyed hashing, key derivation, and extendable output are not offered;
//! the corresponding domain-separation flags exist in [Flags] for wire
//! completeness only.

#![cfg_attr(feature = "strict", deny(warnings))]

mod chunk;
mod compress;
pub mod constants;
mod digest;
mod session;
mod tree;
mod words;


pub mod error;

pub use compress::Flags;
pub use digest::{Digest, DigestBytesParseError, DigestHexParseError};
pub use error::{Result, TreeHashError};
pub use session::{Blake3Hasher, StreamingHash};
pub use words::{le_bytes_from_words, le_words_from_bytes};
