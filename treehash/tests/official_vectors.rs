//! Known-answer tests against the published BLAKE3 vectors: the input is
//! the repeating byte pattern `i % 251` truncated to each length.

use treehash::{Blake3Hasher, StreamingHash};

const VECTORS: &[(usize, &str)] = &[
    (
        0,
        "af1349b9f5f9a1a6a0404dee36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
    ),
    (
        1,
        "2d3adedff11b61f14c886e35afa036736dcd87a74d27b5c1510225d0f592e213",
    ),
    (
        63,
        "e9bc37a594daad83be9470df7f7b3798297c3d834ce80ba85d6e207627b7db7b",
    ),
    (
        64,
        "4eed7141ea4a5cd4b788606bd23f46e212af9cacebacdc7d1f4c6dc7f2511b98",
    ),
    (
        65,
        "de1e5fa0be70df6d2be8fffd0e99ceaa8eb6e8c93a63f2d8d1c30ecb6b263dee",
    ),
    (
        1023,
        "10108970eeda3eb932baac1428c7a2163b0e924c9a9e25b35bba72b28f70bd11",
    ),
    (
        1024,
        "42214739f095a406f3fc83deb889744ac00df831c10daa55189b5d121c855af7",
    ),
    (
        1025,
        "d00278ae47eb27b34faecf67b4fe263f82d5412916c1ffd97c8cb7fb814b8444",
    ),
    (
        2048,
        "e776b6028c7cd22a4d0ba182a8bf62205d2ef576467e838ed6f2529b85fba24a",
    ),
    (
        2049,
        "5f4d72f40d7a5f82b15ca2b2e44b1de3c2ef86c426c95c1af0b6879522563030",
    ),
    (
        102400,
        "bc3e3d41a1146b069abffad3c0d44860cf664390afce4d9661f7902e7943e085",
    ),
];

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn canonical_vectors_match() {
    for &(len, expected) in VECTORS {
        let mut hasher = Blake3Hasher::new();
        hasher.feed(&pattern(len));
        let digest = hasher.finalize().unwrap();
        assert_eq!(digest.hex(), expected, "input length {len}");
    }
}

#[test]
fn canonical_vectors_match_under_split_feeding() {
    for &(len, expected) in VECTORS {
        let data = pattern(len);

        // An uneven split schedule that never lines up with block or chunk
        // boundaries.
        let mut hasher = Blake3Hasher::new();
        let mut pos = 0;
        let mut step = 1;
        while pos < data.len() {
            let piece = step.min(data.len() - pos);
            hasher.feed(&data[pos..pos + piece]);
            pos += piece;
            step = step % 977 + 13;
        }
        assert_eq!(
            hasher.finalize().unwrap().hex(),
            expected,
            "input length {len}"
        );
    }
}
