//! Shared Hash Primitive
//!
//! Every construction in this crate is built on one 256-bit hash function,
//! chosen at build time:
//!
//! - SHA-256 (default)
//! - SHA3-256 (`hash-sha3` feature)
//!
//! Inputs are plain concatenations. Callers that mix variable-length parts are
//! responsible for keeping the encoding unambiguous.

use sha2::Digest;
use subtle::ConstantTimeEq;

/// Output length of the hash function in bytes
pub const HASH_LEN: usize = 32;

/// A fixed-length hash output
pub type HashOutput = [u8; HASH_LEN];

#[cfg(not(feature = "hash-sha3"))]
type Hasher = sha2::Sha256;

#[cfg(feature = "hash-sha3")]
type Hasher = sha3::Sha3_256;

/// Hash a single byte string
#[must_use]
pub fn hash(data: &[u8]) -> HashOutput {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash the concatenation `parts[0] || parts[1] || ...`
#[must_use]
pub fn hash_parts(parts: &[&[u8]]) -> HashOutput {
    let mut hasher = Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Constant-time equality.
///
/// Slices of different length compare unequal; the length itself is not secret.
#[must_use]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Name of the hash function compiled into this build
#[must_use]
pub const fn algorithm_name() -> &'static str {
    if cfg!(feature = "hash-sha3") { "SHA3-256" } else { "SHA-256" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(feature = "hash-sha3"))]
    fn test_sha256_known_answer() {
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(hex::encode(hash(b"abc")), expected);
        assert_eq!(algorithm_name(), "SHA-256");
    }

    #[test]
    #[cfg(feature = "hash-sha3")]
    fn test_sha3_known_answer() {
        let expected = "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532";
        assert_eq!(hex::encode(hash(b"abc")), expected);
        assert_eq!(algorithm_name(), "SHA3-256");
    }

    #[test]
    fn test_hash_parts_matches_concatenation() {
        let joined = hash(b"helloworld");
        assert_eq!(hash_parts(&[b"hello".as_slice(), b"world".as_slice()]), joined);
        let pieces: [&[u8]; 4] = [b"hel", b"lowo", b"", b"rld"];
        assert_eq!(hash_parts(&pieces), joined);
    }

    #[test]
    fn test_ct_eq() {
        let a = hash(b"a");
        let mut b = a;
        assert!(ct_eq(&a, &b));

        b[HASH_LEN - 1] ^= 0x01;
        assert!(!ct_eq(&a, &b));

        assert!(!ct_eq(&a, &a[..HASH_LEN - 1]));
        assert!(ct_eq(b"", b""));
    }
}
