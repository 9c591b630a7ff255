//! # Byte-Oriented Hashing Helpers
//!
//! The message hash itself is MiMC (see [`super::mimc`]), but MiMC only
//! speaks field elements. Two byte-oriented hashes feed it:
//!
//! - **Keccak-256** (the pre-NIST padding, as on Ethereum) derives the MiMC
//!   round constants from a public seed, matching gnark-crypto's BN254 MiMC.
//! - **BLAKE3** (derive-key mode) maps free-text fields such as account
//!   names and memos onto a single BN254 scalar before they are absorbed.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};

use crate::config::TEXT_FIELD_CONTEXT;

/// Compute legacy Keccak-256 and return a fixed-size array.
pub fn keccak256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute a domain-separated hash using BLAKE3 with a context string.
///
/// Uses BLAKE3's `derive_key` mode, so two contexts can never collide on
/// the same input.
pub fn domain_separated_hash(context: &str, data: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

/// Map a free-text field onto a BN254 scalar.
///
/// Hash with domain-separated BLAKE3, then reduce the 256-bit digest mod r.
/// The reduction bias is below 2^-128.
///
/// # Example
///
/// ```
/// use rollup_txverify::crypto::hash::text_to_field;
///
/// assert_eq!(text_to_field("alice"), text_to_field("alice"));
/// assert_ne!(text_to_field("alice"), text_to_field("bob"));
/// ```
pub fn text_to_field(text: &str) -> Fr {
    let digest = domain_separated_hash(TEXT_FIELD_CONTEXT, text.as_bytes());
    Fr::from_le_bytes_mod_order(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            hex::encode(keccak256_array(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex::encode(keccak256_array(b"abc")),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn domain_separation_changes_output() {
        let a = domain_separated_hash("context-a", b"payload");
        let b = domain_separated_hash("context-b", b"payload");
        assert_ne!(a, b);
    }

    #[test]
    fn text_to_field_is_deterministic() {
        assert_eq!(text_to_field("gas.legend"), text_to_field("gas.legend"));
    }

    #[test]
    fn empty_text_still_maps_to_a_field_element() {
        // Empty memos are legal and must still contribute a fixed element.
        assert_eq!(text_to_field(""), text_to_field(""));
        assert_ne!(text_to_field(""), text_to_field(" "));
    }
}
