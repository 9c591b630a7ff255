//! # Protocol Configuration & Constants
//!
//! Every magic number the verifier depends on lives here. Most of these are
//! consensus-critical: the proving circuit hard-codes the same values, so a
//! change here without a matching circuit change means every signature the
//! verifier accepts is one the prover will reject.

// ---------------------------------------------------------------------------
// Transaction Type Codes
// ---------------------------------------------------------------------------

/// Transaction type codes, absorbed as the first element of every message
/// hash. Codes 0..=3 belong to L1-originated priority operations (deposits,
/// registrations, full exits) which never pass through this verifier.
pub const TX_TYPE_TRANSFER: u8 = 4;
pub const TX_TYPE_WITHDRAW: u8 = 5;
pub const TX_TYPE_CREATE_COLLECTION: u8 = 6;
pub const TX_TYPE_MINT_NFT: u8 = 7;
pub const TX_TYPE_TRANSFER_NFT: u8 = 8;
pub const TX_TYPE_SET_NFT_PRICE: u8 = 9;
pub const TX_TYPE_BUY_NFT: u8 = 10;
pub const TX_TYPE_WITHDRAW_NFT: u8 = 11;

// ---------------------------------------------------------------------------
// Message Hashing (MiMC over BN254 Fr)
// ---------------------------------------------------------------------------

/// Number of MiMC rounds. 110 rounds of x^5 over the 254-bit BN254 scalar
/// field gives the usual `ceil(log_5(r))` security margin.
pub const MIMC_ROUNDS: usize = 110;

/// Seed for the MiMC round constants, as in gnark-crypto's BN254 MiMC.
/// Constant `i` is the `i+1`-th iterate of Keccak-256 starting from
/// `Keccak-256(MIMC_SEED)`, reduced mod r.
pub const MIMC_SEED: &[u8] = b"seed";

/// BLAKE3 derive-key context for free-text fields (names, memos).
pub const TEXT_FIELD_CONTEXT: &str = "rollup-txverify 2026 text-to-field";

/// Digest length in bytes. One BN254 scalar, big-endian.
pub const MSG_HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Keys & Signatures
// ---------------------------------------------------------------------------

/// Signatures are Ed25519 over the 32-byte message hash.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Public (verifying) key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Amount & Field Limits
// ---------------------------------------------------------------------------

/// Widest amount the circuit accepts. Anything wider would wrap modulo r
/// when encoded as a field element, so two different amounts could share
/// a signature.
pub const MAX_AMOUNT_BITS: u64 = 128;

/// Royalty rates are expressed in basis points.
pub const TREASURY_RATE_DENOMINATOR: u32 = 10_000;

/// A creator can claim at most 100% of a sale price.
pub const MAX_TREASURY_RATE: u32 = TREASURY_RATE_DENOMINATOR;

/// Content hashes are a single 32-byte word.
pub const NFT_CONTENT_HASH_LENGTH: usize = 32;

/// L1 (EVM) addresses are 20 bytes.
pub const L1_ADDRESS_LENGTH: usize = 20;

/// Collection name limit in bytes.
pub const MAX_COLLECTION_NAME_LEN: usize = 64;

/// Collection introduction limit in bytes.
pub const MAX_COLLECTION_INTRO_LEN: usize = 1_000;

/// Transfer memo limit in bytes.
pub const MAX_MEMO_LEN: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_type_codes_are_unique() {
        let codes = [
            TX_TYPE_TRANSFER,
            TX_TYPE_WITHDRAW,
            TX_TYPE_CREATE_COLLECTION,
            TX_TYPE_MINT_NFT,
            TX_TYPE_TRANSFER_NFT,
            TX_TYPE_SET_NFT_PRICE,
            TX_TYPE_BUY_NFT,
            TX_TYPE_WITHDRAW_NFT,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn amount_width_fits_the_field() {
        // BN254's scalar field is ~254 bits; amounts must stay well below.
        assert!(MAX_AMOUNT_BITS < 254);
    }
}
