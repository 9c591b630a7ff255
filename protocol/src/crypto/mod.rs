//! # Cryptographic Primitives
//!
//! Everything the verifier needs to bind a transaction to its sender:
//!
//! - **MiMC** over the BN254 scalar field for message hashes. The circuit
//!   recomputes this hash, so it has to be cheap in constraints.
//! - **Ed25519** for account signatures over those hashes.
//! - **Keccak-256** and **BLAKE3** as byte-level helpers (round-constant
//!   derivation, text-to-field).
//!
//! Everything here is a thin, type-safe wrapper around audited crates.

pub mod hash;
pub mod keys;
pub mod mimc;
pub mod signatures;

pub use hash::text_to_field;
pub use keys::{KeyError, LedgerKeypair, LedgerPublicKey, LedgerSignature};
pub use mimc::Mimc;
pub use signatures::{parse_public_key, sign_digest, verify_digest, SignatureError};
