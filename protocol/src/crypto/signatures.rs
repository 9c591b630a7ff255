//! # Signature Verification
//!
//! Checks an account's Ed25519 signature over a transaction's 32-byte
//! message hash.
//!
//! Verification has three outcomes, and callers need to tell them apart:
//!
//! 1. the stored public key cannot be parsed: [`SignatureError::InvalidPublicKey`];
//! 2. the signature encoding never reaches the curve arithmetic (bad hex,
//!    wrong length): [`SignatureError::Internal`];
//! 3. the curve arithmetic runs and says no: `Ok(false)`.
//!
//! All three reject the transaction. Only the first two indicate that the
//! input was malformed rather than forged.
//!
//! ## Strictness
//!
//! We use `ed25519-dalek`'s strict verification: non-canonical `s` scalars
//! and small-order keys are rejected. The circuit enforces the same rules.

use thiserror::Error;

use super::keys::{KeyError, LedgerKeypair, LedgerPublicKey, LedgerSignature};
use crate::config::MSG_HASH_LENGTH;

/// Errors that prevent a signature check from producing a yes/no answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(KeyError),

    #[error("signature could not be checked: {0}")]
    Internal(KeyError),
}

/// Parse an account's stored public key.
pub fn parse_public_key(public_key_hex: &str) -> Result<LedgerPublicKey, SignatureError> {
    LedgerPublicKey::from_hex(public_key_hex).map_err(SignatureError::InvalidPublicKey)
}

/// Verify a hex-encoded signature over a message hash.
///
/// Returns `Ok(true)` for a valid signature, `Ok(false)` for a well-formed
/// signature that does not verify, and `Err` when the check could not run.
pub fn verify_digest(
    public_key: &LedgerPublicKey,
    signature_hex: &str,
    digest: &[u8; MSG_HASH_LENGTH],
) -> Result<bool, SignatureError> {
    let signature = LedgerSignature::from_hex(signature_hex).map_err(SignatureError::Internal)?;
    let verifying_key = public_key
        .to_verifying_key()
        .map_err(SignatureError::InvalidPublicKey)?;
    Ok(verifying_key
        .verify_strict(digest, &signature.to_dalek())
        .is_ok())
}

/// Sign a message hash. Wallet-side counterpart of [`verify_digest`].
pub fn sign_digest(keypair: &LedgerKeypair, digest: &[u8; MSG_HASH_LENGTH]) -> LedgerSignature {
    keypair.sign(digest)
}
