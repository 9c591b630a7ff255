//! Transaction signing with Ed25519 keypairs.
//!
//! The wallet-side counterpart of the verifier: compute the message hash
//! exactly as verification will, sign it, and store the hex signature in
//! the payload. The signature field is not part of the hash, so re-signing
//! a payload simply overwrites the previous signature.

use super::error::VerifyError;
use super::hash::compute_msg_hash;
use super::payload::TxPayload;
use crate::crypto::{sign_digest, LedgerKeypair};

/// Signs a payload in place using the provided keypair.
///
/// The caller is responsible for passing the keypair whose public key is
/// stored for the payload's sender.
///
/// # Errors
///
/// Fails with [`VerifyError::InvalidParams`] if a field cannot be encoded
/// for hashing (malformed hex, negative or oversized amount).
///
/// # Example
///
/// ```rust,no_run
/// use num_bigint::BigInt;
/// use rollup_txverify::crypto::LedgerKeypair;
/// use rollup_txverify::transaction::{sign_tx, GasFee, WithdrawTx};
///
/// let keypair = LedgerKeypair::generate();
/// let mut tx = WithdrawTx {
///     from_account_index: 2,
///     asset_id: 0,
///     asset_amount: BigInt::from(100),
///     to_address: "11".repeat(20),
///     gas: GasFee {
///         gas_account_index: 1,
///         gas_fee_asset_id: 1,
///         gas_fee_asset_amount: BigInt::from(5),
///     },
///     nonce: 0,
///     sig: String::new(),
/// };
///
/// sign_tx(&mut tx, &keypair).unwrap();
/// assert_eq!(tx.sig.len(), 128);
/// ```
pub fn sign_tx<'a, P: TxPayload + ?Sized>(
    payload: &'a mut P,
    keypair: &LedgerKeypair,
) -> Result<&'a P, VerifyError> {
    let msg_hash = compute_msg_hash(payload)?;
    let signature = sign_digest(keypair, msg_hash.as_bytes());
    payload.set_signature(signature.to_hex());
    Ok(payload)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
