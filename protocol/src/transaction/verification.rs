//! Transaction verification: the pipeline every kind runs through.
//!
//! A transaction entering the mempool must pass [`verify_tx`]. The checks
//! are ordered from cheapest to most expensive, so malformed or stale
//! transactions are rejected before any curve arithmetic runs. On success
//! the caller gets the ordered detail records to persist alongside the
//! pending transaction; on failure, the first failing check.
//!
//! Verification is a pure function of `(snapshot, payload)`. Nothing is
//! cached and nothing is shared, so concurrent calls on distinct payloads
//! need no coordination.

use super::detail::emit_details;
use super::error::VerifyError;
use super::hash::{check_amount, compute_msg_hash, MsgHash};
use super::kinds::TxInfo;
use super::payload::TxPayload;
use super::types::{MempoolTxDetail, TxType};
use crate::crypto::{parse_public_key, verify_digest, SignatureError};
use crate::ledger::amount::is_negative;
use crate::ledger::{Account, DeltaLedger, LedgerSnapshot};

/// Verifies a signed transaction against a ledger snapshot.
///
/// The checks, in order:
///
/// 1. **Existence** — every required account, balance and NFT is present.
/// 2. **Amounts** — every submitted amount is non-negative and at most
///    [`MAX_AMOUNT_BITS`](crate::config::MAX_AMOUNT_BITS) wide.
/// 3. **Nonce** — equals the sender's current nonce.
/// 4. **Kind rules** — ownership, content hash, names, listing terms.
/// 5. **Balances** — every net debit is covered by the snapshot balance.
/// 6. **Signature** — Ed25519 over the message hash, under the sender's
///    stored key.
/// 7. **Details** — one record per leg, in the kind's order.
///
/// # Errors
///
/// Returns the first failing check as a [`VerifyError`].
pub fn verify_tx<P: TxPayload + ?Sized>(
    snapshot: &LedgerSnapshot,
    payload: &P,
) -> Result<Vec<MempoolTxDetail>, VerifyError> {
    let tx_type = payload.tx_type();

    // 1. Everything the payload references must exist.
    check_existence(snapshot, payload)?;

    // 2. Amounts before nonce: a negative amount is a malformed payload,
    //    whatever the sender's state.
    for (field, amount) in payload.submitted_amounts() {
        check_amount(tx_type, field, amount)?;
    }

    // 3. Nonce.
    let sender = snapshot.account(payload.sender()).ok_or_else(|| {
        VerifyError::invalid_params(tx_type, format!("unknown account {}", payload.sender()))
    })?;
    if payload.nonce() != sender.nonce {
        return Err(VerifyError::InvalidNonce {
            tx_type,
            account_index: sender.account_index,
            expected: sender.nonce,
            got: payload.nonce(),
        });
    }

    // 4. Kind-specific rules.
    payload.validate(snapshot)?;

    // 5. Effects and balance sufficiency.
    let effects = payload.compute_effects(snapshot)?;
    check_balances(tx_type, snapshot, &effects.deltas)?;

    // 6. Signature over the message hash.
    let msg_hash = compute_msg_hash(payload)?;
    check_signature(tx_type, sender, payload.signature(), &msg_hash)?;

    // 7. Detail records.
    emit_details(tx_type, snapshot, &effects, &payload.detail_legs())
}

/// Verifies any supported transaction. See [`verify_tx`].
pub fn verify_transaction(
    snapshot: &LedgerSnapshot,
    tx: &TxInfo,
) -> Result<Vec<MempoolTxDetail>, VerifyError> {
    verify_tx(snapshot, tx.as_payload())
}

fn check_existence<P: TxPayload + ?Sized>(
    snapshot: &LedgerSnapshot,
    payload: &P,
) -> Result<(), VerifyError> {
    let tx_type = payload.tx_type();
    for account in payload.required_accounts() {
        if snapshot.account(account).is_none() {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("unknown account {account}"),
            ));
        }
    }
    for (account, asset) in payload.required_assets() {
        if snapshot.asset(account, asset).is_none() {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("no balance of asset {asset} for account {account}"),
            ));
        }
    }
    for nft in payload.required_nfts() {
        if snapshot.nft(nft).is_none() {
            return Err(VerifyError::invalid_params(tx_type, format!("unknown nft {nft}")));
        }
    }
    Ok(())
}

/// Every pair with a negative net delta must hold at least that much.
fn check_balances(
    tx_type: TxType,
    snapshot: &LedgerSnapshot,
    deltas: &DeltaLedger,
) -> Result<(), VerifyError> {
    for (account, asset, delta) in deltas.iter() {
        if !is_negative(delta) {
            continue;
        }
        let record = snapshot.asset(account, asset).ok_or_else(|| {
            VerifyError::invalid_params(
                tx_type,
                format!("no balance of asset {asset} for account {account}"),
            )
        })?;
        let available = record.balance_value().ok_or_else(|| {
            VerifyError::invalid_params(
                tx_type,
                format!(
                    "unparseable balance {:?} of asset {asset} for account {account}",
                    record.balance
                ),
            )
        })?;
        let required = -delta;
        if available < required {
            return Err(VerifyError::InsufficientBalance {
                tx_type,
                account_index: account,
                asset_id: asset,
                required,
                available,
            });
        }
    }
    Ok(())
}

fn check_signature(
    tx_type: TxType,
    sender: &Account,
    signature_hex: &str,
    msg_hash: &MsgHash,
) -> Result<(), VerifyError> {
    let account_index = sender.account_index;
    let public_key = parse_public_key(&sender.public_key).map_err(|e| match e {
        SignatureError::InvalidPublicKey(source) | SignatureError::Internal(source) => {
            VerifyError::InvalidPublicKey {
                tx_type,
                account_index,
                source,
            }
        }
    })?;

    match verify_digest(&public_key, signature_hex, msg_hash.as_bytes()) {
        Ok(true) => Ok(()),
        Ok(false) => Err(VerifyError::SignatureVerificationFailed {
            tx_type,
            account_index,
        }),
        Err(SignatureError::InvalidPublicKey(source)) => Err(VerifyError::InvalidPublicKey {
            tx_type,
            account_index,
            source,
        }),
        Err(SignatureError::Internal(source)) => Err(VerifyError::InternalCryptoFailure {
            tx_type,
            reason: source.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
