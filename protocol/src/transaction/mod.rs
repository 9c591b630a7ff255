//! # Transaction Module
//!
//! Verification of user-signed L2 transactions before they enter the
//! mempool. Every kind runs through the same pipeline; what differs per
//! kind lives behind the [`TxPayload`] trait.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — TxType, GasFee, MempoolTxDetail
//! error.rs        — VerifyError and its flat ErrorKind
//! payload.rs      — The TxPayload trait, effects and detail legs
//! hash.rs         — Canonical field tuples and the MiMC message hash
//! detail.rs       — Effects to ordered MempoolTxDetail records
//! verification.rs — The pipeline: existence, amounts, nonce, rules,
//!                   balances, signature, details
//! signing.rs      — Wallet-side signing of any payload
//! kinds/          — One module per transaction kind, plus the TxInfo union
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — A wallet fills in one of the kind structs.
//! 2. **Sign** — [`sign_tx`] hashes the canonical fields and signs.
//! 3. **Submit** — The payload arrives as a [`TxInfo`].
//! 4. **Verify** — The mempool runs [`verify_transaction`] against a
//!    snapshot taken at the sender's current nonce.
//! 5. **Persist** — The returned [`MempoolTxDetail`] records are stored
//!    alongside the pending transaction for settlement.
//!
//! ## Design Decisions
//!
//! - Amounts are arbitrary-precision end to end and bounded to 128 bits at
//!   the hash boundary, so no value can wrap modulo the field.
//! - Balance sufficiency is checked once, uniformly, on net deltas. Kinds
//!   only describe effects.
//! - The snapshot is borrowed immutably. Verification never writes state.

pub mod detail;
pub mod error;
pub mod hash;
pub mod kinds;
pub mod payload;
pub mod signing;
pub mod types;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_utils;

pub use detail::emit_details;
pub use error::{ErrorKind, VerifyError};
pub use hash::{compute_msg_hash, FieldWriter, MsgHash};
pub use kinds::{
    BuyNftTx, CreateCollectionTx, MintNftTx, SetNftPriceTx, TransferNftTx, TransferTx, TxInfo,
    WithdrawNftTx, WithdrawTx,
};
pub use payload::{CollectionNonceChange, DetailLeg, NftTransition, TxEffects, TxPayload};
pub use signing::sign_tx;
pub use types::{AssetType, GasFee, MempoolTxDetail, TxType};
pub use verification::{verify_transaction, verify_tx};
