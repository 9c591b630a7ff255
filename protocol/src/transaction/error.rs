//! Verification errors.
//!
//! Every rejection is terminal for the call. Each variant names the
//! transaction type plus the field, account, asset or NFT at fault, which
//! is what the boundary needs for its audit log line.

use num_bigint::BigInt;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::types::TxType;
use crate::crypto::KeyError;
use crate::ledger::{AccountIndex, AssetId, NftIndex};

/// Why a transaction was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// A referenced entity is missing or a field is malformed.
    #[error("[{tx_type}] invalid params: {reason}")]
    InvalidParams { tx_type: TxType, reason: String },

    /// The payload nonce is not the sender's current nonce.
    #[error("[{tx_type}] invalid nonce for account {account_index}: expected {expected}, got {got}")]
    InvalidNonce {
        tx_type: TxType,
        account_index: AccountIndex,
        expected: u64,
        got: u64,
    },

    /// A debit exceeds the snapshot balance.
    #[error(
        "[{tx_type}] insufficient balance of asset {asset_id} for account {account_index}: \
         required {required}, available {available}"
    )]
    InsufficientBalance {
        tx_type: TxType,
        account_index: AccountIndex,
        asset_id: AssetId,
        required: BigInt,
        available: BigInt,
    },

    /// The NFT's recorded owner, creator or index differs from the claim.
    #[error("[{tx_type}] ownership mismatch on nft {nft_index}: {reason}")]
    OwnershipMismatch {
        tx_type: TxType,
        nft_index: NftIndex,
        reason: String,
    },

    /// The NFT's recorded content hash differs from the claim.
    #[error("[{tx_type}] content hash mismatch on nft {nft_index}")]
    ContentHashMismatch { tx_type: TxType, nft_index: NftIndex },

    /// The sender's stored public key cannot be parsed.
    #[error("[{tx_type}] invalid public key for account {account_index}: {source}")]
    InvalidPublicKey {
        tx_type: TxType,
        account_index: AccountIndex,
        source: KeyError,
    },

    /// A well-formed signature that does not verify.
    #[error("[{tx_type}] signature verification failed for account {account_index}")]
    SignatureVerificationFailed {
        tx_type: TxType,
        account_index: AccountIndex,
    },

    /// The signature check could not run.
    #[error("[{tx_type}] internal crypto failure: {reason}")]
    InternalCryptoFailure { tx_type: TxType, reason: String },
}

/// Flat discriminant of [`VerifyError`], for metrics labels and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidParams,
    InvalidNonce,
    InsufficientBalance,
    OwnershipMismatch,
    ContentHashMismatch,
    InvalidPublicKey,
    SignatureVerificationFailed,
    InternalCryptoFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl VerifyError {
    pub(crate) fn invalid_params(tx_type: TxType, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            tx_type,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParams { .. } => ErrorKind::InvalidParams,
            Self::InvalidNonce { .. } => ErrorKind::InvalidNonce,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::OwnershipMismatch { .. } => ErrorKind::OwnershipMismatch,
            Self::ContentHashMismatch { .. } => ErrorKind::ContentHashMismatch,
            Self::InvalidPublicKey { .. } => ErrorKind::InvalidPublicKey,
            Self::SignatureVerificationFailed { .. } => ErrorKind::SignatureVerificationFailed,
            Self::InternalCryptoFailure { .. } => ErrorKind::InternalCryptoFailure,
        }
    }

    pub fn tx_type(&self) -> TxType {
        match self {
            Self::InvalidParams { tx_type, .. }
            | Self::InvalidNonce { tx_type, .. }
            | Self::InsufficientBalance { tx_type, .. }
            | Self::OwnershipMismatch { tx_type, .. }
            | Self::ContentHashMismatch { tx_type, .. }
            | Self::InvalidPublicKey { tx_type, .. }
            | Self::SignatureVerificationFailed { tx_type, .. }
            | Self::InternalCryptoFailure { tx_type, .. } => *tx_type,
        }
    }

    /// Whether re-verifying against a fresher snapshot could succeed.
    ///
    /// Nonce, balance and ownership all move as other transactions settle.
    /// Everything else is a property of the payload itself and will fail
    /// the same way forever.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidNonce | ErrorKind::InsufficientBalance | ErrorKind::OwnershipMismatch
        )
    }
}
