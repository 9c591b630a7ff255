//! Core type definitions shared by every transaction kind.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config;
use crate::ledger::amount::serde_amount;
use crate::ledger::{AccountIndex, AssetId};

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents.
///
/// The type decides which validation rules apply, which legs the
/// transaction touches, and the first element of its message hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    Transfer,
    Withdraw,
    CreateCollection,
    MintNft,
    TransferNft,
    SetNftPrice,
    BuyNft,
    WithdrawNft,
}

impl TxType {
    /// The code absorbed at the start of the message hash.
    pub fn code(self) -> u8 {
        match self {
            Self::Transfer => config::TX_TYPE_TRANSFER,
            Self::Withdraw => config::TX_TYPE_WITHDRAW,
            Self::CreateCollection => config::TX_TYPE_CREATE_COLLECTION,
            Self::MintNft => config::TX_TYPE_MINT_NFT,
            Self::TransferNft => config::TX_TYPE_TRANSFER_NFT,
            Self::SetNftPrice => config::TX_TYPE_SET_NFT_PRICE,
            Self::BuyNft => config::TX_TYPE_BUY_NFT,
            Self::WithdrawNft => config::TX_TYPE_WITHDRAW_NFT,
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "Transfer",
            Self::Withdraw => "Withdraw",
            Self::CreateCollection => "CreateCollection",
            Self::MintNft => "MintNft",
            Self::TransferNft => "TransferNft",
            Self::SetNftPrice => "SetNftPrice",
            Self::BuyNft => "BuyNft",
            Self::WithdrawNft => "WithdrawNft",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// GasFee
// ---------------------------------------------------------------------------

/// Fee block carried by every L2 transaction. The sender pays
/// `gas_fee_asset_amount` of `gas_fee_asset_id` to `gas_account_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasFee {
    pub gas_account_index: AccountIndex,
    pub gas_fee_asset_id: AssetId,
    #[serde(with = "serde_amount")]
    pub gas_fee_asset_amount: BigInt,
}

// ---------------------------------------------------------------------------
// MempoolTxDetail
// ---------------------------------------------------------------------------

/// What a detail record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// A fungible balance; `balance_delta` is a signed decimal.
    Fungible,
    /// An NFT slot; `balance` and `balance_delta` are JSON NFT states.
    NonFungible,
    /// An account's collection counter; both fields are decimal counters.
    CollectionNonce,
}

/// One leg of a verified transaction, as stored alongside the pending
/// transaction and later applied by settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolTxDetail {
    /// Asset id for fungible legs, NFT index for NFT legs, 0 for the
    /// collection counter.
    pub asset_id: u64,
    pub asset_type: AssetType,
    pub account_index: AccountIndex,
    pub account_name: String,
    /// State before the transaction.
    pub balance: String,
    /// Signed delta (fungible) or state after (NFT, collection counter).
    pub balance_delta: String,
}
