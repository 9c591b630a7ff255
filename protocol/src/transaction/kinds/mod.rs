//! The L2 transaction kinds the verifier accepts, and [`TxInfo`], the
//! tagged union the mempool receives them as.

pub mod buy_nft;
pub mod create_collection;
pub mod mint_nft;
pub mod set_nft_price;
pub mod transfer;
pub mod transfer_nft;
pub mod withdraw;
pub mod withdraw_nft;

pub use buy_nft::BuyNftTx;
pub use create_collection::CreateCollectionTx;
pub use mint_nft::MintNftTx;
pub use set_nft_price::SetNftPriceTx;
pub use transfer::TransferTx;
pub use transfer_nft::TransferNftTx;
pub use withdraw::WithdrawTx;
pub use withdraw_nft::WithdrawNftTx;

use serde::{Deserialize, Serialize};

use super::payload::TxPayload;
use super::types::TxType;

/// Any supported transaction, tagged by `"type"` on the wire:
///
/// ```json
/// { "type": "Withdraw", "from_account_index": 2, "asset_id": 0, ... }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TxInfo {
    Transfer(TransferTx),
    Withdraw(WithdrawTx),
    CreateCollection(CreateCollectionTx),
    MintNft(MintNftTx),
    TransferNft(TransferNftTx),
    SetNftPrice(SetNftPriceTx),
    BuyNft(BuyNftTx),
    WithdrawNft(WithdrawNftTx),
}

impl TxInfo {
    pub fn as_payload(&self) -> &dyn TxPayload {
        match self {
            Self::Transfer(tx) => tx,
            Self::Withdraw(tx) => tx,
            Self::CreateCollection(tx) => tx,
            Self::MintNft(tx) => tx,
            Self::TransferNft(tx) => tx,
            Self::SetNftPrice(tx) => tx,
            Self::BuyNft(tx) => tx,
            Self::WithdrawNft(tx) => tx,
        }
    }

    pub fn as_payload_mut(&mut self) -> &mut dyn TxPayload {
        match self {
            Self::Transfer(tx) => tx,
            Self::Withdraw(tx) => tx,
            Self::CreateCollection(tx) => tx,
            Self::MintNft(tx) => tx,
            Self::TransferNft(tx) => tx,
            Self::SetNftPrice(tx) => tx,
            Self::BuyNft(tx) => tx,
            Self::WithdrawNft(tx) => tx,
        }
    }

    pub fn tx_type(&self) -> TxType {
        self.as_payload().tx_type()
    }
}
