//! WithdrawNft: burn an NFT on L2 so it can be minted on L1.

use serde::{Deserialize, Serialize};

use crate::config::{L1_ADDRESS_LENGTH, NFT_CONTENT_HASH_LENGTH};
use crate::ledger::{AccountIndex, LedgerSnapshot, Nft, NftIndex};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::{decode_hex_field, FieldWriter};
use crate::transaction::payload::{
    charge_gas, check_content_hash, check_nft_owner, require_nft, DetailLeg, NftTransition,
    TxEffects, TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawNftTx {
    pub account_index: AccountIndex,
    pub nft_index: NftIndex,
    pub nft_content_hash: String,
    /// Hex-encoded 20-byte L1 recipient.
    pub to_address: String,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl TxPayload for WithdrawNftTx {
    fn tx_type(&self) -> TxType {
        TxType::WithdrawNft
    }

    fn sender(&self) -> AccountIndex {
        self.account_index
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn signature(&self) -> &str {
        &self.sig
    }

    fn set_signature(&mut self, signature: String) {
        self.sig = signature;
    }

    fn gas(&self) -> &GasFee {
        &self.gas
    }

    fn required_nfts(&self) -> Vec<NftIndex> {
        vec![self.nft_index]
    }

    fn validate(&self, snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        let nft = require_nft(snapshot, tx_type, self.nft_index)?;
        check_nft_owner(tx_type, nft, self.nft_index, self.account_index)?;
        check_content_hash(tx_type, nft, &self.nft_content_hash)?;
        decode_hex_field(tx_type, "to_address", &self.to_address, L1_ADDRESS_LENGTH)?;
        Ok(())
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let before = require_nft(snapshot, self.tx_type(), self.nft_index)?.clone();

        let mut effects = TxEffects::new();
        charge_gas(&mut effects.deltas, self.account_index, &self.gas);
        effects.nft = Some(NftTransition {
            before,
            after: Nft::empty(self.nft_index),
        });
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.account_index)
            .index(self.nft_index)
            .hex(
                "nft_content_hash",
                &self.nft_content_hash,
                NFT_CONTENT_HASH_LENGTH,
            )?
            .hex("to_address", &self.to_address, L1_ADDRESS_LENGTH)?
            .gas(&self.gas)?
            .index(self.nonce);
        Ok(())
    }

    fn detail_legs(&self) -> Vec<DetailLeg> {
        vec![
            DetailLeg::Asset {
                account: self.account_index,
                asset: self.gas.gas_fee_asset_id,
            },
            DetailLeg::Nft {
                account: self.account_index,
            },
            DetailLeg::Asset {
                account: self.gas.gas_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
        ]
    }
}
