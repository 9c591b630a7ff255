//! SetNftPrice: the owner lists an NFT for sale, or delists it with a
//! price of zero.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::config::NFT_CONTENT_HASH_LENGTH;
use crate::ledger::amount::serde_amount;
use crate::ledger::{AccountIndex, AssetId, LedgerSnapshot, NftIndex};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::FieldWriter;
use crate::transaction::payload::{
    charge_gas, check_content_hash, check_nft_owner, require_nft, DetailLeg, NftTransition,
    TxEffects, TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

/// Only the listing asset and amount change; every other NFT field is
/// carried over from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetNftPriceTx {
    pub account_index: AccountIndex,
    pub nft_index: NftIndex,
    /// Must equal the stored content hash.
    pub nft_content_hash: String,
    pub asset_id: AssetId,
    #[serde(with = "serde_amount")]
    pub asset_amount: BigInt,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl TxPayload for SetNftPriceTx {
    fn tx_type(&self) -> TxType {
        TxType::SetNftPrice
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

    fn submitted_amounts(&self) -> Vec<(&'static str, &BigInt)> {
        vec![
            ("asset_amount", &self.asset_amount),
            ("gas_fee_asset_amount", &self.gas.gas_fee_asset_amount),
        ]
    }

    fn validate(&self, snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        let nft = require_nft(snapshot, tx_type, self.nft_index)?;
        check_nft_owner(tx_type, nft, self.nft_index, self.account_index)?;
        check_content_hash(tx_type, nft, &self.nft_content_hash)
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let before = require_nft(snapshot, self.tx_type(), self.nft_index)?.clone();
        let mut after = before.clone();
        after.asset_id = self.asset_id;
        after.asset_amount = self.asset_amount.to_string();

        let mut effects = TxEffects::new();
        charge_gas(&mut effects.deltas, self.account_index, &self.gas);
        effects.nft = Some(NftTransition { before, after });
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
            .index(u64::from(self.asset_id))
            .amount("asset_amount", &self.asset_amount)?
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
