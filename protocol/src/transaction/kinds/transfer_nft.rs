//! TransferNft: hand an NFT to another L2 account.

use serde::{Deserialize, Serialize};

use crate::ledger::{AccountIndex, LedgerSnapshot, NftIndex};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::FieldWriter;
use crate::transaction::payload::{
    charge_gas, check_account_name, check_nft_owner, require_nft, DetailLeg, NftTransition,
    TxEffects, TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

/// Moves ownership to `to_account_index`. Any listing the previous owner
/// set is cleared; the new owner prices the NFT afresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferNftTx {
    pub from_account_index: AccountIndex,
    pub to_account_index: AccountIndex,
    pub to_account_name: String,
    pub nft_index: NftIndex,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl TxPayload for TransferNftTx {
    fn tx_type(&self) -> TxType {
        TxType::TransferNft
    }

    fn sender(&self) -> AccountIndex {
        self.from_account_index
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

    fn required_accounts(&self) -> Vec<AccountIndex> {
        vec![
            self.from_account_index,
            self.to_account_index,
            self.gas.gas_account_index,
        ]
    }

    fn required_nfts(&self) -> Vec<NftIndex> {
        vec![self.nft_index]
    }

    fn validate(&self, snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        let nft = require_nft(snapshot, tx_type, self.nft_index)?;
        check_nft_owner(tx_type, nft, self.nft_index, self.from_account_index)?;
        if self.from_account_index == self.to_account_index {
            return Err(VerifyError::invalid_params(
                tx_type,
                "sender and recipient must differ",
            ));
        }
        check_account_name(snapshot, tx_type, self.to_account_index, &self.to_account_name)
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let before = require_nft(snapshot, self.tx_type(), self.nft_index)?.clone();
        let mut after = before.clone();
        after.owner_account_index = self.to_account_index;
        after.asset_id = 0;
        after.asset_amount = "0".to_string();

        let mut effects = TxEffects::new();
        charge_gas(&mut effects.deltas, self.from_account_index, &self.gas);
        effects.nft = Some(NftTransition { before, after });
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.from_account_index)
            .index(self.to_account_index)
            .text(&self.to_account_name)
            .index(self.nft_index)
            .gas(&self.gas)?
            .index(self.nonce);
        Ok(())
    }

    fn detail_legs(&self) -> Vec<DetailLeg> {
        vec![
            DetailLeg::Asset {
                account: self.from_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
            DetailLeg::Nft {
                account: self.to_account_index,
            },
            DetailLeg::Asset {
                account: self.gas.gas_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
        ]
    }
}
