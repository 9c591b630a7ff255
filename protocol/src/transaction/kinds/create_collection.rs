//! CreateCollection: open a new NFT collection under the sender.
//!
//! Collections are numbered per creator. The sender must claim exactly its
//! current collection counter as the new id, and the counter advances by
//! one.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_COLLECTION_INTRO_LEN, MAX_COLLECTION_NAME_LEN};
use crate::ledger::{AccountIndex, LedgerSnapshot};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::FieldWriter;
use crate::transaction::payload::{
    charge_gas, require_account, CollectionNonceChange, DetailLeg, TxEffects, TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCollectionTx {
    pub account_index: AccountIndex,
    pub collection_id: u64,
    pub name: String,
    #[serde(default)]
    pub introduction: String,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl TxPayload for CreateCollectionTx {
    fn tx_type(&self) -> TxType {
        TxType::CreateCollection
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

    fn validate(&self, snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        let account = require_account(snapshot, tx_type, self.account_index)?;
        if self.collection_id != account.collection_nonce {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!(
                    "collection id {} is not the next id {} of account {}",
                    self.collection_id, account.collection_nonce, self.account_index
                ),
            ));
        }
        if self.name.is_empty() || self.name.len() > MAX_COLLECTION_NAME_LEN {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("collection name must be 1..={MAX_COLLECTION_NAME_LEN} bytes"),
            ));
        }
        if self.introduction.len() > MAX_COLLECTION_INTRO_LEN {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("collection introduction exceeds {MAX_COLLECTION_INTRO_LEN} bytes"),
            ));
        }
        Ok(())
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let tx_type = self.tx_type();
        let before = require_account(snapshot, tx_type, self.account_index)?.collection_nonce;
        let after = before
            .checked_add(1)
            .ok_or_else(|| VerifyError::invalid_params(tx_type, "collection counter exhausted"))?;

        let mut effects = TxEffects::new();
        charge_gas(&mut effects.deltas, self.account_index, &self.gas);
        effects.collection_nonce = Some(CollectionNonceChange { before, after });
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.account_index)
            .index(self.collection_id)
            .text(&self.name)
            .text(&self.introduction)
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
            DetailLeg::CollectionNonce {
                account: self.account_index,
            },
            DetailLeg::Asset {
                account: self.gas.gas_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
        ]
    }
}
