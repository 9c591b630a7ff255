//! Transfer: move a fungible balance between two L2 accounts.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::config::MAX_MEMO_LEN;
use crate::ledger::amount::serde_amount;
use crate::ledger::{AccountIndex, AssetId, LedgerSnapshot};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::FieldWriter;
use crate::transaction::payload::{
    charge_gas, check_account_name, DetailLeg, TxEffects, TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTx {
    pub from_account_index: AccountIndex,
    pub to_account_index: AccountIndex,
    /// Must equal the recipient's stored name. Guards against a wallet
    /// resolving a name to the wrong index.
    pub to_account_name: String,
    pub asset_id: AssetId,
    #[serde(with = "serde_amount")]
    pub asset_amount: BigInt,
    pub gas: GasFee,
    #[serde(default)]
    pub memo: String,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl TxPayload for TransferTx {
    fn tx_type(&self) -> TxType {
        TxType::Transfer
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

    fn required_assets(&self) -> Vec<(AccountIndex, AssetId)> {
        vec![
            (self.from_account_index, self.asset_id),
            (self.from_account_index, self.gas.gas_fee_asset_id),
            (self.to_account_index, self.asset_id),
            (self.gas.gas_account_index, self.gas.gas_fee_asset_id),
        ]
    }

    fn submitted_amounts(&self) -> Vec<(&'static str, &BigInt)> {
        vec![
            ("asset_amount", &self.asset_amount),
            ("gas_fee_asset_amount", &self.gas.gas_fee_asset_amount),
        ]
    }

    fn validate(&self, snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        if self.from_account_index == self.to_account_index {
            return Err(VerifyError::invalid_params(
                tx_type,
                "sender and recipient must differ",
            ));
        }
        if self.memo.len() > MAX_MEMO_LEN {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("memo exceeds {MAX_MEMO_LEN} bytes"),
            ));
        }
        check_account_name(snapshot, tx_type, self.to_account_index, &self.to_account_name)
    }

    fn compute_effects(&self, _snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let mut effects = TxEffects::new();
        effects
            .deltas
            .debit(self.from_account_index, self.asset_id, &self.asset_amount);
        effects
            .deltas
            .credit(self.to_account_index, self.asset_id, &self.asset_amount);
        charge_gas(&mut effects.deltas, self.from_account_index, &self.gas);
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.from_account_index)
            .index(self.to_account_index)
            .text(&self.to_account_name)
            .index(u64::from(self.asset_id))
            .amount("asset_amount", &self.asset_amount)?
            .gas(&self.gas)?
            .text(&self.memo)
            .index(self.nonce);
        Ok(())
    }

    fn detail_legs(&self) -> Vec<DetailLeg> {
        vec![
            DetailLeg::Asset {
                account: self.from_account_index,
                asset: self.asset_id,
            },
            DetailLeg::Asset {
                account: self.from_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
            DetailLeg::Asset {
                account: self.to_account_index,
                asset: self.asset_id,
            },
            DetailLeg::Asset {
                account: self.gas.gas_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
        ]
    }
}
