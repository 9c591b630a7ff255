//! Withdraw: move a fungible balance from L2 to an L1 address.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::config::L1_ADDRESS_LENGTH;
use crate::ledger::amount::serde_amount;
use crate::ledger::{AccountIndex, AssetId, LedgerSnapshot};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::{decode_hex_field, FieldWriter};
use crate::transaction::payload::{charge_gas, DetailLeg, TxEffects, TxPayload};
use crate::transaction::types::{GasFee, TxType};

/// Debits `asset_amount` of `asset_id` from the sender. The L1 contract
/// credits `to_address` once the batch is proven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawTx {
    pub from_account_index: AccountIndex,
    pub asset_id: AssetId,
    #[serde(with = "serde_amount")]
    pub asset_amount: BigInt,
    /// Hex-encoded 20-byte L1 address.
    pub to_address: String,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl TxPayload for WithdrawTx {
    fn tx_type(&self) -> TxType {
        TxType::Withdraw
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

    fn required_assets(&self) -> Vec<(AccountIndex, AssetId)> {
        vec![
            (self.from_account_index, self.asset_id),
            (self.from_account_index, self.gas.gas_fee_asset_id),
            (self.gas.gas_account_index, self.gas.gas_fee_asset_id),
        ]
    }

    fn submitted_amounts(&self) -> Vec<(&'static str, &BigInt)> {
        vec![
            ("asset_amount", &self.asset_amount),
            ("gas_fee_asset_amount", &self.gas.gas_fee_asset_amount),
        ]
    }

    fn validate(&self, _snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        decode_hex_field(self.tx_type(), "to_address", &self.to_address, L1_ADDRESS_LENGTH)?;
        Ok(())
    }

    fn compute_effects(&self, _snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let mut effects = TxEffects::new();
        effects
            .deltas
            .debit(self.from_account_index, self.asset_id, &self.asset_amount);
        charge_gas(&mut effects.deltas, self.from_account_index, &self.gas);
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.from_account_index)
            .hex("to_address", &self.to_address, L1_ADDRESS_LENGTH)?
            .index(u64::from(self.asset_id))
            .amount("asset_amount", &self.asset_amount)?
            .gas(&self.gas)?
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
                account: self.gas.gas_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::test_utils::*;
    use crate::transaction::types::AssetType;
    use crate::transaction::verification::verify_tx;

    fn withdraw(amount: i64, fee: i64) -> WithdrawTx {
        WithdrawTx {
            from_account_index: ALICE,
            asset_id: ASSET_A,
            asset_amount: BigInt::from(amount),
            to_address: L1_ADDRESS.to_string(),
            gas: gas(fee),
            nonce: 0,
            sig: String::new(),
        }
    }

    #[test]
    fn emits_three_records_in_order() {
        let details = verify_tx(&base_snapshot(), &signed(withdraw(100, 5))).unwrap();
        assert_eq!(
            deltas(&details),
            vec![
                (ALICE, 0, "-100".to_string()),
                (ALICE, 1, "-5".to_string()),
                (GAS_ACCOUNT, 1, "5".to_string()),
            ]
        );
        assert!(details.iter().all(|d| d.asset_type == AssetType::Fungible));
        assert!(details.iter().all(|d| d.balance == "1000"));
    }

    #[test]
    fn gas_paid_in_withdrawn_asset_collapses_into_one_record() {
        let mut tx = withdraw(100, 5);
        tx.gas.gas_fee_asset_id = ASSET_A;
        let details = verify_tx(&base_snapshot(), &signed(tx)).unwrap();
        assert_eq!(
            deltas(&details),
            vec![(ALICE, 0, "-105".to_string()), (GAS_ACCOUNT, 0, "5".to_string())]
        );
    }

    #[test]
    fn sender_collecting_its_own_fee_gets_one_gas_record() {
        let mut tx = withdraw(100, 5);
        tx.gas.gas_account_index = ALICE;
        let details = verify_tx(&base_snapshot(), &signed(tx)).unwrap();
        assert_eq!(
            deltas(&details),
            vec![(ALICE, 0, "-100".to_string()), (ALICE, 1, "0".to_string())]
        );
        let fee_total: BigInt = details
            .iter()
            .filter(|d| d.asset_id == u64::from(ASSET_GAS))
            .map(|d| d.balance_delta.parse::<BigInt>().unwrap())
            .sum();
        assert_eq!(fee_total, BigInt::from(0));
    }

    #[test]
    fn self_collected_fee_in_withdrawn_asset_nets_to_the_principal() {
        let mut tx = withdraw(100, 5);
        tx.gas.gas_account_index = ALICE;
        tx.gas.gas_fee_asset_id = ASSET_A;
        let details = verify_tx(&base_snapshot(), &signed(tx)).unwrap();
        assert_eq!(deltas(&details), vec![(ALICE, 0, "-100".to_string())]);
    }

    #[test]
    fn combined_debit_must_be_covered() {
        let mut tx = withdraw(998, 5);
        tx.gas.gas_fee_asset_id = ASSET_A;
        match verify_tx(&base_snapshot(), &signed(tx)) {
            Err(VerifyError::InsufficientBalance { required, .. }) => {
                assert_eq!(required, BigInt::from(1_003))
            }
            other => panic!("expected InsufficientBalance, got {:?}", other),
        }
    }

    #[test]
    fn zero_amount_is_accepted() {
        let details = verify_tx(&base_snapshot(), &signed(withdraw(0, 5))).unwrap();
        assert_eq!(details[0].balance_delta, "0");
    }

    #[test]
    fn malformed_l1_address_is_rejected() {
        let mut tx = withdraw(100, 5);
        tx.to_address = "0x1234".into();
        match verify_tx(&base_snapshot(), &tx) {
            Err(VerifyError::InvalidParams { reason, .. }) => assert!(reason.contains("to_address")),
            other => panic!("expected InvalidParams, got {:?}", other),
        }
    }

    #[test]
    fn hash_changes_with_destination() {
        use crate::transaction::hash::compute_msg_hash;
        let a = withdraw(100, 5);
        let mut b = withdraw(100, 5);
        b.to_address = format!("0x{}", "22".repeat(20));
        assert_ne!(compute_msg_hash(&a).unwrap(), compute_msg_hash(&b).unwrap());
    }
}
