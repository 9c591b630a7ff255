//! MintNft: create an NFT in one of the creator's collections and hand it
//! to a recipient.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_TREASURY_RATE, NFT_CONTENT_HASH_LENGTH};
use crate::ledger::{AccountIndex, LedgerSnapshot, Nft, NftIndex};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::{decode_hex_field, normalize_hex, FieldWriter};
use crate::transaction::payload::{
    charge_gas, check_account_name, require_account, DetailLeg, NftTransition, TxEffects,
    TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintNftTx {
    pub creator_account_index: AccountIndex,
    pub to_account_index: AccountIndex,
    pub to_account_name: String,
    /// Slot the sequencer assigned; must be free.
    pub nft_index: NftIndex,
    pub nft_content_hash: String,
    pub nft_collection_id: u64,
    /// Royalty in basis points.
    pub creator_treasury_rate: u32,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

impl MintNftTx {
    fn minted(&self) -> Nft {
        Nft {
            nft_index: self.nft_index,
            creator_account_index: self.creator_account_index,
            owner_account_index: self.to_account_index,
            nft_content_hash: normalize_hex(&self.nft_content_hash),
            nft_l1_address: "0".to_string(),
            nft_l1_token_id: "0".to_string(),
            creator_treasury_rate: self.creator_treasury_rate,
            collection_id: self.nft_collection_id,
            asset_id: 0,
            asset_amount: "0".to_string(),
        }
    }
}

impl TxPayload for MintNftTx {
    fn tx_type(&self) -> TxType {
        TxType::MintNft
    }

    fn sender(&self) -> AccountIndex {
        self.creator_account_index
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
            self.creator_account_index,
            self.to_account_index,
            self.gas.gas_account_index,
        ]
    }

    fn validate(&self, snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        if snapshot.nft(self.nft_index).is_some_and(|nft| !nft.is_empty()) {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("nft slot {} is already occupied", self.nft_index),
            ));
        }
        decode_hex_field(
            tx_type,
            "nft_content_hash",
            &self.nft_content_hash,
            NFT_CONTENT_HASH_LENGTH,
        )?;
        if self.creator_treasury_rate > MAX_TREASURY_RATE {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!(
                    "treasury rate {} exceeds {MAX_TREASURY_RATE}",
                    self.creator_treasury_rate
                ),
            ));
        }
        let creator = require_account(snapshot, tx_type, self.creator_account_index)?;
        if self.nft_collection_id >= creator.collection_nonce {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!(
                    "collection {} does not exist for account {}",
                    self.nft_collection_id, self.creator_account_index
                ),
            ));
        }
        check_account_name(snapshot, tx_type, self.to_account_index, &self.to_account_name)
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let before = snapshot
            .nft(self.nft_index)
            .cloned()
            .unwrap_or_else(|| Nft::empty(self.nft_index));

        let mut effects = TxEffects::new();
        charge_gas(&mut effects.deltas, self.creator_account_index, &self.gas);
        effects.nft = Some(NftTransition {
            before,
            after: self.minted(),
        });
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.creator_account_index)
            .index(self.to_account_index)
            .text(&self.to_account_name)
            .index(self.nft_index)
            .hex(
                "nft_content_hash",
                &self.nft_content_hash,
                NFT_CONTENT_HASH_LENGTH,
            )?
            .index(self.nft_collection_id)
            .index(u64::from(self.creator_treasury_rate))
            .gas(&self.gas)?
            .index(self.nonce);
        Ok(())
    }

    fn detail_legs(&self) -> Vec<DetailLeg> {
        vec![
            DetailLeg::Asset {
                account: self.creator_account_index,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::test_utils::*;
    use crate::transaction::types::AssetType;
    use crate::transaction::verification::verify_tx;

    fn mint() -> MintNftTx {
        MintNftTx {
            creator_account_index: ALICE,
            to_account_index: BOB,
            to_account_name: name_of(BOB),
            nft_index: 11,
            nft_content_hash: CONTENT_HASH.to_string(),
            nft_collection_id: 0,
            creator_treasury_rate: 250,
            gas: gas(5),
            nonce: 0,
            sig: String::new(),
        }
    }

    fn snapshot() -> LedgerSnapshot {
        let mut snapshot = base_snapshot();
        if let Some(account) = snapshot.accounts.get_mut(&ALICE) {
            account.collection_nonce = 1;
        }
        snapshot
    }

    #[test]
    fn mints_into_an_empty_slot() {
        let details = verify_tx(&snapshot(), &signed(mint())).unwrap();
        assert_eq!(details.len(), 3);

        let nft_record = &details[1];
        assert_eq!(nft_record.asset_type, AssetType::NonFungible);
        assert_eq!(nft_record.account_index, BOB);
        let before: Nft = serde_json::from_str(&nft_record.balance).unwrap();
        let after: Nft = serde_json::from_str(&nft_record.balance_delta).unwrap();
        assert!(before.is_empty());
        assert_eq!(after.owner_account_index, BOB);
        assert_eq!(after.creator_account_index, ALICE);
        assert_eq!(after.creator_treasury_rate, 250);
    }

    #[test]
    fn explicit_empty_slot_is_accepted() {
        let snapshot = snapshot().with_nft(Nft::empty(11));
        assert!(verify_tx(&snapshot, &signed(mint())).is_ok());
    }

    #[test]
    fn occupied_slot_is_rejected() {
        let snapshot = snapshot().with_nft(nft(11, CAROL, CAROL));
        assert!(matches!(
            verify_tx(&snapshot, &signed(mint())),
            Err(VerifyError::InvalidParams { .. })
        ));
    }

    #[test]
    fn unknown_collection_is_rejected() {
        let mut tx = mint();
        tx.nft_collection_id = 1;
        match verify_tx(&snapshot(), &signed(tx)) {
            Err(VerifyError::InvalidParams { reason, .. }) => {
                assert!(reason.contains("collection 1"))
            }
            other => panic!("expected InvalidParams, got {:?}", other),
        }
    }

    #[test]
    fn treasury_rate_is_capped() {
        let mut tx = mint();
        tx.creator_treasury_rate = MAX_TREASURY_RATE + 1;
        assert!(matches!(
            verify_tx(&snapshot(), &signed(tx)),
            Err(VerifyError::InvalidParams { .. })
        ));
    }

    #[test]
    fn content_hash_cannot_be_swapped_for_an_alias() {
        let mut tx = mint();
        tx.nft_content_hash = format!("{}01", "00".repeat(31));
        let mut forged = signed(tx);
        // h + r reduces to the same scalar as h.
        forged.nft_content_hash =
            "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000002".to_string();
        match verify_tx(&snapshot(), &forged) {
            Err(VerifyError::InvalidParams { reason, .. }) => {
                assert!(reason.contains("nft_content_hash"))
            }
            other => panic!("expected InvalidParams, got {:?}", other),
        }
    }

    #[test]
    fn minted_content_hash_is_stored_normalized() {
        let mut relayed = signed(mint());
        relayed.nft_content_hash = format!("0x{}", CONTENT_HASH.to_ascii_uppercase());
        let details = verify_tx(&snapshot(), &relayed).unwrap();
        let after: Nft = serde_json::from_str(&details[1].balance_delta).unwrap();
        assert_eq!(after.nft_content_hash, CONTENT_HASH);
    }

    #[test]
    fn content_hash_must_be_32_bytes() {
        let mut tx = mint();
        tx.nft_content_hash = "abcd".into();
        assert!(matches!(
            verify_tx(&snapshot(), &tx),
            Err(VerifyError::InvalidParams { .. })
        ));
    }
}
