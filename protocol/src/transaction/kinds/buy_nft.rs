//! BuyNft: fill a listing at its posted price.
//!
//! The buyer pays the listed amount. The creator receives
//! `amount * creator_treasury_rate / 10_000` (rounded down) and the owner
//! the remainder. Ownership moves to the buyer and the listing is cleared.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::config::{NFT_CONTENT_HASH_LENGTH, TREASURY_RATE_DENOMINATOR};
use crate::ledger::amount::{is_positive, serde_amount};
use crate::ledger::{AccountIndex, AssetId, LedgerSnapshot, Nft, NftIndex};
use crate::transaction::error::VerifyError;
use crate::transaction::hash::FieldWriter;
use crate::transaction::payload::{
    charge_gas, check_content_hash, check_nft_owner, require_nft, DetailLeg, NftTransition,
    TxEffects, TxPayload,
};
use crate::transaction::types::{GasFee, TxType};

/// The buyer signs the listing terms it saw: owner, creator, content hash,
/// asset and price. Any drift in the stored NFT rejects the purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyNftTx {
    pub buyer_account_index: AccountIndex,
    pub owner_account_index: AccountIndex,
    pub creator_account_index: AccountIndex,
    pub nft_index: NftIndex,
    pub nft_content_hash: String,
    pub asset_id: AssetId,
    #[serde(with = "serde_amount")]
    pub asset_amount: BigInt,
    pub gas: GasFee,
    pub nonce: u64,
    #[serde(default)]
    pub sig: String,
}

/// Creator's cut of a sale.
pub fn royalty(amount: &BigInt, treasury_rate: u32) -> BigInt {
    amount * BigInt::from(treasury_rate) / BigInt::from(TREASURY_RATE_DENOMINATOR)
}

impl BuyNftTx {
    fn check_listing(&self, nft: &Nft) -> Result<(), VerifyError> {
        let tx_type = self.tx_type();
        if nft.creator_account_index != self.creator_account_index {
            return Err(VerifyError::OwnershipMismatch {
                tx_type,
                nft_index: self.nft_index,
                reason: format!(
                    "created by account {}, not account {}",
                    nft.creator_account_index, self.creator_account_index
                ),
            });
        }
        let price = nft.price().ok_or_else(|| {
            VerifyError::invalid_params(
                tx_type,
                format!("unparseable listing price {:?}", nft.asset_amount),
            )
        })?;
        if !is_positive(&price) {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!("nft {} is not listed", self.nft_index),
            ));
        }
        if nft.asset_id != self.asset_id || price != self.asset_amount {
            return Err(VerifyError::invalid_params(
                tx_type,
                format!(
                    "listing is {price} of asset {}, offer is {} of asset {}",
                    nft.asset_id, self.asset_amount, self.asset_id
                ),
            ));
        }
        Ok(())
    }
}

impl TxPayload for BuyNftTx {
    fn tx_type(&self) -> TxType {
        TxType::BuyNft
    }

    fn sender(&self) -> AccountIndex {
        self.buyer_account_index
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
            self.buyer_account_index,
            self.owner_account_index,
            self.creator_account_index,
            self.gas.gas_account_index,
        ]
    }

    fn required_assets(&self) -> Vec<(AccountIndex, AssetId)> {
        vec![
            (self.buyer_account_index, self.asset_id),
            (self.buyer_account_index, self.gas.gas_fee_asset_id),
            (self.owner_account_index, self.asset_id),
            (self.creator_account_index, self.asset_id),
            (self.gas.gas_account_index, self.gas.gas_fee_asset_id),
        ]
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
        check_nft_owner(tx_type, nft, self.nft_index, self.owner_account_index)?;
        check_content_hash(tx_type, nft, &self.nft_content_hash)?;
        if self.buyer_account_index == self.owner_account_index {
            return Err(VerifyError::invalid_params(
                tx_type,
                "buyer already owns the nft",
            ));
        }
        self.check_listing(nft)
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError> {
        let before = require_nft(snapshot, self.tx_type(), self.nft_index)?.clone();
        let creator_cut = royalty(&self.asset_amount, before.creator_treasury_rate);
        let owner_cut = &self.asset_amount - &creator_cut;

        let mut after = before.clone();
        after.owner_account_index = self.buyer_account_index;
        after.asset_id = 0;
        after.asset_amount = "0".to_string();

        let mut effects = TxEffects::new();
        effects
            .deltas
            .debit(self.buyer_account_index, self.asset_id, &self.asset_amount);
        effects
            .deltas
            .credit(self.owner_account_index, self.asset_id, &owner_cut);
        effects
            .deltas
            .credit(self.creator_account_index, self.asset_id, &creator_cut);
        charge_gas(&mut effects.deltas, self.buyer_account_index, &self.gas);
        effects.nft = Some(NftTransition { before, after });
        Ok(effects)
    }

    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError> {
        writer
            .index(self.buyer_account_index)
            .index(self.owner_account_index)
            .index(self.creator_account_index)
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
                account: self.buyer_account_index,
                asset: self.asset_id,
            },
            DetailLeg::Asset {
                account: self.buyer_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
            DetailLeg::Asset {
                account: self.owner_account_index,
                asset: self.asset_id,
            },
            DetailLeg::Asset {
                account: self.creator_account_index,
                asset: self.asset_id,
            },
            DetailLeg::Nft {
                account: self.buyer_account_index,
            },
            DetailLeg::Asset {
                account: self.gas.gas_account_index,
                asset: self.gas.gas_fee_asset_id,
            },
        ]
    }
}
