//! The per-type contract every transaction kind implements.
//!
//! The verification pipeline is the same for every kind; only the pieces
//! below differ. A kind declares what it needs from the snapshot, checks
//! its domain rules, computes its balance effects, writes its canonical
//! hash fields and lists its detail legs in order.

use num_bigint::BigInt;

use super::error::VerifyError;
use super::hash::{same_hex, FieldWriter};
use super::types::{GasFee, TxType};
use crate::ledger::{Account, AccountIndex, AssetId, DeltaLedger, LedgerSnapshot, Nft, NftIndex};

// ---------------------------------------------------------------------------
// Effects & legs
// ---------------------------------------------------------------------------

/// One entry in a kind's ordered leg list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLeg {
    /// A fungible balance.
    Asset {
        account: AccountIndex,
        asset: AssetId,
    },
    /// The NFT slot the transaction transitions, attributed to `account`.
    Nft { account: AccountIndex },
    /// The collection counter of `account`.
    CollectionNonce { account: AccountIndex },
}

/// Before and after state of an NFT slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftTransition {
    pub before: Nft,
    pub after: Nft,
}

/// Before and after value of an account's collection counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionNonceChange {
    pub before: u64,
    pub after: u64,
}

/// Everything a transaction would change, computed without touching the
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxEffects {
    pub deltas: DeltaLedger,
    pub nft: Option<NftTransition>,
    pub collection_nonce: Option<CollectionNonceChange>,
}

impl TxEffects {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// TxPayload
// ---------------------------------------------------------------------------

/// A signed L2 transaction of one kind.
///
/// Object safe, so the pipeline can run over `&dyn TxPayload`.
pub trait TxPayload {
    fn tx_type(&self) -> TxType;

    /// The signing account.
    fn sender(&self) -> AccountIndex;

    fn nonce(&self) -> u64;

    /// Hex-encoded signature.
    fn signature(&self) -> &str;

    fn set_signature(&mut self, signature: String);

    fn gas(&self) -> &GasFee;

    /// Accounts that must exist in the snapshot.
    fn required_accounts(&self) -> Vec<AccountIndex> {
        vec![self.sender(), self.gas().gas_account_index]
    }

    /// Balances that must exist in the snapshot.
    fn required_assets(&self) -> Vec<(AccountIndex, AssetId)> {
        gas_assets(self.sender(), self.gas())
    }

    /// NFTs that must exist in the snapshot.
    fn required_nfts(&self) -> Vec<NftIndex> {
        Vec::new()
    }

    /// Every submitted amount, labelled, for the sign and width checks.
    fn submitted_amounts(&self) -> Vec<(&'static str, &BigInt)> {
        vec![("gas_fee_asset_amount", &self.gas().gas_fee_asset_amount)]
    }

    /// Kind-specific rules. Runs after existence, amount and nonce checks.
    fn validate(&self, _snapshot: &LedgerSnapshot) -> Result<(), VerifyError> {
        Ok(())
    }

    fn compute_effects(&self, snapshot: &LedgerSnapshot) -> Result<TxEffects, VerifyError>;

    /// Append the payload fields after the type code, in canonical order.
    fn canonical_fields(&self, writer: &mut FieldWriter) -> Result<(), VerifyError>;

    /// The legs detail records are emitted for, in order.
    fn detail_legs(&self) -> Vec<DetailLeg>;
}

// ---------------------------------------------------------------------------
// Shared helpers for kinds
// ---------------------------------------------------------------------------

/// The two balances every gas payment touches.
pub(crate) fn gas_assets(sender: AccountIndex, gas: &GasFee) -> Vec<(AccountIndex, AssetId)> {
    vec![
        (sender, gas.gas_fee_asset_id),
        (gas.gas_account_index, gas.gas_fee_asset_id),
    ]
}

/// Move the fee from `sender` to the gas collector.
pub(crate) fn charge_gas(deltas: &mut DeltaLedger, sender: AccountIndex, gas: &GasFee) {
    deltas.debit(sender, gas.gas_fee_asset_id, &gas.gas_fee_asset_amount);
    deltas.credit(
        gas.gas_account_index,
        gas.gas_fee_asset_id,
        &gas.gas_fee_asset_amount,
    );
}

pub(crate) fn require_account(
    snapshot: &LedgerSnapshot,
    tx_type: TxType,
    index: AccountIndex,
) -> Result<&Account, VerifyError> {
    snapshot
        .account(index)
        .ok_or_else(|| VerifyError::invalid_params(tx_type, format!("unknown account {index}")))
}

pub(crate) fn require_nft(
    snapshot: &LedgerSnapshot,
    tx_type: TxType,
    index: NftIndex,
) -> Result<&Nft, VerifyError> {
    snapshot
        .nft(index)
        .ok_or_else(|| VerifyError::invalid_params(tx_type, format!("unknown nft {index}")))
}

/// The stored name of `index` must equal the name the sender signed.
pub(crate) fn check_account_name(
    snapshot: &LedgerSnapshot,
    tx_type: TxType,
    index: AccountIndex,
    claimed: &str,
) -> Result<(), VerifyError> {
    let account = require_account(snapshot, tx_type, index)?;
    if account.account_name != claimed {
        return Err(VerifyError::invalid_params(
            tx_type,
            format!(
                "account name mismatch for account {index}: stored {:?}, claimed {claimed:?}",
                account.account_name
            ),
        ));
    }
    Ok(())
}

/// The NFT record must be the one claimed and be owned by `owner`.
pub(crate) fn check_nft_owner(
    tx_type: TxType,
    nft: &Nft,
    claimed_index: NftIndex,
    owner: AccountIndex,
) -> Result<(), VerifyError> {
    if nft.nft_index != claimed_index {
        return Err(VerifyError::OwnershipMismatch {
            tx_type,
            nft_index: claimed_index,
            reason: format!("record carries index {}", nft.nft_index),
        });
    }
    if nft.owner_account_index != owner {
        return Err(VerifyError::OwnershipMismatch {
            tx_type,
            nft_index: claimed_index,
            reason: format!(
                "owned by account {}, not account {owner}",
                nft.owner_account_index
            ),
        });
    }
    Ok(())
}

pub(crate) fn check_content_hash(tx_type: TxType, nft: &Nft, claimed: &str) -> Result<(), VerifyError> {
    if !same_hex(&nft.nft_content_hash, claimed) {
        return Err(VerifyError::ContentHashMismatch {
            tx_type,
            nft_index: nft.nft_index,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas() -> GasFee {
        GasFee {
            gas_account_index: 1,
            gas_fee_asset_id: 3,
            gas_fee_asset_amount: BigInt::from(5),
        }
    }

    #[test]
    fn gas_charge_conserves_the_fee_asset() {
        let mut deltas = DeltaLedger::new();
        charge_gas(&mut deltas, 2, &gas());
        assert_eq!(deltas.get(2, 3), BigInt::from(-5));
        assert_eq!(deltas.get(1, 3), BigInt::from(5));
        assert_eq!(deltas.net(3), BigInt::from(0));
    }

    #[test]
    fn sender_paying_itself_nets_to_zero() {
        let mut deltas = DeltaLedger::new();
        let mut g = gas();
        g.gas_account_index = 2;
        charge_gas(&mut deltas, 2, &g);
        assert!(deltas.contains(2, 3));
        assert_eq!(deltas.get(2, 3), BigInt::from(0));
    }

    #[test]
    fn nft_owner_check() {
        let mut nft = Nft::empty(9);
        nft.owner_account_index = 4;
        assert!(check_nft_owner(TxType::TransferNft, &nft, 9, 4).is_ok());
        match check_nft_owner(TxType::TransferNft, &nft, 9, 5) {
            Err(VerifyError::OwnershipMismatch { nft_index: 9, .. }) => {}
            other => panic!("expected OwnershipMismatch, got {:?}", other),
        }
        assert!(check_nft_owner(TxType::TransferNft, &nft, 8, 4).is_err());
    }

    #[test]
    fn content_hash_check() {
        let mut nft = Nft::empty(9);
        nft.nft_content_hash = "AB".repeat(32);
        assert!(check_content_hash(TxType::SetNftPrice, &nft, &"ab".repeat(32)).is_ok());
        match check_content_hash(TxType::SetNftPrice, &nft, &"cd".repeat(32)) {
            Err(VerifyError::ContentHashMismatch { nft_index: 9, .. }) => {}
            other => panic!("expected ContentHashMismatch, got {:?}", other),
        }
    }
}
