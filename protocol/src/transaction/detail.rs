//! Detail emission: turning a transaction's effects into the ordered
//! [`MempoolTxDetail`] records the mempool persists.
//!
//! Records follow the kind's leg list. A pair listed twice (a sender that
//! is also the gas collector, say) gets one record at its first position
//! carrying the accumulated delta. Any touched pair a kind forgot to list
//! is appended afterwards in (account, asset) order, so every balance the
//! transaction moves is accounted for exactly once.

use std::collections::BTreeSet;

use super::error::VerifyError;
use super::payload::{DetailLeg, TxEffects};
use super::types::{AssetType, MempoolTxDetail, TxType};
use crate::ledger::{AccountIndex, AssetId, LedgerSnapshot};

/// Build the detail records for a verified transaction.
pub fn emit_details(
    tx_type: TxType,
    snapshot: &LedgerSnapshot,
    effects: &TxEffects,
    legs: &[DetailLeg],
) -> Result<Vec<MempoolTxDetail>, VerifyError> {
    let mut emitted: BTreeSet<(AccountIndex, AssetId)> = BTreeSet::new();
    let mut details = Vec::with_capacity(legs.len());

    for leg in legs {
        match *leg {
            DetailLeg::Asset { account, asset } => {
                if emitted.insert((account, asset)) {
                    details.push(fungible_detail(tx_type, snapshot, effects, account, asset)?);
                }
            }
            DetailLeg::Nft { account } => {
                let transition = effects.nft.as_ref().ok_or_else(|| {
                    VerifyError::invalid_params(tx_type, "nft leg without an nft transition")
                })?;
                details.push(MempoolTxDetail {
                    asset_id: transition.after.nft_index,
                    asset_type: AssetType::NonFungible,
                    account_index: account,
                    account_name: account_name(tx_type, snapshot, account)?,
                    balance: transition.before.to_string(),
                    balance_delta: transition.after.to_string(),
                });
            }
            DetailLeg::CollectionNonce { account } => {
                let change = effects.collection_nonce.ok_or_else(|| {
                    VerifyError::invalid_params(tx_type, "collection leg without a counter change")
                })?;
                details.push(MempoolTxDetail {
                    asset_id: 0,
                    asset_type: AssetType::CollectionNonce,
                    account_index: account,
                    account_name: account_name(tx_type, snapshot, account)?,
                    balance: change.before.to_string(),
                    balance_delta: change.after.to_string(),
                });
            }
        }
    }

    for (account, asset, _) in effects.deltas.iter() {
        if emitted.insert((account, asset)) {
            details.push(fungible_detail(tx_type, snapshot, effects, account, asset)?);
        }
    }

    Ok(details)
}

fn fungible_detail(
    tx_type: TxType,
    snapshot: &LedgerSnapshot,
    effects: &TxEffects,
    account: AccountIndex,
    asset: AssetId,
) -> Result<MempoolTxDetail, VerifyError> {
    let record = snapshot.asset(account, asset).ok_or_else(|| {
        VerifyError::invalid_params(
            tx_type,
            format!("no balance of asset {asset} for account {account}"),
        )
    })?;
    Ok(MempoolTxDetail {
        asset_id: u64::from(asset),
        asset_type: AssetType::Fungible,
        account_index: account,
        account_name: account_name(tx_type, snapshot, account)?,
        balance: record.balance.clone(),
        balance_delta: effects.deltas.get(account, asset).to_string(),
    })
}

fn account_name(
    tx_type: TxType,
    snapshot: &LedgerSnapshot,
    account: AccountIndex,
) -> Result<String, VerifyError> {
    snapshot
        .account(account)
        .map(|a| a.account_name.clone())
        .ok_or_else(|| VerifyError::invalid_params(tx_type, format!("unknown account {account}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, Nft};
    use crate::transaction::payload::{CollectionNonceChange, NftTransition};
    use num_bigint::BigInt;

    fn account(index: AccountIndex, name: &str) -> Account {
        Account {
            account_index: index,
            account_name: name.to_string(),
            public_key: String::new(),
            nonce: 0,
            collection_nonce: 0,
        }
    }

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot::new()
            .with_account(account(1, "gas.legend"))
            .with_account(account(2, "alice.legend"))
            .with_balance(1, 1, "0")
            .with_balance(2, 0, "1000")
            .with_balance(2, 1, "50")
    }

    fn leg(account: AccountIndex, asset: AssetId) -> DetailLeg {
        DetailLeg::Asset { account, asset }
    }

    #[test]
    fn records_follow_leg_order() {
        let mut effects = TxEffects::new();
        effects.deltas.debit(2, 0, &BigInt::from(100));
        effects.deltas.debit(2, 1, &BigInt::from(5));
        effects.deltas.credit(1, 1, &BigInt::from(5));

        let details = emit_details(
            TxType::Withdraw,
            &snapshot(),
            &effects,
            &[leg(2, 0), leg(2, 1), leg(1, 1)],
        )
        .unwrap();

        let summary: Vec<_> = details
            .iter()
            .map(|d| (d.account_index, d.asset_id, d.balance.as_str(), d.balance_delta.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(2, 0, "1000", "-100"), (2, 1, "50", "-5"), (1, 1, "0", "5")]
        );
        assert_eq!(details[0].account_name, "alice.legend");
    }

    #[test]
    fn duplicate_leg_is_emitted_once_with_accumulated_delta() {
        let mut effects = TxEffects::new();
        effects.deltas.debit(2, 1, &BigInt::from(100));
        effects.deltas.debit(2, 1, &BigInt::from(5));
        effects.deltas.credit(1, 1, &BigInt::from(5));

        let details = emit_details(
            TxType::Withdraw,
            &snapshot(),
            &effects,
            &[leg(2, 1), leg(2, 1), leg(1, 1)],
        )
        .unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].balance_delta, "-105");
    }

    #[test]
    fn unlisted_touched_pair_is_appended() {
        let mut effects = TxEffects::new();
        effects.deltas.debit(2, 0, &BigInt::from(1));
        effects.deltas.credit(1, 1, &BigInt::from(0));

        let details = emit_details(TxType::Withdraw, &snapshot(), &effects, &[leg(2, 0)]).unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!((details[1].account_index, details[1].asset_id), (1, 1));
    }

    #[test]
    fn nft_leg_renders_json_states() {
        let before = Nft::empty(7);
        let mut after = before.clone();
        after.owner_account_index = 2;
        let effects = TxEffects {
            nft: Some(NftTransition {
                before: before.clone(),
                after: after.clone(),
            }),
            ..TxEffects::new()
        };

        let details = emit_details(
            TxType::MintNft,
            &snapshot(),
            &effects,
            &[DetailLeg::Nft { account: 2 }],
        )
        .unwrap();
        assert_eq!(details[0].asset_type, AssetType::NonFungible);
        assert_eq!(details[0].asset_id, 7);
        let parsed: Nft = serde_json::from_str(&details[0].balance_delta).unwrap();
        assert_eq!(parsed, after);
        assert_eq!(details[0].balance, before.to_string());
    }

    #[test]
    fn collection_leg_carries_counters() {
        let effects = TxEffects {
            collection_nonce: Some(CollectionNonceChange { before: 3, after: 4 }),
            ..TxEffects::new()
        };
        let details = emit_details(
            TxType::CreateCollection,
            &snapshot(),
            &effects,
            &[DetailLeg::CollectionNonce { account: 2 }],
        )
        .unwrap();
        assert_eq!(details[0].asset_type, AssetType::CollectionNonce);
        assert_eq!((details[0].balance.as_str(), details[0].balance_delta.as_str()), ("3", "4"));
    }

    #[test]
    fn missing_balance_record_is_invalid_params() {
        let mut effects = TxEffects::new();
        effects.deltas.credit(2, 9, &BigInt::from(1));
        match emit_details(TxType::Transfer, &snapshot(), &effects, &[leg(2, 9)]) {
            Err(VerifyError::InvalidParams { .. }) => {}
            other => panic!("expected InvalidParams, got {:?}", other),
        }
    }
}
