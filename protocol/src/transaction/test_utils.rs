//! Shared fixtures for the transaction unit tests.

use num_bigint::BigInt;

use super::payload::TxPayload;
use super::signing::sign_tx;
use super::types::{GasFee, MempoolTxDetail};
use crate::crypto::LedgerKeypair;
use crate::ledger::{Account, AccountIndex, AssetId, LedgerSnapshot, Nft, NftIndex};

pub(crate) const GAS_ACCOUNT: AccountIndex = 1;
pub(crate) const ALICE: AccountIndex = 2;
pub(crate) const BOB: AccountIndex = 3;
pub(crate) const CAROL: AccountIndex = 4;

pub(crate) const ASSET_A: AssetId = 0;
pub(crate) const ASSET_GAS: AssetId = 1;

pub(crate) const L1_ADDRESS: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
pub(crate) const CONTENT_HASH: &str =
    "0b0c7f4e9a2b1d3c5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5";

pub(crate) fn name_of(index: AccountIndex) -> String {
    match index {
        GAS_ACCOUNT => "gas.legend".to_string(),
        ALICE => "alice.legend".to_string(),
        BOB => "bob.legend".to_string(),
        CAROL => "carol.legend".to_string(),
        other => format!("account{other}.legend"),
    }
}

/// Deterministic keypair per account.
pub(crate) fn keypair(index: AccountIndex) -> LedgerKeypair {
    LedgerKeypair::from_seed(&[index as u8; 32])
}

pub(crate) fn account(index: AccountIndex) -> Account {
    Account {
        account_index: index,
        account_name: name_of(index),
        public_key: keypair(index).public_key().to_hex(),
        nonce: 0,
        collection_nonce: 0,
    }
}

/// Four accounts, each holding 1000 of `ASSET_A` and `ASSET_GAS`.
pub(crate) fn base_snapshot() -> LedgerSnapshot {
    let mut snapshot = LedgerSnapshot::new();
    for index in [GAS_ACCOUNT, ALICE, BOB, CAROL] {
        snapshot = snapshot
            .with_account(account(index))
            .with_balance(index, ASSET_A, "1000")
            .with_balance(index, ASSET_GAS, "1000");
    }
    snapshot
}

pub(crate) fn gas(fee: i64) -> GasFee {
    GasFee {
        gas_account_index: GAS_ACCOUNT,
        gas_fee_asset_id: ASSET_GAS,
        gas_fee_asset_amount: BigInt::from(fee),
    }
}

/// An NFT minted by `creator`, held by `owner`, not listed.
pub(crate) fn nft(index: NftIndex, owner: AccountIndex, creator: AccountIndex) -> Nft {
    Nft {
        nft_index: index,
        creator_account_index: creator,
        owner_account_index: owner,
        nft_content_hash: CONTENT_HASH.to_string(),
        nft_l1_address: "0".to_string(),
        nft_l1_token_id: "0".to_string(),
        creator_treasury_rate: 0,
        collection_id: 0,
        asset_id: 0,
        asset_amount: "0".to_string(),
    }
}

/// Sign with the sender's fixture keypair.
pub(crate) fn signed<P: TxPayload>(mut payload: P) -> P {
    let kp = keypair(payload.sender());
    sign_tx(&mut payload, &kp).expect("fixture payload must be encodable");
    payload
}

/// `(account, asset, delta)` per record, for compact assertions.
pub(crate) fn deltas(details: &[MempoolTxDetail]) -> Vec<(AccountIndex, u64, String)> {
    details
        .iter()
        .map(|d| (d.account_index, d.asset_id, d.balance_delta.clone()))
        .collect()
}
