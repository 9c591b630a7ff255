//! # Ledger Snapshot Model
//!
//! The read-only view of L2 state a transaction is verified against.
//!
//! The mempool manager loads a [`LedgerSnapshot`] from the account, asset
//! and NFT repositories as of the nonce the transaction was built against,
//! and hands it to the verifier by shared reference. The verifier never
//! mutates it; settlement applies the resulting deltas later.

pub mod amount;
pub mod delta;

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

pub use delta::DeltaLedger;

/// Unique account identifier.
pub type AccountIndex = u64;

/// Fungible asset identifier.
pub type AssetId = u32;

/// Unique NFT identifier.
pub type NftIndex = u64;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// An L2 account as stored in the account table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_index: AccountIndex,
    pub account_name: String,
    /// Hex-encoded Ed25519 public key.
    pub public_key: String,
    /// Next nonce this account must sign with.
    pub nonce: u64,
    /// Id the account's next collection will receive.
    #[serde(default)]
    pub collection_nonce: u64,
}

// ---------------------------------------------------------------------------
// AccountAsset
// ---------------------------------------------------------------------------

/// One fungible balance of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAsset {
    pub account_index: AccountIndex,
    pub asset_id: AssetId,
    /// Decimal balance exactly as the repository returned it. Echoed
    /// verbatim into detail records.
    pub balance: String,
}

impl AccountAsset {
    /// The balance as a number, if the stored string is a valid decimal.
    pub fn balance_value(&self) -> Option<BigInt> {
        amount::parse_amount(&self.balance)
    }
}

// ---------------------------------------------------------------------------
// Nft
// ---------------------------------------------------------------------------

/// An L2 NFT record. Also used as the before/after state in NFT detail
/// records, where it is rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    pub nft_index: NftIndex,
    pub creator_account_index: AccountIndex,
    pub owner_account_index: AccountIndex,
    /// Hex-encoded 32-byte content hash.
    pub nft_content_hash: String,
    pub nft_l1_address: String,
    pub nft_l1_token_id: String,
    /// Royalty paid to the creator on sale, in basis points.
    #[serde(default)]
    pub creator_treasury_rate: u32,
    #[serde(default)]
    pub collection_id: u64,
    /// Asset the listing price is denominated in.
    pub asset_id: AssetId,
    /// Listing price as a decimal string; "0" means not for sale.
    pub asset_amount: String,
}

impl Nft {
    /// The empty slot at `nft_index`: the state before a mint and after a
    /// withdrawal to L1.
    pub fn empty(nft_index: NftIndex) -> Self {
        Self {
            nft_index,
            creator_account_index: 0,
            owner_account_index: 0,
            nft_content_hash: "0".to_string(),
            nft_l1_address: "0".to_string(),
            nft_l1_token_id: "0".to_string(),
            creator_treasury_rate: 0,
            collection_id: 0,
            asset_id: 0,
            asset_amount: "0".to_string(),
        }
    }

    /// Returns `true` for the empty slot.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty(self.nft_index)
    }

    /// The listing price, if the stored string is a valid decimal.
    pub fn price(&self) -> Option<BigInt> {
        amount::parse_amount(&self.asset_amount)
    }
}

impl fmt::Display for Nft {
    /// JSON, the encoding detail records carry for NFT state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ---------------------------------------------------------------------------
// LedgerSnapshot
// ---------------------------------------------------------------------------

/// Read-only state a transaction is verified against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: BTreeMap<AccountIndex, Account>,
    #[serde(default)]
    pub assets: BTreeMap<AccountIndex, BTreeMap<AssetId, AccountAsset>>,
    #[serde(default)]
    pub nfts: BTreeMap<NftIndex, Nft>,
}

impl LedgerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, index: AccountIndex) -> Option<&Account> {
        self.accounts.get(&index)
    }

    pub fn asset(&self, account: AccountIndex, asset: AssetId) -> Option<&AccountAsset> {
        self.assets.get(&account).and_then(|assets| assets.get(&asset))
    }

    pub fn nft(&self, index: NftIndex) -> Option<&Nft> {
        self.nfts.get(&index)
    }

    /// Insert or replace an account. Used by repository adapters and fixtures.
    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.account_index, account);
        self
    }

    /// Insert or replace a balance.
    pub fn with_balance(mut self, account: AccountIndex, asset: AssetId, balance: &str) -> Self {
        self.assets.entry(account).or_default().insert(
            asset,
            AccountAsset {
                account_index: account,
                asset_id: asset,
                balance: balance.to_string(),
            },
        );
        self
    }

    /// Insert or replace an NFT.
    pub fn with_nft(mut self, nft: Nft) -> Self {
        self.nfts.insert(nft.nft_index, nft);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_nft_roundtrips_through_json() {
        let empty = Nft::empty(42);
        assert!(empty.is_empty());
        let parsed: Nft = serde_json::from_str(&empty.to_string()).unwrap();
        assert_eq!(parsed, empty);
    }

    #[test]
    fn listed_nft_is_not_empty() {
        let mut nft = Nft::empty(1);
        nft.owner_account_index = 5;
        assert!(!nft.is_empty());
    }

    #[test]
    fn snapshot_lookups() {
        let snapshot = LedgerSnapshot::new()
            .with_account(Account {
                account_index: 2,
                account_name: "alice.legend".into(),
                public_key: String::new(),
                nonce: 0,
                collection_nonce: 0,
            })
            .with_balance(2, 0, "1000");
        assert!(snapshot.account(2).is_some());
        assert!(snapshot.account(3).is_none());
        assert_eq!(
            snapshot.asset(2, 0).and_then(AccountAsset::balance_value),
            Some(BigInt::from(1000))
        );
        assert!(snapshot.asset(2, 1).is_none());
    }

    #[test]
    fn snapshot_deserializes_integer_map_keys() {
        let json = r#"{
            "accounts": {},
            "assets": { "7": { "1": { "account_index": 7, "asset_id": 1, "balance": "55" } } },
            "nfts": {}
        }"#;
        let snapshot: LedgerSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.asset(7, 1).unwrap().balance, "55");
    }
}
