//! Per-transaction balance deltas.
//!
//! A [`DeltaLedger`] records the signed change a single transaction makes
//! to each (account, asset) balance it touches. It lives for one
//! verification call and is never shared.
//!
//! Reads of an untouched pair return zero. Writes always add, so a sender
//! paying both a principal and a gas fee in the same asset ends up with one
//! entry holding the sum of both debits.

use std::collections::BTreeMap;

use num_bigint::BigInt;

use super::amount::zero;
use super::{AccountIndex, AssetId};

/// Signed balance changes keyed by account, then asset.
///
/// Iteration order is ascending by account index, then asset id, so two
/// ledgers with the same contents always render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaLedger {
    entries: BTreeMap<AccountIndex, BTreeMap<AssetId, BigInt>>,
}

impl DeltaLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the (account, asset) entry, creating it at zero first
    /// if needed. A zero delta still marks the pair as touched.
    pub fn accumulate(&mut self, account: AccountIndex, asset: AssetId, delta: BigInt) {
        *self
            .entries
            .entry(account)
            .or_default()
            .entry(asset)
            .or_insert_with(zero) += delta;
    }

    /// Record an outflow of `amount`.
    pub fn debit(&mut self, account: AccountIndex, asset: AssetId, amount: &BigInt) {
        self.accumulate(account, asset, -amount);
    }

    /// Record an inflow of `amount`.
    pub fn credit(&mut self, account: AccountIndex, asset: AssetId, amount: &BigInt) {
        self.accumulate(account, asset, amount.clone());
    }

    /// Net delta for the pair; zero when untouched.
    pub fn get(&self, account: AccountIndex, asset: AssetId) -> BigInt {
        self.entries
            .get(&account)
            .and_then(|assets| assets.get(&asset))
            .cloned()
            .unwrap_or_else(zero)
    }

    /// Whether the pair has been touched, even if its net delta is zero.
    pub fn contains(&self, account: AccountIndex, asset: AssetId) -> bool {
        self.entries
            .get(&account)
            .is_some_and(|assets| assets.contains_key(&asset))
    }

    /// Every touched pair with its net delta, in (account, asset) order.
    pub fn iter(&self) -> impl Iterator<Item = (AccountIndex, AssetId, &BigInt)> + '_ {
        self.entries.iter().flat_map(|(account, assets)| {
            assets
                .iter()
                .map(move |(asset, delta)| (*account, *asset, delta))
        })
    }

    /// Sum of all deltas for one asset across every account.
    pub fn net(&self, asset: AssetId) -> BigInt {
        self.entries
            .values()
            .filter_map(|assets| assets.get(&asset))
            .fold(zero(), |acc, delta| acc + delta)
    }

    /// Number of touched pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if nothing has been touched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
