// Copyright (c) 2026 Rollup Ledger Contributors. MIT License.
// See LICENSE for details.

//! # Rollup Transaction Verifier — Core Library
//!
//! The gatekeeper between user-signed L2 transactions and the mempool of a
//! ZK rollup. Given a transaction and a read-only snapshot of the accounts,
//! balances and NFTs it touches, the verifier either rejects it with a
//! precise reason or returns the exact per-account balance changes it would
//! cause, ready to be persisted for settlement.
//!
//! Message hashes are MiMC over the BN254 scalar field, because the proving
//! circuit has to recompute them and MiMC is cheap in constraints. Account
//! signatures are Ed25519 over those hashes.
//!
//! ## Architecture
//!
//! - **config** — Type codes, hash parameters and field limits.
//! - **crypto** — MiMC, Ed25519 keys and signature checks.
//! - **ledger** — The snapshot model and per-transaction delta ledger.
//! - **transaction** — The verification pipeline and every transaction kind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rollup_txverify::ledger::LedgerSnapshot;
//! use rollup_txverify::transaction::{verify_transaction, TxInfo};
//!
//! # fn load() -> (LedgerSnapshot, TxInfo) { unimplemented!() }
//! let (snapshot, tx) = load();
//! match verify_transaction(&snapshot, &tx) {
//!     Ok(details) => println!("{} detail records", details.len()),
//!     Err(e) if e.is_transient() => println!("retry later: {e}"),
//!     Err(e) => println!("rejected: {e}"),
//! }
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Verification is a pure function. No I/O, no clock, no global state.
//! 2. No floating point and no machine-width integers near money.
//! 3. Every rejection says which field, account, asset or NFT was at fault.

pub mod config;
pub mod crypto;
pub mod ledger;
pub mod transaction;

pub use ledger::{DeltaLedger, LedgerSnapshot};
pub use transaction::{
    sign_tx, verify_transaction, verify_tx, MempoolTxDetail, TxInfo, TxPayload, VerifyError,
};
