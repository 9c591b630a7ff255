//! Subcommand implementations.
//!
//! Everything here is the boundary around the pure verifier: read JSON,
//! call into `rollup_txverify`, emit the audit event, render the result.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rollup_txverify::crypto::LedgerKeypair;
use rollup_txverify::ledger::LedgerSnapshot;
use rollup_txverify::transaction::{
    compute_msg_hash, sign_tx, verify_transaction, ErrorKind, MempoolTxDetail, TxInfo, TxType,
    VerifyError,
};

/// Input of the `verify` subcommand.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyRequest {
    pub snapshot: LedgerSnapshot,
    pub tx: TxInfo,
}

/// Output of the `verify` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub accepted: bool,
    pub tx_type: TxType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_hash: Option<String>,
    pub details: Vec<MempoolTxDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub transient: bool,
    pub message: String,
}

impl From<&VerifyError> for ErrorReport {
    fn from(e: &VerifyError) -> Self {
        Self {
            kind: e.kind(),
            transient: e.is_transient(),
            message: e.to_string(),
        }
    }
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_request(path: &Path) -> Result<VerifyRequest> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse verify request from {}", path.display()))
}

pub fn load_tx(path: &Path) -> Result<TxInfo> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse transaction from {}", path.display()))
}

/// Verify and log exactly one audit event for the outcome.
pub fn run_verify(request: &VerifyRequest) -> VerifyReport {
    let payload = request.tx.as_payload();
    let tx_type = payload.tx_type();
    let sender = payload.sender();
    let nonce = payload.nonce();

    let msg_hash = compute_msg_hash(payload).ok().map(|h| h.to_hex());

    match verify_transaction(&request.snapshot, &request.tx) {
        Ok(details) => {
            tracing::info!(
                tx_type = %tx_type,
                sender,
                nonce,
                outcome = "accepted",
                records = details.len(),
                "transaction verified"
            );
            VerifyReport {
                accepted: true,
                tx_type,
                msg_hash,
                details,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                tx_type = %tx_type,
                sender,
                nonce,
                outcome = "rejected",
                error_kind = %e.kind(),
                transient = e.is_transient(),
                error = %e,
                "transaction rejected"
            );
            VerifyReport {
                accepted: false,
                tx_type,
                msg_hash,
                details: Vec::new(),
                error: Some(ErrorReport::from(&e)),
            }
        }
    }
}

/// Human-readable rendering of a report.
pub fn render_pretty(report: &VerifyReport) -> String {
    let mut out = String::new();
    let verdict = if report.accepted { "ACCEPTED" } else { "REJECTED" };
    out.push_str(&format!("{} {}\n", report.tx_type, verdict));
    if let Some(hash) = &report.msg_hash {
        out.push_str(&format!("  msg hash : {hash}\n"));
    }
    if let Some(error) = &report.error {
        out.push_str(&format!(
            "  error    : {} (transient: {})\n  reason   : {}\n",
            error.kind, error.transient, error.message
        ));
    }
    for (i, d) in report.details.iter().enumerate() {
        out.push_str(&format!(
            "  [{i}] {:?} account={} ({}) asset={} balance={} delta={}\n",
            d.asset_type, d.account_index, d.account_name, d.asset_id, d.balance, d.balance_delta
        ));
    }
    out
}

pub fn run_hash(tx: &TxInfo) -> Result<String> {
    let hash = compute_msg_hash(tx.as_payload()).context("transaction cannot be hashed")?;
    Ok(hash.to_hex())
}

pub fn run_sign(mut tx: TxInfo, secret_key_hex: &str) -> Result<TxInfo> {
    let keypair = LedgerKeypair::from_hex(secret_key_hex).context("invalid secret key")?;
    sign_tx(tx.as_payload_mut(), &keypair).context("transaction cannot be signed")?;
    tracing::info!(
        tx_type = %tx.tx_type(),
        public_key = %keypair.public_key(),
        "transaction signed"
    );
    Ok(tx)
}

/// Returns `(secret_key_hex, public_key_hex)`.
pub fn run_keygen() -> (String, String) {
    let keypair = LedgerKeypair::generate();
    (keypair.secret_key_hex(), keypair.public_key().to_hex())
}
