// Copyright (c) 2026 Rollup Ledger Contributors. MIT License.
// See LICENSE for details.

//! # txverify
//!
//! Entry point for the `txverify` binary: the boundary that feeds JSON into
//! the transaction verifier and reports the outcome.
//!
//! The binary supports five subcommands:
//!
//! - `verify`  — verify a transaction against a snapshot, print the report
//! - `hash`    — print a transaction's message hash
//! - `sign`    — sign a transaction with a secret key
//! - `keygen`  — generate an account keypair
//! - `version` — print build version information

mod cli;
mod commands;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use rollup_txverify::config;

use cli::{Commands, OutputFormat, TxVerifyCli};

fn main() -> Result<()> {
    let cli = TxVerifyCli::parse();
    logging::init_logging(cli.log_format, cli.verbose).context("failed to initialize logging")?;

    match cli.command {
        Commands::Verify(args) => verify(args),
        Commands::Hash(args) => hash(args),
        Commands::Sign(args) => sign(args),
        Commands::Keygen => {
            keygen();
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Verifies the request and prints the report. Rejections exit non-zero
/// after the report is printed.
fn verify(args: cli::VerifyArgs) -> Result<()> {
    let request = commands::load_request(&args.input)?;
    let report = commands::run_verify(&request);

    match args.output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print!("{}", commands::render_pretty(&report)),
    }

    if let Some(error) = report.error {
        bail!("transaction rejected: {}", error.message);
    }
    Ok(())
}

fn hash(args: cli::TxArgs) -> Result<()> {
    let tx = commands::load_tx(&args.input)?;
    println!("{}", commands::run_hash(&tx)?);
    Ok(())
}

fn sign(args: cli::SignArgs) -> Result<()> {
    let tx = commands::load_tx(&args.input)?;
    let signed = commands::run_sign(tx, &args.secret_key)?;
    let json = serde_json::to_string_pretty(&signed).context("failed to serialize transaction")?;
    println!("{json}");
    Ok(())
}

fn keygen() {
    let (secret, public) = commands::run_keygen();
    tracing::info!(public_key = %public, "account keypair generated");

    println!("Keypair generated.");
    println!("  Secret key : {secret}");
    println!("  Public key : {public}");
}

/// Prints version information to stdout.
fn print_version() {
    println!("txverify  {}", env!("CARGO_PKG_VERSION"));
    println!("signing   {}", config::SIGNING_ALGORITHM);
    println!("msg hash  MiMC-BN254 ({} rounds)", config::MIMC_ROUNDS);
}
