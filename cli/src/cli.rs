//! # CLI Interface
//!
//! Defines the command-line argument structure for `txverify` using `clap`
//! derive. Subcommands: `verify`, `hash`, `sign`, `keygen` and `version`.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Rollup transaction verifier.
///
/// Checks a signed L2 transaction against a ledger snapshot and prints the
/// balance changes it would cause, or the reason it is rejected.
#[derive(Parser, Debug)]
#[command(
    name = "txverify",
    about = "Rollup L2 transaction verifier",
    version,
    propagate_version = true
)]
pub struct TxVerifyCli {
    /// Log format on stderr.
    #[arg(
        long,
        global = true,
        env = "TXVERIFY_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a transaction against a snapshot.
    Verify(VerifyArgs),
    /// Print the message hash of a transaction.
    Hash(TxArgs),
    /// Sign a transaction and print it with its signature filled in.
    Sign(SignArgs),
    /// Generate a fresh account keypair.
    Keygen,
    /// Print version information and exit.
    Version,
}

/// How `verify` renders its report on stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Pretty,
}

/// Arguments for the `verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// JSON file holding `{"snapshot": ..., "tx": ...}`. Use `-` for stdin.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Report format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

/// Arguments for subcommands that read a single transaction.
#[derive(Parser, Debug)]
pub struct TxArgs {
    /// JSON file holding one tagged transaction. Use `-` for stdin.
    #[arg(long, short = 'i')]
    pub input: PathBuf,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// JSON file holding one tagged transaction. Use `-` for stdin.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Hex-encoded 32-byte Ed25519 secret key of the sender.
    ///
    /// Prefer the environment variable; flags end up in shell history.
    #[arg(long, env = "TXVERIFY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        TxVerifyCli::command().debug_assert();
    }

    #[test]
    fn parses_verify_with_pretty_output() {
        let cli = TxVerifyCli::try_parse_from([
            "txverify", "verify", "--input", "req.json", "--output", "pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.input, PathBuf::from("req.json"));
                assert_eq!(args.output, OutputFormat::Pretty);
            }
            other => panic!("expected verify, got {:?}", other),
        }
    }

    #[test]
    fn parses_global_logging_flags_after_subcommand() {
        let cli = TxVerifyCli::try_parse_from([
            "txverify", "hash", "-i", "tx.json", "-vv", "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Hash(_)));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(TxVerifyCli::try_parse_from(["txverify", "--log-format", "xml", "keygen"]).is_err());
    }
}
