//! # Logging
//!
//! `tracing` subscriber for the `txverify` binary. Every line goes to
//! stderr; stdout is reserved for reports, hashes and signed payloads.
//!
//! The default filter covers the binary and the verifier library at
//! `info`. Each `-v` raises both by one level. `RUST_LOG`, when set,
//! replaces the default filter entirely:
//!
//! ```text
//! RUST_LOG=txverify=debug txverify verify -i request.json
//! ```

use clap::ValueEnum;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Crates whose events the default filter lets through.
const LOG_TARGETS: [&str; 2] = ["txverify", "rollup_txverify"];

/// Log output format on stderr.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One flat JSON object per event, for audit pipelines.
    Json,
}

/// Default filter directives for a `-v` count.
pub fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(format: LogFormat, verbosity: u8) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    tracing::debug!(?format, verbosity, "logging initialized");
    Ok(())
}
