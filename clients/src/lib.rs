//! Shared plumbing for the folding curve client binaries.
//!
//! Both binaries take the same global flags ([`CurveArgs`]), install the same
//! `tracing` subscriber, and resolve a [`CurveConfig`] from an optional TOML
//! file plus command-line overrides.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use folding_curves::{CurveConfig, FoldingCurve, Symbol};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Global flags shared by every client.
#[derive(Debug, Clone, Default, Args)]
pub struct CurveArgs {
    /// TOML file with `sequence` and `[limits]`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Folding sequence, bare (`+-+`) or expanded (`A+B-A+B`). Overrides the
    /// config file.
    #[arg(short, long, global = true, allow_hyphen_values = true)]
    pub sequence: Option<String>,

    /// Largest word any step may produce. Overrides the config file.
    #[arg(long, global = true)]
    pub max_word_length: Option<usize>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `info` (or `debug` when `verbose`).
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("failed to install tracing subscriber")
}

/// Parses a TOML configuration document.
///
/// # Errors
///
/// Fails on malformed TOML or unknown value types.
pub fn parse_config(text: &str) -> Result<CurveConfig> {
    toml::from_str(text).context("invalid curve configuration")
}

/// Resolves the configuration: file (if any), then flag overrides.
///
/// # Errors
///
/// Fails if the config file cannot be read or parsed.
pub fn load_config(args: &CurveArgs) -> Result<CurveConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_config(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => CurveConfig::default(),
    };
    if let Some(sequence) = &args.sequence {
        config.sequence.clone_from(sequence);
    }
    if let Some(max) = args.max_word_length {
        config.limits.max_word_length = max;
    }
    debug!(sequence = %config.sequence, max_word_length = config.limits.max_word_length, "resolved configuration");
    Ok(config)
}

/// Builds the curve described by `args`.
///
/// # Errors
///
/// Fails if the configuration cannot be loaded or is invalid.
pub fn build_curve(args: &CurveArgs) -> Result<FoldingCurve> {
    let config = load_config(args)?;
    FoldingCurve::from_config(&config)
        .with_context(|| format!("invalid folding sequence \"{}\"", config.sequence))
}

/// Parses a vertex subset such as `RLSs`.
///
/// # Errors
///
/// Fails on a character that is not a symbol.
pub fn parse_vertices(text: &str) -> Result<Vec<Symbol>> {
    text.chars()
        .enumerate()
        .map(|(i, c)| Symbol::from_char(c, i).context("invalid vertex list"))
        .collect()
}

/// Writes `value` as pretty JSON to `out`, or to stdout when `None`.
///
/// # Errors
///
/// Fails on serialization or file I/O errors.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match out {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), "wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}
