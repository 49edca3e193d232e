//! # Seal Subcommand
//!
//! Encodes a public record and a private reference for the Laboratory and
//! prints `{document, seal}` as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use xtrace_nft::{encode, SealedNft};

use crate::config::CliConfig;

/// Arguments for `xtrace seal`.
#[derive(Args, Debug)]
pub struct SealArgs {
    /// JSON file holding the public record (an object).
    #[arg(long)]
    pub record: PathBuf,
    /// Private reference to seal, e.g. an image locator.
    #[arg(long)]
    pub reference: String,
    /// Laboratory public key (hex). Defaults to configuration.
    #[arg(long)]
    pub pubkey: Option<String>,
}

pub fn run_seal(args: &SealArgs, config: &CliConfig) -> Result<u8> {
    let sealed = seal_record(&args.record, &args.reference, args.pubkey.as_deref(), config)?;
    crate::print_json(&sealed)?;
    Ok(0)
}

/// Read the record at `record_path` and seal `reference` for the
/// Laboratory.
pub(crate) fn seal_record(
    record_path: &Path,
    reference: &str,
    pubkey: Option<&str>,
    config: &CliConfig,
) -> Result<SealedNft> {
    let record = crate::read_record(record_path)?;
    let pubkey = crate::resolve_public_key(pubkey, config)?;
    encode(&record, reference, &pubkey).context("failed to seal record")
}
