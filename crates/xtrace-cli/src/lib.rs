//! # xtrace-cli: Lot Sealing Tool
//!
//! Provides the `xtrace` command-line interface over the codec:
//!
//! - `xtrace keygen`: generate a Laboratory secp256k1 key pair.
//! - `xtrace seal`: encode a public record and private reference.
//! - `xtrace open`: decode a document, optionally recovering the private
//!   reference with the Laboratory key.
//! - `xtrace mint-tx`: seal a lot and wrap it in an unsigned
//!   `NFTokenMint` for a wallet to sign.
//!
//! ```bash
//! xtrace keygen --output keys --prefix lab --xrpl-format
//! xtrace seal --record lot.json --reference ipfs://examplehash --pubkey "$(cat keys/lab.pub)"
//! xtrace open --document @document.hex --seal @seal.hex --key keys/lab.key
//! ```

pub mod config;
pub mod keygen;
pub mod mint;
pub mod open;
pub mod seal;

use std::path::Path;

use anyhow::{bail, Context, Result};
use xtrace_core::PublicRecord;

use crate::config::CliConfig;

/// Read a hex argument given inline or as `@FILE`.
pub fn read_hex_arg(arg: &str) -> Result<String> {
    let value = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {path}"))?,
        None => arg.to_string(),
    };
    let value = value.trim();
    if value.is_empty() {
        bail!("empty hex input");
    }
    Ok(value.to_string())
}

/// Read a JSON object file as a public record.
pub fn read_record(path: &Path) -> Result<PublicRecord> {
    if !path.exists() {
        bail!("record file not found: {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", path.display()))?;
    PublicRecord::from_value(value)
        .with_context(|| format!("invalid record: {}", path.display()))
}

/// The Laboratory public key: the flag if given, else configuration.
pub fn resolve_public_key(flag: Option<&str>, config: &CliConfig) -> Result<String> {
    flag.map(str::to_string)
        .or_else(|| config.lab_public_key.clone())
        .context("no Laboratory public key: pass --pubkey or set XTRACE_LAB_PUBKEY")
}

/// Print a value as pretty JSON on stdout.
pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
