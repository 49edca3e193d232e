//! # Open Subcommand
//!
//! Decodes a document. Given a seal and the Laboratory's private key it
//! also tries to recover the private reference; a failed recovery is
//! reported in the `decryption` field, not as an error.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use xtrace_nft::{decode, DecodedDocument, OpeningMaterial};
use zeroize::Zeroizing;

use crate::config::CliConfig;

/// Arguments for `xtrace open`.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Document hex, inline or as `@FILE`.
    #[arg(long)]
    pub document: String,
    /// Seal hex, inline or as `@FILE`.
    #[arg(long)]
    pub seal: Option<String>,
    /// Laboratory private key file. Defaults to configuration.
    #[arg(long, requires = "seal")]
    pub key: Option<PathBuf>,
}

pub fn run_open(args: &OpenArgs, config: &CliConfig) -> Result<u8> {
    let decoded = open_document(&args.document, args.seal.as_deref(), args.key.as_deref(), config)?;
    crate::print_json(&decoded)?;
    Ok(0)
}

pub(crate) fn open_document(
    document: &str,
    seal: Option<&str>,
    key: Option<&Path>,
    config: &CliConfig,
) -> Result<DecodedDocument> {
    let document = crate::read_hex_arg(document)?;

    let Some(seal) = seal else {
        return decode(&document, None).context("failed to decode document");
    };
    let seal = crate::read_hex_arg(seal)?;
    let key_path = match key.or(config.lab_key_file.as_deref()) {
        Some(path) => path,
        None => bail!("--seal needs a private key: pass --key or set XTRACE_LAB_KEY_FILE"),
    };
    let private_key = read_private_key(key_path)?;

    decode(&document, Some(OpeningMaterial::new(&seal, &private_key)))
        .context("failed to decode document")
}

fn read_private_key(path: &Path) -> Result<Zeroizing<String>> {
    if !path.exists() {
        bail!("private key file not found: {}", path.display());
    }
    let raw = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read private key: {}", path.display()))?,
    );
    Ok(Zeroizing::new(raw.trim().to_string()))
}
