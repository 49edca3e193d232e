//! # Keygen Subcommand
//!
//! Generates the Laboratory's secp256k1 key pair. The private key is
//! written as 64 hex characters, or in the 66-character XRPL form with a
//! `00` prefix when `--xrpl-format` is given; the decoder accepts both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use xtrace_crypto::LabKeyPair;

/// Arguments for `xtrace keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the key files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Prefix for the key filenames.
    #[arg(long, default_value = "lab")]
    pub prefix: String,
    /// Write the private key with the XRPL `00` prefix.
    #[arg(long)]
    pub xrpl_format: bool,
}

pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    cmd_keygen(&args.output, &args.prefix, args.xrpl_format)
}

fn cmd_keygen(output_dir: &Path, prefix: &str, xrpl_format: bool) -> Result<u8> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let pair = LabKeyPair::generate();
    let secret_hex = if xrpl_format {
        pair.secret_key().to_xrpl_hex()
    } else {
        pair.secret_key().to_hex()
    };
    let public_hex = pair.public_key().to_hex();

    let key_path = output_dir.join(format!("{prefix}.key"));
    let pub_path = output_dir.join(format!("{prefix}.pub"));

    std::fs::write(&key_path, secret_hex.as_bytes())
        .with_context(|| format!("failed to write private key: {}", key_path.display()))?;
    std::fs::write(&pub_path, &public_hex)
        .with_context(|| format!("failed to write public key: {}", pub_path.display()))?;

    tracing::info!(prefix, xrpl_format, "generated Laboratory key pair");

    println!("OK: generated secp256k1 key pair");
    println!("  Private key: {}", key_path.display());
    println!("  Public key:  {}", pub_path.display());
    println!("  Public key (hex): {public_hex}");

    Ok(0)
}
