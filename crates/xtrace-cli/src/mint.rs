//! # Mint-tx Subcommand
//!
//! Seals a lot and wraps it in an unsigned `NFTokenMint`. The output is
//! handed to a wallet for autofill and signing; `--dry-run` instead runs
//! it through an in-memory ledger and checks the payload reads back.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Args;
use serde_json::{json, Value};
use xtrace_ledger::{
    fetch_payload, unsigned_nft_mint, LedgerClient, MemoryLedger, MintPayload, MintRequest,
};

use crate::config::CliConfig;

/// Arguments for `xtrace mint-tx`.
#[derive(Args, Debug)]
pub struct MintArgs {
    /// Classic address of the minting account.
    #[arg(long)]
    pub account: String,
    /// JSON file holding the public record.
    #[arg(long)]
    pub record: PathBuf,
    /// Private reference to seal.
    #[arg(long)]
    pub reference: String,
    /// NFTokenTaxon. Defaults to configuration.
    #[arg(long)]
    pub taxon: Option<u32>,
    /// Token URI (plain text; hex-encoded in the transaction).
    #[arg(long)]
    pub uri: Option<String>,
    /// Transfer fee in units of 1/100,000.
    #[arg(long)]
    pub transfer_fee: Option<u16>,
    /// Laboratory public key (hex). Defaults to configuration.
    #[arg(long)]
    pub pubkey: Option<String>,
    /// Submit to an in-memory ledger and print `{hash, transaction}`.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run_mint(args: &MintArgs, config: &CliConfig) -> Result<u8> {
    let tx = build_mint(args, config)?;
    if args.dry_run {
        crate::print_json(&dry_run(tx)?)?;
    } else {
        crate::print_json(&tx)?;
    }
    Ok(0)
}

pub(crate) fn build_mint(args: &MintArgs, config: &CliConfig) -> Result<Value> {
    let sealed = crate::seal::seal_record(
        &args.record,
        &args.reference,
        args.pubkey.as_deref(),
        config,
    )?;

    let mut request = MintRequest::new(&args.account, args.taxon.unwrap_or(config.default_taxon));
    if let Some(uri) = &args.uri {
        request = request.with_uri(uri);
    }
    if let Some(fee) = args.transfer_fee {
        request = request.with_transfer_fee(fee);
    }

    unsigned_nft_mint(&request, &MintPayload::from(sealed)).context("failed to assemble NFTokenMint")
}

fn dry_run(tx: Value) -> Result<Value> {
    let expected = MintPayload::from_transaction(&tx).context("mint carries no payload")?;

    let mut ledger = MemoryLedger::new();
    let hash = ledger.submit(tx.clone()).context("dry-run submission failed")?;
    let fetched = fetch_payload(&ledger, &hash).context("dry-run lookup failed")?;
    ensure!(
        fetched.as_ref() == Some(&expected),
        "dry-run payload did not read back intact"
    );

    Ok(json!({ "hash": hash.as_str(), "transaction": tx }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtrace_crypto::LabKeyPair;
    use xtrace_nft::decode;

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn args(dir: &std::path::Path, pubkey: String) -> MintArgs {
        let record = dir.join("lot.json");
        std::fs::write(&record, r#"{"p": "Pommes Bio", "n": "LOT-12345"}"#).unwrap();
        MintArgs {
            account: ACCOUNT.to_string(),
            record,
            reference: "ipfs://examplehash".to_string(),
            taxon: None,
            uri: None,
            transfer_fee: None,
            pubkey: Some(pubkey),
            dry_run: false,
        }
    }

    #[test]
    fn mint_carries_decodable_document() {
        let dir = tempfile::tempdir().unwrap();
        let lab = LabKeyPair::generate();
        let config = CliConfig {
            default_taxon: 11,
            ..CliConfig::default()
        };

        let tx = build_mint(&args(dir.path(), lab.public_key().to_hex()), &config).unwrap();
        assert_eq!(tx["TransactionType"], "NFTokenMint");
        assert_eq!(tx["NFTokenTaxon"], 11);

        let payload = MintPayload::from_transaction(&tx).unwrap();
        assert!(payload.seal.is_some());
        let decoded = decode(&payload.document, None).unwrap();
        assert_eq!(decoded.public_record.get_str("n"), Some("LOT-12345"));
    }

    #[test]
    fn explicit_taxon_and_uri() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path(), LabKeyPair::generate().public_key().to_hex());
        a.taxon = Some(3);
        a.uri = Some("ipfs://lot".to_string());

        let tx = build_mint(&a, &CliConfig::default()).unwrap();
        assert_eq!(tx["NFTokenTaxon"], 3);
        assert_eq!(tx["URI"], "697066733A2F2F6C6F74");
    }

    #[test]
    fn invalid_account_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path(), LabKeyPair::generate().public_key().to_hex());
        a.account = "not-an-address".to_string();
        assert!(build_mint(&a, &CliConfig::default()).is_err());
    }

    #[test]
    fn dry_run_reports_hash() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path(), LabKeyPair::generate().public_key().to_hex());
        let tx = build_mint(&a, &CliConfig::default()).unwrap();

        let report = dry_run(tx.clone()).unwrap();
        assert_eq!(report["hash"].as_str().unwrap().len(), 64);
        assert_eq!(report["transaction"], tx);
    }
}
