//! # xtrace CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! the subcommand handlers in `xtrace_cli`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xtrace_cli::config::CliConfig;
use xtrace_cli::keygen::{run_keygen, KeygenArgs};
use xtrace_cli::mint::{run_mint, MintArgs};
use xtrace_cli::open::{run_open, OpenArgs};
use xtrace_cli::seal::{run_seal, SealArgs};

/// Seal agricultural lot documents for XRPL NFTs.
///
/// A sealed document exposes its public record to everyone and its private
/// reference only to the holder of the Laboratory key.
#[derive(Parser, Debug)]
#[command(name = "xtrace", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a Laboratory secp256k1 key pair.
    Keygen(KeygenArgs),

    /// Seal a public record and private reference.
    Seal(SealArgs),

    /// Decode a document, recovering the private reference when possible.
    Open(OpenArgs),

    /// Seal a lot and print an unsigned NFTokenMint.
    #[command(name = "mint-tx")]
    MintTx(MintArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("xtrace CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Seal(args) => run_seal(&args, &config),
        Commands::Open(args) => run_open(&args, &config),
        Commands::MintTx(args) => run_mint(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
