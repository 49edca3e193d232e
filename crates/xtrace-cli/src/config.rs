//! CLI configuration.
//!
//! Loaded from an optional YAML file, then overridden by environment
//! variables:
//!
//! - `XTRACE_LAB_PUBKEY`: Laboratory public key (hex) used when sealing.
//! - `XTRACE_LAB_KEY_FILE`: file holding the Laboratory private key.
//! - `XTRACE_DEFAULT_TAXON`: NFTokenTaxon used when `--taxon` is absent.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const ENV_LAB_PUBKEY: &str = "XTRACE_LAB_PUBKEY";
pub const ENV_LAB_KEY_FILE: &str = "XTRACE_LAB_KEY_FILE";
pub const ENV_DEFAULT_TAXON: &str = "XTRACE_DEFAULT_TAXON";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Hex-encoded SEC1 public key of the Laboratory.
    pub lab_public_key: Option<String>,
    /// Path to the Laboratory private key file.
    pub lab_key_file: Option<PathBuf>,
    pub default_taxon: u32,
}

impl CliConfig {
    /// Load from `path` (if given) and apply environment overrides.
    ///
    /// A path that was given but does not exist is an error. With no path
    /// the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|var| std::env::var(var).ok())
    }

    /// Parse a YAML configuration file. An empty file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value. Blank values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(pubkey) = get(ENV_LAB_PUBKEY) {
            self.lab_public_key = Some(pubkey.trim().to_string());
        }
        if let Some(key_file) = get(ENV_LAB_KEY_FILE) {
            self.lab_key_file = Some(PathBuf::from(key_file.trim()));
        }
        if let Some(taxon) = get(ENV_DEFAULT_TAXON) {
            self.default_taxon = taxon
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_DEFAULT_TAXON.to_string(), taxon))?;
        }
        Ok(self)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
}
