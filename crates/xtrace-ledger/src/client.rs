//! # Ledger Client
//!
//! The seam between the codec and a ledger. Production wallets and RPC
//! clients implement [`LedgerClient`]; [`MemoryLedger`] is the in-process
//! implementation used by the CLI's dry runs and by tests.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use xtrace_core::{sha256_digest, CanonicalBytes};

use crate::error::LedgerError;
use crate::memo::MintPayload;
use crate::tx::{unsigned_nft_mint, MintRequest};

/// A 256-bit transaction hash, held as 64 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxHash(String);

impl TxHash {
    /// Parse a hash from hex, in either case.
    pub fn parse(hex: &str) -> Result<Self, LedgerError> {
        let hex = hex.trim();
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LedgerError::InvalidHash(hex.to_string()));
        }
        Ok(Self(hex.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submit transactions and look them up by hash.
pub trait LedgerClient {
    /// Submit a transaction; returns its hash.
    fn submit(&mut self, tx: Value) -> Result<TxHash, LedgerError>;

    /// A previously submitted transaction, or `None` if unknown.
    fn transaction(&self, hash: &TxHash) -> Result<Option<Value>, LedgerError>;
}

/// In-memory ledger.
///
/// Transactions are hashed with SHA-256 over their canonical JSON. This is
/// not XRPL's signing hash; it only gives stable, content-derived ids.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    transactions: BTreeMap<TxHash, Value>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl LedgerClient for MemoryLedger {
    fn submit(&mut self, tx: Value) -> Result<TxHash, LedgerError> {
        let kind = tx
            .get("TransactionType")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                LedgerError::MalformedTransaction("missing TransactionType".to_string())
            })?
            .to_string();

        let canonical = CanonicalBytes::new(&tx)?;
        let hash = TxHash(sha256_digest(&canonical).to_hex_upper());

        tracing::info!(hash = %hash, kind = %kind, "transaction accepted");
        self.transactions.insert(hash.clone(), tx);
        Ok(hash)
    }

    fn transaction(&self, hash: &TxHash) -> Result<Option<Value>, LedgerError> {
        Ok(self.transactions.get(hash).cloned())
    }
}

/// Look up a transaction and recover the sealed payload from its memos.
///
/// `Ok(None)` if the ledger does not know the hash.
pub fn fetch_payload<C: LedgerClient + ?Sized>(
    client: &C,
    hash: &TxHash,
) -> Result<Option<MintPayload>, LedgerError> {
    match client.transaction(hash)? {
        Some(tx) => MintPayload::from_transaction(&tx).map(Some),
        None => Ok(None),
    }
}

/// Assemble and submit a mint in one step.
pub fn mint<C: LedgerClient + ?Sized>(
    client: &mut C,
    request: &MintRequest,
    payload: &MintPayload,
) -> Result<TxHash, LedgerError> {
    let tx = unsigned_nft_mint(request, payload)?;
    client.submit(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn hash_parse_normalizes_case() {
        let lower = "ab".repeat(32);
        let hash = TxHash::parse(&lower).unwrap();
        assert_eq!(hash.as_str(), "AB".repeat(32));
        assert_eq!(hash, TxHash::parse(&"AB".repeat(32)).unwrap());
    }

    #[test]
    fn hash_parse_rejects_bad_input() {
        assert!(TxHash::parse("").is_err());
        assert!(TxHash::parse(&"a".repeat(63)).is_err());
        assert!(TxHash::parse(&"g".repeat(64)).is_err());
    }

    #[test]
    fn submit_then_lookup() {
        let mut ledger = MemoryLedger::new();
        let tx = json!({"TransactionType": "NFTokenMint", "Account": ACCOUNT});
        let hash = ledger.submit(tx.clone()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transaction(&hash).unwrap(), Some(tx));
    }

    #[test]
    fn hash_is_content_derived() {
        let mut a = MemoryLedger::new();
        let mut b = MemoryLedger::new();
        let tx = json!({"TransactionType": "NFTokenMint", "NFTokenTaxon": 1});
        let reordered = json!({"NFTokenTaxon": 1, "TransactionType": "NFTokenMint"});
        assert_eq!(a.submit(tx).unwrap(), b.submit(reordered).unwrap());
    }

    #[test]
    fn submit_requires_transaction_type() {
        let mut ledger = MemoryLedger::new();
        assert!(matches!(
            ledger.submit(json!({"Account": ACCOUNT})),
            Err(LedgerError::MalformedTransaction(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn unknown_hash_yields_none() {
        let ledger = MemoryLedger::new();
        let hash = TxHash::parse(&"0".repeat(64)).unwrap();
        assert_eq!(fetch_payload(&ledger, &hash).unwrap(), None);
    }

    #[test]
    fn mint_and_fetch() {
        let mut ledger = MemoryLedger::new();
        let payload = MintPayload {
            document: "7b7d".to_string(),
            seal: Some("04aa".to_string()),
        };
        let hash = mint(&mut ledger, &MintRequest::new(ACCOUNT, 3), &payload).unwrap();
        assert_eq!(fetch_payload(&ledger, &hash).unwrap(), Some(payload));
    }

    #[test]
    fn fetch_of_memo_less_transaction_fails() {
        let mut ledger = MemoryLedger::new();
        let hash = ledger
            .submit(json!({"TransactionType": "Payment"}))
            .unwrap();
        assert!(matches!(
            fetch_payload(&ledger, &hash),
            Err(LedgerError::MissingDocument)
        ));
    }
}
