//! Errors at the ledger boundary.

use thiserror::Error;
use xtrace_core::CanonicalizationError;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Not a classic XRPL address.
    #[error("invalid XRPL account address: {0}")]
    InvalidAccount(String),

    /// NFTokenMint URIs are capped at 256 bytes.
    #[error("URI is {0} bytes; NFTokenMint allows at most 256")]
    UriTooLong(usize),

    #[error("invalid transfer fee: {0}")]
    InvalidTransferFee(String),

    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    /// The transaction carries no document memo.
    #[error("transaction has no document memo")]
    MissingDocument,

    #[error("invalid memo: {0}")]
    InvalidMemo(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
