//! # xtrace-ledger: XRPL Boundary
//!
//! Carries a sealed lot onto the ledger and back:
//!
//! - [`memo`]: the `document` / `proof` memo pair.
//! - [`tx`]: unsigned `NFTokenMint` assembly for a wallet to sign.
//! - [`client`]: the [`LedgerClient`] trait, an in-memory ledger, and
//!   payload retrieval by transaction hash.
//!
//! Signing, fee autofill and network transport belong to the wallet.

pub mod client;
pub mod error;
pub mod memo;
pub mod tx;

pub use client::{fetch_payload, mint, LedgerClient, MemoryLedger, TxHash};
pub use error::LedgerError;
pub use memo::{Memo, MemoEntry, MintPayload, MEMO_TYPE_DOCUMENT, MEMO_TYPE_PROOF};
pub use tx::{
    is_classic_address, unsigned_nft_mint, MintRequest, MAX_TRANSFER_FEE, MAX_URI_BYTES,
    TF_BURNABLE, TF_ONLY_XRP, TF_TRANSFERABLE,
};
