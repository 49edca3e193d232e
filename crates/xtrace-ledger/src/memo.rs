//! # Memo Encoding
//!
//! A mint transaction carries the sealed lot in two XRPL memos:
//!
//! | `MemoType` (hex of) | `MemoData` |
//! |---------------------|------------|
//! | `document`          | the document bytes |
//! | `proof`             | the seal (envelope bytes) |
//!
//! The codec already emits both as hex, so `MemoData` is the same bytes in
//! XRPL's uppercase rendering; reading back lowercases them.

use serde::{Deserialize, Serialize};
use xtrace_core::encoding::{decode_hex, encode_hex_upper};
use xtrace_nft::SealedNft;

use crate::error::LedgerError;

/// Memo type carrying the document.
pub const MEMO_TYPE_DOCUMENT: &str = "document";

/// Memo type carrying the seal.
pub const MEMO_TYPE_PROOF: &str = "proof";

/// One XRPL memo, field names as they appear in transaction JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Memo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

/// The `{"Memo": {...}}` wrapper XRPL puts around each memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEntry {
    #[serde(rename = "Memo")]
    pub memo: Memo,
}

impl Memo {
    /// A memo whose type is the hex of `memo_type` and whose data is
    /// already-hex `data_hex`.
    pub fn new(memo_type: &str, data_hex: &str) -> Self {
        Self {
            memo_type: Some(encode_hex_upper(memo_type.as_bytes())),
            memo_data: Some(data_hex.trim().to_uppercase()),
            memo_format: None,
        }
    }

    /// Decoded `MemoType`, if present and valid UTF-8 hex.
    pub fn type_name(&self) -> Option<String> {
        let raw = decode_hex(self.memo_type.as_deref()?).ok()?;
        String::from_utf8(raw).ok()
    }
}

/// What a minting transaction carries: the document, and the seal when the
/// seller chose to publish it alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintPayload {
    pub document: String,
    pub seal: Option<String>,
}

impl From<SealedNft> for MintPayload {
    fn from(sealed: SealedNft) -> Self {
        Self {
            document: sealed.document,
            seal: Some(sealed.seal),
        }
    }
}

impl MintPayload {
    /// A payload carrying only the public document.
    pub fn document_only(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            seal: None,
        }
    }

    /// Render as XRPL memos.
    pub fn to_memos(&self) -> Vec<MemoEntry> {
        let mut memos = vec![MemoEntry {
            memo: Memo::new(MEMO_TYPE_DOCUMENT, &self.document),
        }];
        if let Some(seal) = &self.seal {
            memos.push(MemoEntry {
                memo: Memo::new(MEMO_TYPE_PROOF, seal),
            });
        }
        memos
    }

    /// Recover a payload from memos. Unknown memo types are ignored; the
    /// first memo of each known type wins.
    ///
    /// # Errors
    ///
    /// `LedgerError::MissingDocument` if no document memo is present,
    /// `LedgerError::InvalidMemo` if a known memo has no valid hex data.
    pub fn from_memos(memos: &[MemoEntry]) -> Result<Self, LedgerError> {
        let mut document = None;
        let mut seal = None;
        for entry in memos {
            let slot = match entry.memo.type_name().as_deref() {
                Some(MEMO_TYPE_DOCUMENT) => &mut document,
                Some(MEMO_TYPE_PROOF) => &mut seal,
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            *slot = Some(memo_data_hex(&entry.memo)?);
        }
        Ok(Self {
            document: document.ok_or(LedgerError::MissingDocument)?,
            seal,
        })
    }

    /// Recover a payload from a transaction's `Memos` array.
    pub fn from_transaction(tx: &serde_json::Value) -> Result<Self, LedgerError> {
        let memos = match tx.get("Memos") {
            Some(value) => serde_json::from_value::<Vec<MemoEntry>>(value.clone())
                .map_err(|e| LedgerError::InvalidMemo(e.to_string()))?,
            None => return Err(LedgerError::MissingDocument),
        };
        Self::from_memos(&memos)
    }
}

fn memo_data_hex(memo: &Memo) -> Result<String, LedgerError> {
    let data = memo
        .memo_data
        .as_deref()
        .ok_or_else(|| LedgerError::InvalidMemo("memo has no MemoData".to_string()))?;
    decode_hex(data).map_err(|e| LedgerError::InvalidMemo(e.to_string()))?;
    Ok(data.trim().to_lowercase())
}
