//! # Unsigned NFTokenMint Assembly
//!
//! Builds the JSON of an `NFTokenMint` transaction carrying a sealed lot,
//! ready for a connected wallet to autofill, sign, and submit. Nothing here
//! signs or talks to the network.

use serde_json::{json, Value};
use xtrace_core::encoding::encode_hex_upper;

use crate::error::LedgerError;
use crate::memo::MintPayload;

/// `tfBurnable`: the issuer may burn the token.
pub const TF_BURNABLE: u32 = 0x0000_0001;

/// `tfOnlyXRP`: the token can only be traded for XRP.
pub const TF_ONLY_XRP: u32 = 0x0000_0002;

/// `tfTransferable`: the token may be transferred to third parties.
pub const TF_TRANSFERABLE: u32 = 0x0000_0008;

/// Largest NFTokenMint `URI`, in bytes.
pub const MAX_URI_BYTES: usize = 256;

/// Largest `TransferFee` (50.000%).
pub const MAX_TRANSFER_FEE: u16 = 50_000;

/// Parameters of a mint other than the sealed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Classic address of the minting Seller.
    pub account: String,
    pub taxon: u32,
    pub flags: u32,
    /// Plain-text URI; hex-encoded on output.
    pub uri: Option<String>,
    /// In units of 1/100,000 (so 50,000 is 50%).
    pub transfer_fee: Option<u16>,
}

impl MintRequest {
    /// A transferable mint for `account` under `taxon`.
    pub fn new(account: impl Into<String>, taxon: u32) -> Self {
        Self {
            account: account.into(),
            taxon,
            flags: TF_TRANSFERABLE,
            uri: None,
            transfer_fee: None,
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_transfer_fee(mut self, fee: u16) -> Self {
        self.transfer_fee = Some(fee);
        self
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    fn validate(&self) -> Result<(), LedgerError> {
        if !is_classic_address(&self.account) {
            return Err(LedgerError::InvalidAccount(self.account.clone()));
        }
        if let Some(uri) = &self.uri {
            if uri.len() > MAX_URI_BYTES {
                return Err(LedgerError::UriTooLong(uri.len()));
            }
        }
        if let Some(fee) = self.transfer_fee {
            if fee > MAX_TRANSFER_FEE {
                return Err(LedgerError::InvalidTransferFee(format!(
                    "{fee} exceeds maximum {MAX_TRANSFER_FEE}"
                )));
            }
            if fee > 0 && self.flags & TF_TRANSFERABLE == 0 {
                return Err(LedgerError::InvalidTransferFee(
                    "a non-zero transfer fee requires tfTransferable".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Assemble an unsigned `NFTokenMint` carrying `payload` in its memos.
///
/// `Fee`, `Sequence` and `LastLedgerSequence` are left for the wallet to
/// autofill.
pub fn unsigned_nft_mint(request: &MintRequest, payload: &MintPayload) -> Result<Value, LedgerError> {
    request.validate()?;

    let mut tx = json!({
        "TransactionType": "NFTokenMint",
        "Account": request.account,
        "NFTokenTaxon": request.taxon,
        "Flags": request.flags,
        "Memos": payload.to_memos(),
    });
    if let Some(uri) = &request.uri {
        tx["URI"] = Value::String(encode_hex_upper(uri.as_bytes()));
    }
    if let Some(fee) = request.transfer_fee {
        tx["TransferFee"] = json!(fee);
    }

    tracing::debug!(
        account = %request.account,
        taxon = request.taxon,
        sealed = payload.seal.is_some(),
        "assembled unsigned NFTokenMint"
    );
    Ok(tx)
}

/// Shape check for a classic address: `r` followed by base58 (XRPL
/// alphabet), 25 to 35 characters. The checksum is not verified.
pub fn is_classic_address(address: &str) -> bool {
    const ALPHABET: &str = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";
    (25..=35).contains(&address.len())
        && address.starts_with('r')
        && address.chars().all(|c| ALPHABET.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn payload() -> MintPayload {
        MintPayload {
            document: "7b7d".to_string(),
            seal: Some("04ff".to_string()),
        }
    }

    #[test]
    fn mint_shape() {
        let tx = unsigned_nft_mint(&MintRequest::new(ACCOUNT, 7), &payload()).unwrap();
        assert_eq!(tx["TransactionType"], "NFTokenMint");
        assert_eq!(tx["Account"], ACCOUNT);
        assert_eq!(tx["NFTokenTaxon"], 7);
        assert_eq!(tx["Flags"], TF_TRANSFERABLE);
        assert_eq!(tx["Memos"].as_array().unwrap().len(), 2);
        assert!(tx.get("URI").is_none());
        assert!(tx.get("Fee").is_none());
    }

    #[test]
    fn payload_recoverable_from_mint() {
        let tx = unsigned_nft_mint(&MintRequest::new(ACCOUNT, 0), &payload()).unwrap();
        assert_eq!(MintPayload::from_transaction(&tx).unwrap(), payload());
    }

    #[test]
    fn uri_hex_encoded() {
        let request = MintRequest::new(ACCOUNT, 0).with_uri("ipfs://lot");
        let tx = unsigned_nft_mint(&request, &payload()).unwrap();
        assert_eq!(tx["URI"], "697066733A2F2F6C6F74");
    }

    #[test]
    fn uri_length_capped() {
        let request = MintRequest::new(ACCOUNT, 0).with_uri("x".repeat(MAX_URI_BYTES + 1));
        assert!(matches!(
            unsigned_nft_mint(&request, &payload()),
            Err(LedgerError::UriTooLong(257))
        ));
    }

    #[test]
    fn transfer_fee_rules() {
        let ok = MintRequest::new(ACCOUNT, 0).with_transfer_fee(2_500);
        let tx = unsigned_nft_mint(&ok, &payload()).unwrap();
        assert_eq!(tx["TransferFee"], 2_500);

        let too_high = MintRequest::new(ACCOUNT, 0).with_transfer_fee(MAX_TRANSFER_FEE + 1);
        assert!(unsigned_nft_mint(&too_high, &payload()).is_err());

        let not_transferable = MintRequest::new(ACCOUNT, 0)
            .with_flags(TF_BURNABLE)
            .with_transfer_fee(100);
        assert!(matches!(
            unsigned_nft_mint(&not_transferable, &payload()),
            Err(LedgerError::InvalidTransferFee(_))
        ));
    }

    #[test]
    fn account_shape_checked() {
        for bad in ["", "xHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "rShort", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyT0"] {
            assert!(
                matches!(
                    unsigned_nft_mint(&MintRequest::new(bad, 0), &payload()),
                    Err(LedgerError::InvalidAccount(_))
                ),
                "{bad:?}"
            );
        }
    }
}
