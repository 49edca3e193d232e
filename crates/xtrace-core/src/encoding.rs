//! # Hex Encoding
//!
//! Binary payloads travel through ledger fields and JSON as hex. Output is
//! lowercase for documents and seals, uppercase where XRPL expects it
//! (memo fields, URIs). Input is accepted in either case, with surrounding
//! whitespace ignored.

use crate::error::HexError;

/// Lowercase hex.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Uppercase hex.
pub fn encode_hex_upper(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hex string, tolerating whitespace and either case.
///
/// # Errors
///
/// `HexError::Empty` for blank input, `HexError::Invalid` for odd length
/// or non-hex characters.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HexError::Empty);
    }
    Ok(hex::decode(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_both_cases() {
        assert_eq!(decode_hex("deadBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_trims_whitespace() {
        assert_eq!(decode_hex("  00ff\n").unwrap(), vec![0x00, 0xff]);
    }

    #[test]
    fn decode_rejects_odd_length() {
        assert!(matches!(decode_hex("abc"), Err(HexError::Invalid(_))));
    }

    #[test]
    fn decode_rejects_non_hex() {
        assert!(matches!(decode_hex("zz"), Err(HexError::Invalid(_))));
    }

    #[test]
    fn decode_rejects_blank() {
        assert_eq!(decode_hex("   "), Err(HexError::Empty));
    }

    #[test]
    fn encode_cases() {
        assert_eq!(encode_hex([0xab, 0x01]), "ab01");
        assert_eq!(encode_hex_upper([0xab, 0x01]), "AB01");
    }
}
