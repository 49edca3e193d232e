//! # Document Decoder
//!
//! Reads a sealed document back. The public record is always returned; the
//! private reference only when opening material is supplied and the seal
//! opens under it.
//!
//! A broken document (not hex, not a JSON object) is a [`DecodingError`].
//! A document that decodes but whose private half cannot be recovered is
//! not an error: the result carries [`DecryptionOutcome::Failed`] so a
//! viewer without Laboratory privileges still sees every public field.

use serde::Serialize;
use serde_json::Value;
use zeroize::Zeroizing;

use xtrace_core::encoding::decode_hex;
use xtrace_core::{PublicRecord, RecordError, RESERVED_SECRET_FIELD};
use xtrace_crypto::{
    envelope_open_with, sym_decrypt, CryptoError, RecipientSecretKey, SymmetricKey,
};

use crate::error::{DecodingError, DecryptionFailure};

/// The seal and the private key that opens it. Supplied together or not
/// at all.
#[derive(Clone, Copy)]
pub struct OpeningMaterial<'a> {
    /// Hex-encoded envelope produced by the encoder.
    pub seal: &'a str,
    /// Hex-encoded secp256k1 private key, canonical 64-character form or
    /// the XRPL 66-character form with a `00` prefix.
    pub private_key: &'a str,
}

impl<'a> OpeningMaterial<'a> {
    pub fn new(seal: &'a str, private_key: &'a str) -> Self {
        Self { seal, private_key }
    }
}

impl std::fmt::Debug for OpeningMaterial<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpeningMaterial")
            .field("seal_len", &self.seal.len())
            .field("private_key", &"<private>")
            .finish()
    }
}

/// What happened to the private half of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DecryptionOutcome {
    /// No opening material was supplied.
    NotRequested,
    /// Opening material was supplied but the document has no `i_secret`.
    NoSecretField,
    /// The private reference was recovered.
    Succeeded,
    /// Recovery was attempted and failed.
    Failed(DecryptionFailure),
}

/// Result of [`decode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedDocument {
    /// Every field of the document, `i_secret` included.
    pub public_record: PublicRecord,
    /// The private reference, when recovered.
    pub private_reference: Option<String>,
    pub decryption: DecryptionOutcome,
}

impl DecodedDocument {
    /// True when an opening was actually tried (material present and the
    /// document carries a ciphertext).
    pub fn decryption_attempted(&self) -> bool {
        matches!(
            self.decryption,
            DecryptionOutcome::Succeeded | DecryptionOutcome::Failed(_)
        )
    }

    pub fn decryption_succeeded(&self) -> bool {
        matches!(self.decryption, DecryptionOutcome::Succeeded)
    }

    /// The public record without the reserved ciphertext field.
    pub fn public_fields(&self) -> PublicRecord {
        let mut record = self.public_record.clone();
        record.remove(RESERVED_SECRET_FIELD);
        record
    }
}

/// Decode a document and, given opening material, recover its private
/// reference.
///
/// # Errors
///
/// Only structural problems with `document` are errors:
/// `DecodingError::InvalidHex`, `DecodingError::InvalidJson`,
/// `DecodingError::NotAnObject`.
pub fn decode(
    document: &str,
    opening: Option<OpeningMaterial<'_>>,
) -> Result<DecodedDocument, DecodingError> {
    let public_record = parse_document(document)?;
    let Some(material) = opening else {
        tracing::debug!("no opening material; returning public fields");
        return Ok(DecodedDocument {
            public_record,
            private_reference: None,
            decryption: DecryptionOutcome::NotRequested,
        });
    };
    Ok(open_document(public_record, |ciphertext| {
        open_private_reference(ciphertext, &material)
    }))
}

/// Decode the public fields only.
pub fn decode_public(document: &str) -> Result<DecodedDocument, DecodingError> {
    decode(document, None)
}

/// Decode with raw seal bytes and an already parsed Laboratory key.
///
/// The counterpart of [`encode_with_key`](crate::encode::encode_with_key):
/// no hex parsing or key normalization happens on the opening side.
///
/// # Errors
///
/// As [`decode`]: only structural problems with `document`.
pub fn decode_with_key(
    document: &str,
    seal: &[u8],
    private_key: &RecipientSecretKey,
) -> Result<DecodedDocument, DecodingError> {
    let public_record = parse_document(document)?;
    Ok(open_document(public_record, |ciphertext| {
        open_sealed_reference(ciphertext, seal, private_key)
    }))
}

fn parse_document(document: &str) -> Result<PublicRecord, DecodingError> {
    let bytes = decode_hex(document)?;
    let value: Value = serde_json::from_slice(&bytes)?;
    PublicRecord::from_value(value).map_err(|e| match e {
        RecordError::NotAnObject(kind) => DecodingError::NotAnObject(kind),
        RecordError::Unserializable(err) => DecodingError::InvalidJson(err),
    })
}

/// Run `open` over the `i_secret` ciphertext, folding any failure into
/// the outcome.
fn open_document(
    public_record: PublicRecord,
    open: impl FnOnce(&str) -> Result<String, DecryptionFailure>,
) -> DecodedDocument {
    let attempt = match public_record.get(RESERVED_SECRET_FIELD) {
        None => None,
        Some(secret) => Some(
            secret
                .as_str()
                .ok_or(DecryptionFailure::SecretFieldNotString)
                .and_then(open),
        ),
    };

    let (private_reference, decryption) = match attempt {
        None => {
            tracing::debug!("document carries no `{RESERVED_SECRET_FIELD}` field");
            (None, DecryptionOutcome::NoSecretField)
        }
        Some(Ok(reference)) => (Some(reference), DecryptionOutcome::Succeeded),
        Some(Err(failure)) => {
            tracing::warn!(
                reason = %failure,
                "private reference not recovered; returning public fields only"
            );
            (None, DecryptionOutcome::Failed(failure))
        }
    };

    DecodedDocument {
        public_record,
        private_reference,
        decryption,
    }
}

fn open_private_reference(
    ciphertext: &str,
    material: &OpeningMaterial<'_>,
) -> Result<String, DecryptionFailure> {
    let private_key = RecipientSecretKey::from_hex(material.private_key)
        .map_err(|e| DecryptionFailure::InvalidKeyFormat(e.to_string()))?;

    let sealed =
        decode_hex(material.seal).map_err(|e| DecryptionFailure::SealMalformed(e.to_string()))?;

    open_sealed_reference(ciphertext, &sealed, &private_key)
}

fn open_sealed_reference(
    ciphertext: &str,
    sealed: &[u8],
    private_key: &RecipientSecretKey,
) -> Result<String, DecryptionFailure> {
    let key_bytes = Zeroizing::new(
        envelope_open_with(sealed, private_key)
            .map_err(|e| DecryptionFailure::SealRejected(e.to_string()))?,
    );

    let key =
        SymmetricKey::from_bytes(&key_bytes).map_err(|e| DecryptionFailure::KeyLength(e.to_string()))?;

    sym_decrypt(ciphertext, &key).map_err(|e| match e {
        CryptoError::MalformedCiphertext(msg) => DecryptionFailure::CiphertextMalformed(msg),
        other => DecryptionFailure::CiphertextRejected(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_with_key;
    use xtrace_core::encoding::encode_hex;
    use xtrace_crypto::{envelope_seal, LabKeyPair};

    fn lot() -> PublicRecord {
        PublicRecord::new()
            .with("p", "Pommes Bio")
            .with("w", "1500kg")
            .with("n", "LOT-12345")
    }

    #[test]
    fn scenario_with_and_without_seal() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://examplehash", lab.public_key()).unwrap();
        let sk = lab.secret_key().to_hex();

        let opened = decode(&sealed.document, Some(OpeningMaterial::new(&sealed.seal, &sk))).unwrap();
        assert_eq!(opened.private_reference.as_deref(), Some("ipfs://examplehash"));
        assert_eq!(opened.public_record.get_str("p"), Some("Pommes Bio"));
        assert!(opened.decryption_attempted());
        assert!(opened.decryption_succeeded());

        let public = decode_public(&sealed.document).unwrap();
        assert_eq!(public.public_record.get_str("p"), Some("Pommes Bio"));
        assert_eq!(public.private_reference, None);
        assert_eq!(public.decryption, DecryptionOutcome::NotRequested);
        assert!(!public.decryption_attempted());
    }

    #[test]
    fn public_record_keeps_secret_field_and_public_fields_strip_it() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let decoded = decode_public(&sealed.document).unwrap();
        assert!(decoded.public_record.has_secret_field());
        assert_eq!(decoded.public_fields(), lot());
    }

    #[test]
    fn xrpl_prefixed_key_opens_identically() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://examplehash", lab.public_key()).unwrap();
        let prefixed = lab.secret_key().to_xrpl_hex();
        let decoded =
            decode(&sealed.document, Some(OpeningMaterial::new(&sealed.seal, &prefixed))).unwrap();
        assert_eq!(decoded.private_reference.as_deref(), Some("ipfs://examplehash"));
    }

    #[test]
    fn wrong_key_degrades_to_public_view() {
        let lab = LabKeyPair::generate();
        let intruder = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let sk = intruder.secret_key().to_hex();

        let decoded = decode(&sealed.document, Some(OpeningMaterial::new(&sealed.seal, &sk))).unwrap();
        assert_eq!(decoded.private_reference, None);
        assert_eq!(decoded.public_record.get_str("n"), Some("LOT-12345"));
        assert!(decoded.decryption_attempted());
        assert!(!decoded.decryption_succeeded());
        assert!(matches!(
            decoded.decryption,
            DecryptionOutcome::Failed(DecryptionFailure::SealRejected(_))
        ));
    }

    #[test]
    fn malformed_private_key_is_reported_not_raised() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        for bad in ["abcd", "not hex at all", "01"] {
            let decoded = decode(&sealed.document, Some(OpeningMaterial::new(&sealed.seal, bad))).unwrap();
            assert!(
                matches!(
                    decoded.decryption,
                    DecryptionOutcome::Failed(DecryptionFailure::InvalidKeyFormat(_))
                ),
                "{bad:?} -> {:?}",
                decoded.decryption
            );
        }
    }

    #[test]
    fn malformed_seal_is_reported_not_raised() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let sk = lab.secret_key().to_hex();
        let decoded = decode(&sealed.document, Some(OpeningMaterial::new("xyz", &sk))).unwrap();
        assert!(matches!(
            decoded.decryption,
            DecryptionOutcome::Failed(DecryptionFailure::SealMalformed(_))
        ));
    }

    #[test]
    fn seal_carrying_wrong_length_key() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let short_seal = encode_hex(envelope_seal(&[1u8; 16], lab.public_key()).unwrap());
        let sk = lab.secret_key().to_hex();
        let decoded = decode(&sealed.document, Some(OpeningMaterial::new(&short_seal, &sk))).unwrap();
        assert!(matches!(
            decoded.decryption,
            DecryptionOutcome::Failed(DecryptionFailure::KeyLength(_))
        ));
    }

    #[test]
    fn seal_from_another_document_is_rejected() {
        let lab = LabKeyPair::generate();
        let first = encode_with_key(&lot(), "ipfs://first", lab.public_key()).unwrap();
        let second = encode_with_key(&lot(), "ipfs://second", lab.public_key()).unwrap();
        let sk = lab.secret_key().to_hex();
        let decoded = decode(&first.document, Some(OpeningMaterial::new(&second.seal, &sk))).unwrap();
        assert_eq!(decoded.private_reference, None);
        assert!(matches!(
            decoded.decryption,
            DecryptionOutcome::Failed(DecryptionFailure::CiphertextRejected(_))
        ));
    }

    #[test]
    fn document_without_secret_field() {
        let document = encode_hex(lot().canonical_bytes().unwrap());
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let sk = lab.secret_key().to_hex();
        let decoded = decode(&document, Some(OpeningMaterial::new(&sealed.seal, &sk))).unwrap();
        assert_eq!(decoded.decryption, DecryptionOutcome::NoSecretField);
        assert!(!decoded.decryption_attempted());
        assert_eq!(decoded.public_record, lot());
    }

    #[test]
    fn non_string_secret_field() {
        let record = lot().with(RESERVED_SECRET_FIELD, 42);
        let document = encode_hex(record.canonical_bytes().unwrap());
        let lab = LabKeyPair::generate();
        let sk = lab.secret_key().to_hex();
        let decoded = decode(&document, Some(OpeningMaterial::new("00", &sk))).unwrap();
        assert_eq!(
            decoded.decryption,
            DecryptionOutcome::Failed(DecryptionFailure::SecretFieldNotString)
        );
    }

    #[test]
    fn uppercase_document_hex_accepted() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let upper = sealed.document.to_uppercase();
        assert_eq!(decode_public(&upper).unwrap().public_record.get_str("w"), Some("1500kg"));
    }

    #[test]
    fn structural_errors_are_raised() {
        assert!(matches!(decode_public("not hex"), Err(DecodingError::InvalidHex(_))));
        assert!(matches!(decode_public(""), Err(DecodingError::InvalidHex(_))));
        assert!(matches!(
            decode_public(&encode_hex(b"{not json")),
            Err(DecodingError::InvalidJson(_))
        ));
        assert!(matches!(
            decode_public(&encode_hex(b"[1,2,3]")),
            Err(DecodingError::NotAnObject("an array"))
        ));
        assert!(matches!(
            decode_public(&encode_hex([0xff, 0xfe, 0xfd])),
            Err(DecodingError::InvalidJson(_))
        ));
    }

    #[test]
    fn structural_errors_win_over_opening_material() {
        let lab = LabKeyPair::generate();
        let sk = lab.secret_key().to_hex();
        let result = decode("zz", Some(OpeningMaterial::new("00", &sk)));
        assert!(matches!(result, Err(DecodingError::InvalidHex(_))));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let failed = DecryptionOutcome::Failed(DecryptionFailure::SealRejected("x".into()));
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"]["kind"], "seal_rejected");
        let ok = serde_json::to_value(DecryptionOutcome::Succeeded).unwrap();
        assert_eq!(ok["status"], "succeeded");
    }

    #[test]
    fn raw_seal_and_parsed_key_open() {
        let lab = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://examplehash", lab.public_key()).unwrap();
        let seal = decode_hex(&sealed.seal).unwrap();

        let decoded = decode_with_key(&sealed.document, &seal, lab.secret_key()).unwrap();
        assert_eq!(decoded.private_reference.as_deref(), Some("ipfs://examplehash"));
        assert_eq!(decoded.public_fields(), lot());
    }

    #[test]
    fn raw_path_matches_hex_path_on_failure() {
        let lab = LabKeyPair::generate();
        let intruder = LabKeyPair::generate();
        let sealed = encode_with_key(&lot(), "ipfs://x", lab.public_key()).unwrap();
        let seal = decode_hex(&sealed.seal).unwrap();

        let raw = decode_with_key(&sealed.document, &seal, intruder.secret_key()).unwrap();
        let sk = intruder.secret_key().to_hex();
        let hex = decode(&sealed.document, Some(OpeningMaterial::new(&sealed.seal, &sk))).unwrap();
        assert_eq!(raw, hex);
        assert!(matches!(
            raw.decryption,
            DecryptionOutcome::Failed(DecryptionFailure::SealRejected(_))
        ));

        let truncated = decode_with_key(&sealed.document, &seal[..10], lab.secret_key()).unwrap();
        assert!(truncated.private_reference.is_none());
    }

    #[test]
    fn raw_path_without_secret_field() {
        let document = encode_hex(lot().canonical_bytes().unwrap());
        let lab = LabKeyPair::generate();
        let decoded = decode_with_key(&document, &[], lab.secret_key()).unwrap();
        assert_eq!(decoded.decryption, DecryptionOutcome::NoSecretField);
    }

    #[test]
    fn opening_material_debug_is_redacted() {
        let material = OpeningMaterial::new("abcd", "deadbeef");
        let debug = format!("{material:?}");
        assert!(!debug.contains("deadbeef"));
    }
}
