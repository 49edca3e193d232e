//! # Document Encoder
//!
//! Turns a public record and a private reference into the two hex blobs a
//! minting flow embeds in a ledger transaction:
//!
//! - `document`: hex of the canonical JSON of the record plus
//!   [`RESERVED_SECRET_FIELD`] holding the AES-GCM ciphertext of the
//!   private reference;
//! - `seal`: hex of the ECIES envelope wrapping the one-time AES key for
//!   the Laboratory.
//!
//! Every input check runs before any key is generated, and an error never
//! comes with a partial document or seal.

use serde::{Deserialize, Serialize};
use xtrace_core::encoding::encode_hex;
use xtrace_core::{PublicRecord, RESERVED_SECRET_FIELD};
use xtrace_crypto::{envelope_seal, sym_encrypt, RecipientPublicKey, SymmetricKey};

use crate::error::EncodingError;

/// Output of [`encode`]: the public document and the Laboratory's seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedNft {
    /// Lowercase hex of the canonical JSON document.
    pub document: String,
    /// Lowercase hex of the ECIES envelope over the symmetric key.
    pub seal: String,
}

/// Encode with a hex-encoded recipient public key (compressed or
/// uncompressed SEC1, either case).
pub fn encode(
    record: &PublicRecord,
    private_reference: &str,
    recipient_public_key: &str,
) -> Result<SealedNft, EncodingError> {
    let recipient =
        RecipientPublicKey::from_hex(recipient_public_key).map_err(EncodingError::InvalidPublicKey)?;
    encode_with_key(record, private_reference, &recipient)
}

/// Encode with a raw SEC1 recipient public key.
pub fn encode_with_key_bytes(
    record: &PublicRecord,
    private_reference: &str,
    recipient_public_key: &[u8],
) -> Result<SealedNft, EncodingError> {
    let recipient = RecipientPublicKey::from_sec1_bytes(recipient_public_key)
        .map_err(EncodingError::InvalidPublicKey)?;
    encode_with_key(record, private_reference, &recipient)
}

/// Encode with an already parsed recipient key.
///
/// # Errors
///
/// - `EncodingError::EmptyPrivateReference` for an empty reference.
/// - `EncodingError::ReservedFieldCollision` if `record` already has an
///   `i_secret` field.
/// - `EncodingError::Serialization` / `EncodingError::Encryption` if the
///   document or envelope cannot be produced.
pub fn encode_with_key(
    record: &PublicRecord,
    private_reference: &str,
    recipient: &RecipientPublicKey,
) -> Result<SealedNft, EncodingError> {
    if private_reference.is_empty() {
        return Err(EncodingError::EmptyPrivateReference);
    }
    if record.has_secret_field() {
        return Err(EncodingError::ReservedFieldCollision(RESERVED_SECRET_FIELD));
    }

    let key = SymmetricKey::generate();
    let ciphertext = sym_encrypt(private_reference, &key).map_err(EncodingError::Encryption)?;

    let mut augmented = record.clone();
    augmented.insert(RESERVED_SECRET_FIELD, ciphertext);
    let document = encode_hex(augmented.canonical_bytes()?);

    let envelope = envelope_seal(key.as_bytes(), recipient).map_err(EncodingError::Encryption)?;
    let seal = encode_hex(envelope);

    tracing::debug!(
        fields = record.len(),
        document_len = document.len(),
        seal_len = seal.len(),
        "sealed lot document"
    );

    Ok(SealedNft { document, seal })
}
