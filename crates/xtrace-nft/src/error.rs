//! # Codec Error Taxonomy
//!
//! - [`EncodingError`]: bad encoder input. Raised; no partial output.
//! - [`DecodingError`]: the document itself is broken. Raised.
//! - [`DecryptionFailure`]: the private reference could not be recovered.
//!   Never raised from [`decode`](crate::decode); reported inside
//!   [`DecryptionOutcome::Failed`](crate::DecryptionOutcome::Failed) while the
//!   public fields are still returned.

use serde::Serialize;
use thiserror::Error;
use xtrace_core::{CanonicalizationError, HexError, RecordError};
use xtrace_crypto::CryptoError;

/// Invalid or missing encoder input.
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("private reference must not be empty")]
    EmptyPrivateReference,

    /// The caller's record already uses the reserved ciphertext field.
    #[error("public record already contains reserved field `{0}`")]
    ReservedFieldCollision(&'static str),

    #[error("invalid recipient public key: {0}")]
    InvalidPublicKey(#[source] CryptoError),

    #[error("invalid public record: {0}")]
    Record(#[from] RecordError),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] CanonicalizationError),

    #[error("encryption failed: {0}")]
    Encryption(#[source] CryptoError),
}

/// The document is structurally broken; nothing can be returned.
#[derive(Error, Debug)]
pub enum DecodingError {
    #[error("document is not valid hex: {0}")]
    InvalidHex(#[from] HexError),

    #[error("document is not valid UTF-8 JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Why the private reference could not be recovered.
///
/// Wrong-key and tampered-data cases are indistinguishable under AES-GCM
/// and both land in the `*Rejected` variants.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DecryptionFailure {
    /// The private key could not be normalized to a 32-byte scalar.
    #[error("invalid private key format: {0}")]
    InvalidKeyFormat(String),

    /// The seal is not valid hex.
    #[error("seal is not valid hex: {0}")]
    SealMalformed(String),

    /// The envelope did not open under this key.
    #[error("seal could not be opened: {0}")]
    SealRejected(String),

    /// The envelope opened but did not contain a 32-byte key.
    #[error("seal payload is not a symmetric key: {0}")]
    KeyLength(String),

    /// The reserved field holds something other than a string.
    #[error("reserved ciphertext field is not a string")]
    SecretFieldNotString,

    /// The ciphertext string is not decodable.
    #[error("ciphertext is malformed: {0}")]
    CiphertextMalformed(String),

    /// The ciphertext failed authentication under the recovered key.
    #[error("ciphertext was rejected: {0}")]
    CiphertextRejected(String),
}
