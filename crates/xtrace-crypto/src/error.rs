//! # Cryptographic Error Types
//!
//! Structured errors for the primitives in `xtrace-crypto`.
//!
//! Key-format problems (`InvalidKeyFormat`, `InvalidPublicKey`) are kept
//! apart from failures to decrypt, so callers can tell "this key cannot be
//! used at all" from "this key does not open this ciphertext".

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key has the wrong length or is not a valid secp256k1 scalar.
    #[error("invalid private key format: {0}")]
    InvalidKeyFormat(String),

    /// Public key is not a valid secp256k1 SEC1 point.
    #[error("invalid secp256k1 public key: {0}")]
    InvalidPublicKey(String),

    /// Ciphertext is structurally broken (bad encoding, truncated, or the
    /// recovered plaintext is not UTF-8).
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Authentication failed: wrong key, or the ciphertext was altered.
    #[error("decryption failed: {0}")]
    DecryptionFailure(String),

    /// Encryption could not be performed.
    #[error("encryption failed: {0}")]
    Encryption(String),
}
