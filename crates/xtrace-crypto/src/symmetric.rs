//! # Reference Cipher (AES-256-GCM)
//!
//! Encrypts the private reference carried in a document's `i_secret` field.
//!
//! ## Wire format
//!
//! `base64(nonce(12) || ciphertext || tag(16))`, standard alphabet with
//! padding. The string is self-contained: decrypting needs only the key.
//!
//! ## Key lifecycle
//!
//! A [`SymmetricKey`] is generated per document, wrapped into the seal, and
//! dropped. It zeroizes on drop and has no serde support.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand_core::{OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Symmetric key length in bytes.
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// AES-GCM nonce length used by the reference cipher.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// A single-use 256-bit AES key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_LEN]);

impl SymmetricKey {
    /// Fresh key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SYMMETRIC_KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Rebuild a key recovered from an opened seal.
    ///
    /// # Errors
    ///
    /// `CryptoError::InvalidKeyFormat` unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SYMMETRIC_KEY_LEN {
            return Err(CryptoError::InvalidKeyFormat(format!(
                "symmetric key must be {SYMMETRIC_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; SYMMETRIC_KEY_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Raw key bytes, as sealed into the envelope.
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(&self.0.into())
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey(<private>)")
    }
}

/// Encrypt a UTF-8 string under `key`.
pub fn sym_encrypt(plaintext: &str, key: &SymmetricKey) -> Result<String, CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CryptoError::Encryption("AES-256-GCM encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(out))
}

/// Decrypt a string produced by [`sym_encrypt`].
///
/// # Errors
///
/// - `CryptoError::MalformedCiphertext` if the input is not base64, is
///   shorter than nonce + tag, or decrypts to bytes that are not UTF-8.
/// - `CryptoError::DecryptionFailure` if the tag does not verify. GCM
///   cannot tell a wrong key from altered bytes.
pub fn sym_decrypt(ciphertext: &str, key: &SymmetricKey) -> Result<String, CryptoError> {
    let raw = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| CryptoError::MalformedCiphertext(format!("not base64: {e}")))?;
    if raw.len() < NONCE_LEN + TAG_LEN {
        return Err(CryptoError::MalformedCiphertext(format!(
            "expected at least {} bytes, got {}",
            NONCE_LEN + TAG_LEN,
            raw.len()
        )));
    }

    let (nonce, body) = raw.split_at(NONCE_LEN);
    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(nonce), body)
        .map_err(|_| {
            CryptoError::DecryptionFailure(
                "authentication tag mismatch (wrong key or altered ciphertext)".to_string(),
            )
        })?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::MalformedCiphertext("plaintext is not UTF-8".to_string()))
}
