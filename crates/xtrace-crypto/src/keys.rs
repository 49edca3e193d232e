//! # secp256k1 Recipient Keys
//!
//! Key types for the privileged reader (the Laboratory) and the
//! normalization step for private keys exported by XRPL wallets.
//!
//! ## XRPL private-key quirk
//!
//! XRPL seed derivation renders secp256k1 private keys as 33 bytes: the
//! 32-byte scalar preceded by a `0x00` byte (66 hex characters starting with
//! `00`). [`normalize_private_key_bytes`] and [`normalize_private_key_hex`]
//! strip that byte. Both are idempotent: a canonical 32-byte key passes
//! through unchanged.
//!
//! ## Security Invariant
//!
//! Private keys are never serialized or logged. `Debug` output is redacted
//! and the inner `k256::SecretKey` zeroizes on drop.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::OsRng;
use zeroize::Zeroizing;

use xtrace_core::encoding::{decode_hex, encode_hex, encode_hex_upper};

use crate::error::CryptoError;

/// Canonical secp256k1 private key length.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of the zero-prefixed form produced by XRPL wallets.
pub const XRPL_SECRET_KEY_LEN: usize = 33;

/// Compressed SEC1 public key length.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// Uncompressed SEC1 public key length.
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Strip the XRPL zero-byte prefix from a private key, if present.
///
/// Accepts 32 bytes unchanged, or 33 bytes whose first byte is zero.
///
/// # Errors
///
/// `CryptoError::InvalidKeyFormat` for any other length, or for a 33-byte
/// key whose first byte is not zero.
pub fn normalize_private_key_bytes(bytes: &[u8]) -> Result<&[u8], CryptoError> {
    match bytes.len() {
        SECRET_KEY_LEN => Ok(bytes),
        XRPL_SECRET_KEY_LEN if bytes[0] == 0x00 => Ok(&bytes[1..]),
        XRPL_SECRET_KEY_LEN => Err(CryptoError::InvalidKeyFormat(format!(
            "33-byte private key must start with 0x00, got 0x{:02x}",
            bytes[0]
        ))),
        n => Err(CryptoError::InvalidKeyFormat(format!(
            "private key must be {SECRET_KEY_LEN} bytes (or {XRPL_SECRET_KEY_LEN} with a zero prefix), got {n}"
        ))),
    }
}

/// Decode and normalize a hex-encoded private key to 32 bytes.
///
/// # Errors
///
/// `CryptoError::InvalidKeyFormat` for non-hex input, Ed25519 keys (`ED`
/// prefix), or a length that normalization cannot fix.
pub fn normalize_private_key_hex(input: &str) -> Result<Zeroizing<[u8; SECRET_KEY_LEN]>, CryptoError> {
    let trimmed = input.trim();
    if is_ed25519_hex(trimmed) {
        return Err(CryptoError::InvalidKeyFormat(
            "Ed25519 key (ED prefix) cannot open a secp256k1 envelope".to_string(),
        ));
    }
    let raw = Zeroizing::new(
        decode_hex(trimmed).map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))?,
    );
    let scalar = normalize_private_key_bytes(&raw)?;
    let mut out = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    out.copy_from_slice(scalar);
    Ok(out)
}

fn is_ed25519_hex(hex: &str) -> bool {
    hex.len() == 2 * XRPL_SECRET_KEY_LEN
        && hex.get(..2).map_or(false, |p| p.eq_ignore_ascii_case("ed"))
}

// ---------------------------------------------------------------------------
// RecipientPublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public key that envelopes are sealed to.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecipientPublicKey(k256::PublicKey);

impl RecipientPublicKey {
    /// Parse a compressed (33-byte) or uncompressed (65-byte) SEC1 point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_LEN && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidPublicKey(format!(
                "expected {COMPRESSED_PUBLIC_KEY_LEN} or {UNCOMPRESSED_PUBLIC_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey("not a point on secp256k1".to_string()))
    }

    /// Parse a hex-encoded SEC1 point, as XRPL wallets display it.
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        let trimmed = input.trim();
        if is_ed25519_hex(trimmed) {
            return Err(CryptoError::InvalidPublicKey(
                "Ed25519 key (ED prefix) cannot receive a secp256k1 envelope".to_string(),
            ));
        }
        let bytes = decode_hex(trimmed).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Compressed SEC1 encoding.
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LEN] {
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        out.copy_from_slice(self.0.to_encoded_point(true).as_bytes());
        out
    }

    /// Uncompressed SEC1 encoding.
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LEN] {
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_LEN];
        out.copy_from_slice(self.0.to_encoded_point(false).as_bytes());
        out
    }

    /// Uppercase compressed hex, matching XRPL's `PublicKey` rendering.
    pub fn to_hex(&self) -> String {
        encode_hex_upper(self.to_compressed_bytes())
    }

    pub(crate) fn as_inner(&self) -> &k256::PublicKey {
        &self.0
    }
}

impl std::str::FromStr for RecipientPublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Debug for RecipientPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex = self.to_hex();
        write!(f, "RecipientPublicKey({}...)", &hex[..8])
    }
}

impl std::fmt::Display for RecipientPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// RecipientSecretKey
// ---------------------------------------------------------------------------

/// The privileged reader's secp256k1 private key.
///
/// Does not implement `Serialize`.
#[derive(Clone)]
pub struct RecipientSecretKey(k256::SecretKey);

impl RecipientSecretKey {
    /// Strict constructor: exactly 32 bytes forming a non-zero scalar below
    /// the curve order. No normalization is applied.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(CryptoError::InvalidKeyFormat(format!(
                "private key must be exactly {SECRET_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        k256::SecretKey::from_slice(bytes).map(Self).map_err(|_| {
            CryptoError::InvalidKeyFormat("not a valid secp256k1 scalar".to_string())
        })
    }

    /// Parse a hex private key, normalizing the XRPL `00` prefix first.
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        let bytes = normalize_private_key_hex(input)?;
        Self::from_bytes(bytes.as_slice())
    }

    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self(k256::SecretKey::random(&mut OsRng))
    }

    /// The matching public key.
    pub fn public_key(&self) -> RecipientPublicKey {
        RecipientPublicKey(self.0.public_key())
    }

    /// Canonical 32-byte scalar.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; SECRET_KEY_LEN]);
        out.copy_from_slice(&self.0.to_bytes());
        out
    }

    /// Lowercase 64-character hex.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_hex(self.to_bytes().as_slice()))
    }

    /// Uppercase 66-character hex with the `00` prefix, as XRPL wallets
    /// export it.
    pub fn to_xrpl_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("00{}", encode_hex_upper(self.to_bytes().as_slice())))
    }

    pub(crate) fn as_inner(&self) -> &k256::SecretKey {
        &self.0
    }
}

impl std::fmt::Debug for RecipientSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecipientSecretKey(<private>)")
    }
}

// ---------------------------------------------------------------------------
// LabKeyPair
// ---------------------------------------------------------------------------

/// A Laboratory key pair: the secret half opens seals, the public half is
/// handed to sellers for encoding.
#[derive(Clone)]
pub struct LabKeyPair {
    secret: RecipientSecretKey,
    public: RecipientPublicKey,
}

impl LabKeyPair {
    /// Fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self::from_secret(RecipientSecretKey::generate())
    }

    /// Key pair around an existing secret, e.g. one loaded from a key file.
    pub fn from_secret(secret: RecipientSecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    /// The half handed to sellers for encoding.
    pub fn public_key(&self) -> &RecipientPublicKey {
        &self.public
    }

    /// The half that opens seals.
    pub fn secret_key(&self) -> &RecipientSecretKey {
        &self.secret
    }
}

impl std::fmt::Debug for LabKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabKeyPair")
            .field("public", &self.public)
            .field("secret", &"<private>")
            .finish()
    }
}
