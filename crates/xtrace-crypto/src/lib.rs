//! # xtrace-crypto: Cryptographic Primitives
//!
//! The two halves of the semi-private payload scheme, plus the key types
//! they need:
//!
//! - **Reference cipher** ([`symmetric`]): AES-256-GCM over the private
//!   reference string, emitted as a self-contained base64 string.
//! - **Envelope** ([`envelope`]): ECIES over secp256k1 (ephemeral ECDH,
//!   HKDF-SHA256, AES-256-GCM) wrapping the per-document symmetric key for
//!   the Laboratory.
//! - **Keys** ([`keys`]): recipient key types and the normalization of
//!   XRPL's zero-prefixed private keys.
//!
//! ## Crate Policy
//!
//! - Depends only on `xtrace-core` internally.
//! - No mocking of cryptographic operations in tests; all tests run real
//!   AES-GCM, real HKDF, real secp256k1.
//! - Key material is zeroized on drop and never appears in `Debug` output.

pub mod envelope;
pub mod error;
pub mod keys;
pub mod symmetric;

pub use envelope::{envelope_open, envelope_open_with, envelope_seal};
pub use error::CryptoError;
pub use keys::{
    normalize_private_key_bytes, normalize_private_key_hex, LabKeyPair, RecipientPublicKey,
    RecipientSecretKey,
};
pub use symmetric::{sym_decrypt, sym_encrypt, SymmetricKey};
