//! # ECIES Envelope over secp256k1
//!
//! Wraps a short payload (the per-document symmetric key) for a single
//! recipient public key. The layout matches the default configuration of
//! the `eciesjs` npm package and the `ecies` crate, so seals produced by a
//! browser wallet and by this crate open each other:
//!
//! ```text
//! ephemeral_pk (65, uncompressed) || nonce (16) || tag (16) || ciphertext
//! ```
//!
//! ## Construction
//!
//! 1. Fresh ephemeral secp256k1 key pair.
//! 2. Shared point `S = recipient_pk × ephemeral_sk`.
//! 3. `k = HKDF-SHA256(salt = ∅, ikm = ephemeral_pk ‖ S, info = ∅)`, both
//!    points uncompressed, 32 bytes of output.
//! 4. AES-256-GCM under `k` with a random 16-byte nonce and empty AAD.
//!
//! The primitive knows nothing about documents; it moves bytes.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use hkdf::Hkdf;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::{OsRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::keys::{RecipientPublicKey, RecipientSecretKey, UNCOMPRESSED_PUBLIC_KEY_LEN};

type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Envelope nonce length.
pub const ENVELOPE_NONCE_LEN: usize = 16;

/// Envelope tag length.
pub const ENVELOPE_TAG_LEN: usize = 16;

/// Fixed bytes added to every payload.
pub const ENVELOPE_OVERHEAD: usize =
    UNCOMPRESSED_PUBLIC_KEY_LEN + ENVELOPE_NONCE_LEN + ENVELOPE_TAG_LEN;

/// Seal `payload` so only the holder of `recipient`'s private key can read it.
pub fn envelope_seal(payload: &[u8], recipient: &RecipientPublicKey) -> Result<Vec<u8>, CryptoError> {
    let ephemeral = k256::SecretKey::random(&mut OsRng);
    let ephemeral_pk = ephemeral.public_key().to_encoded_point(false);

    let shared = shared_point(&ephemeral, recipient.as_inner());
    let key = derive_key(ephemeral_pk.as_bytes(), &shared)
        .ok_or_else(|| CryptoError::Encryption("HKDF expansion failed".to_string()))?;

    let mut nonce = [0u8; ENVELOPE_NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let mut body = payload.to_vec();
    let tag = cipher(&key)
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut body)
        .map_err(|_| CryptoError::Encryption("envelope encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(ENVELOPE_OVERHEAD + body.len());
    out.extend_from_slice(ephemeral_pk.as_bytes());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(tag.as_slice());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Open an envelope with a raw 32-byte private key.
///
/// No normalization is applied here; callers holding an XRPL `00`-prefixed
/// key run it through [`normalize_private_key_bytes`](crate::keys::normalize_private_key_bytes)
/// first.
///
/// # Errors
///
/// - `CryptoError::InvalidKeyFormat` if the key is not 32 bytes or not a
///   valid scalar.
/// - `CryptoError::DecryptionFailure` if the envelope is truncated, carries
///   an invalid ephemeral point, or fails authentication.
pub fn envelope_open(sealed: &[u8], recipient_private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let secret = RecipientSecretKey::from_bytes(recipient_private_key)?;
    envelope_open_with(sealed, &secret)
}

/// Open an envelope with an already parsed private key.
pub fn envelope_open_with(sealed: &[u8], recipient: &RecipientSecretKey) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < ENVELOPE_OVERHEAD {
        return Err(CryptoError::DecryptionFailure(format!(
            "envelope truncated: need at least {ENVELOPE_OVERHEAD} bytes, got {}",
            sealed.len()
        )));
    }

    let (ephemeral_bytes, rest) = sealed.split_at(UNCOMPRESSED_PUBLIC_KEY_LEN);
    let (nonce, rest) = rest.split_at(ENVELOPE_NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(ENVELOPE_TAG_LEN);

    let ephemeral = k256::PublicKey::from_sec1_bytes(ephemeral_bytes).map_err(|_| {
        CryptoError::DecryptionFailure("ephemeral key is not a secp256k1 point".to_string())
    })?;

    let shared = shared_point(recipient.as_inner(), &ephemeral);
    let key = derive_key(ephemeral_bytes, &shared)
        .ok_or_else(|| CryptoError::DecryptionFailure("HKDF expansion failed".to_string()))?;

    let mut body = ciphertext.to_vec();
    cipher(&key)
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            b"",
            &mut body,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| {
            CryptoError::DecryptionFailure(
                "envelope authentication failed (wrong key or altered seal)".to_string(),
            )
        })?;
    Ok(body)
}

/// Uncompressed encoding of `public × secret`.
fn shared_point(secret: &k256::SecretKey, public: &k256::PublicKey) -> Zeroizing<Vec<u8>> {
    let point = (public.to_projective() * *secret.to_nonzero_scalar()).to_affine();
    Zeroizing::new(point.to_encoded_point(false).as_bytes().to_vec())
}

fn derive_key(ephemeral_pk: &[u8], shared: &[u8]) -> Option<Zeroizing<[u8; 32]>> {
    let mut ikm = Zeroizing::new(Vec::with_capacity(ephemeral_pk.len() + shared.len()));
    ikm.extend_from_slice(ephemeral_pk);
    ikm.extend_from_slice(shared);

    let mut okm = Zeroizing::new([0u8; 32]);
    Hkdf::<Sha256>::new(None, &ikm).expand(&[], &mut okm[..]).ok()?;
    Some(okm)
}

fn cipher(key: &[u8; 32]) -> EnvelopeCipher {
    EnvelopeCipher::new(GenericArray::from_slice(key))
}
