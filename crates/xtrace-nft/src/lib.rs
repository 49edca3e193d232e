//! # xtrace-nft: Semi-Private Payload Codec
//!
//! A lot document has two readers. Anyone can read its public fields; only
//! the Laboratory can read the private reference (an image locator).
//!
//! ```text
//!  record + reference + lab public key
//!        │
//!        ▼  encode
//!  document = hex(JCS({...record, i_secret: AES-GCM(reference, k)}))
//!  seal     = hex(ECIES(k, lab public key))
//!        │
//!        ▼  decode(document, Option<seal + lab private key>)
//!  public record, always
//!  private reference, only when the seal opens
//! ```
//!
//! The codec is synchronous and stateless. Embedding the outputs in a
//! ledger transaction is the caller's job (see `xtrace-ledger`).

pub mod decode;
pub mod encode;
pub mod error;

pub use decode::{
    decode, decode_public, decode_with_key, DecodedDocument, DecryptionOutcome, OpeningMaterial,
};
pub use encode::{encode, encode_with_key, encode_with_key_bytes, SealedNft};
pub use error::{DecodingError, DecryptionFailure, EncodingError};
pub use xtrace_core::RESERVED_SECRET_FIELD;
