//! # xtrace-core: Foundational Types for the Traceability Stack
//!
//! Defines the shared primitives every other `xtrace-*` crate builds on:
//!
//! 1. **`PublicRecord`.** The clear-text attribute mapping of a product lot
//!    (type, weight, date, lot number, price). Always a JSON object.
//!
//! 2. **`CanonicalBytes`.** RFC 8785 (JCS) serialization: sorted keys,
//!    compact separators, UTF-8. Documents and transaction digests are built
//!    from these bytes, so two implementations serializing the same record
//!    agree byte for byte.
//!
//! 3. **`ContentDigest`.** SHA-256 over `CanonicalBytes` only.
//!
//! 4. **Hex helpers.** Ledger fields carry binary data as hex; the helpers
//!    accept either case and surrounding whitespace.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `xtrace-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod record;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use encoding::{decode_hex, encode_hex, encode_hex_upper};
pub use error::{CanonicalizationError, HexError, RecordError};
pub use record::{PublicRecord, RESERVED_SECRET_FIELD};
