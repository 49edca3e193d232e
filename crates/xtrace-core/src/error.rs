//! # Error Types
//!
//! Structured errors for the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error while building or reading a [`PublicRecord`](crate::PublicRecord).
#[derive(Error, Debug)]
pub enum RecordError {
    /// The value serialized to something other than a JSON object.
    #[error("public record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The value could not be serialized to JSON at all.
    #[error("public record is not serializable: {0}")]
    Unserializable(#[from] serde_json::Error),
}

/// Error decoding a hex string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    /// The input was empty after trimming.
    #[error("hex string is empty")]
    Empty,

    /// The input was not valid hex.
    #[error("invalid hex: {0}")]
    Invalid(#[from] hex::FromHexError),
}
