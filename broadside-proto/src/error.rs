//! Codec errors.

use thiserror::Error;

/// An inbound frame could not be turned into an [`Event`](crate::Event).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, an unknown `eventType`, or a payload of the wrong shape.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A game map whose rows differ in length.
    #[error("ragged game map: row {row} has {actual} cells, expected {expected}")]
    RaggedMap {
        /// Index of the first offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
}

/// An outbound [`Event`](crate::Event) could not be serialized.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
