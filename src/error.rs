//! Error types for the resource splitter.

use crate::types::ArrayKind;
use thiserror::Error;

/// Result type alias using SplitterError.
pub type Result<T> = std::result::Result<T, SplitterError>;

/// Main error type for resource splitting operations.
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A face record starts with a mask that is not a supported face shape.
    #[error("Cannot handle face mask {mask} at token {offset}")]
    UnsupportedFaceMask { mask: u32, offset: usize },

    /// The face stream ends in the middle of a record.
    #[error("Face record with mask {mask} at token {offset} needs {expected} tokens, only {available} left")]
    TruncatedFace {
        mask: u32,
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// A face references an element past the end of its source array.
    #[error("{kind} index {index} out of range (source has {len} elements)")]
    IndexOutOfRange {
        kind: ArrayKind,
        index: u32,
        len: usize,
    },

    /// A split was requested with zero target chunks.
    #[error("Invalid split count: {0}")]
    InvalidSplitCount(usize),

    /// The manifest document does not have the expected shape.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}
