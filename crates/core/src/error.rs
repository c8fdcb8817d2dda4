//! Error types for corpus construction
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use thiserror::Error;

/// Result type alias for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors raised while building a corpus
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// Two documents were inserted under the same key
    #[error("duplicate corpus key: {key}")]
    DuplicateKey {
        /// Debug rendering of the offending key
        key: String,
    },

    /// A document with no content was inserted
    #[error("empty document under corpus key: {key}")]
    EmptyDocument {
        /// Debug rendering of the offending key
        key: String,
    },
}
