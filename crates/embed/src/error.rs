//! Error types for embedding providers and caches
//!
//! Cache decode failures get their own enum so the store can treat any of
//! them as a cache miss without inspecting provider errors.

use std::io;
use thiserror::Error;

/// Result type alias for embedding operations
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Result type alias for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors raised by embedding providers and the embedding store
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The provider cannot produce embeddings right now
    #[error("embedding provider unavailable: {reason}")]
    Unavailable {
        /// What stopped the provider
        reason: String,
    },

    /// A vector did not have the provider's advertised dimension
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the provider advertises
        expected: usize,
        /// Dimension actually produced
        actual: usize,
    },

    /// Cache failure surfaced through the store
    #[error("embedding cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Errors raised while encoding, decoding, or persisting embedding blobs
#[derive(Debug, Error)]
pub enum CacheError {
    /// Blob shorter than the fixed header and trailer
    #[error("embedding blob too short: {found} bytes")]
    TooShort {
        /// Bytes actually present
        found: usize,
    },

    /// Blob does not start with the expected magic bytes
    #[error("invalid embedding blob magic")]
    InvalidMagic,

    /// Blob was written by an unknown format version
    #[error("unsupported embedding blob version: {found}")]
    UnsupportedVersion {
        /// Version found in the header
        found: u32,
    },

    /// Stored checksum does not match the blob contents
    #[error("embedding blob checksum mismatch: expected {expected:08x}, computed {computed:08x}")]
    ChecksumMismatch {
        /// Checksum recorded in the blob
        expected: u32,
        /// Checksum computed over the blob contents
        computed: u32,
    },

    /// Payload holds fewer values than the header promises
    #[error("truncated embedding blob: header promises {expected} values, payload holds {found}")]
    Truncated {
        /// Value count promised by the header
        expected: usize,
        /// Value count actually present
        found: usize,
    },

    /// Blob belongs to a different corpus than requested
    #[error("embedding blob fingerprint mismatch: expected {expected:016x}, found {found:016x}")]
    FingerprintMismatch {
        /// Fingerprint hash of the requested corpus
        expected: u64,
        /// Fingerprint hash recorded in the blob
        found: u64,
    },

    /// I/O error while reading or writing a blob
    #[error("embedding cache I/O error: {0}")]
    Io(#[from] io::Error),
}
