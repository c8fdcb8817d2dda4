//! Embedding providers, caches, and vector math for Lodestone
//!
//! This crate owns everything between raw text and dense vectors:
//! - EmbeddingProvider: Trait for sentence- and token-level embedders
//! - TokenEmbedding: Per-token vectors with source-text spans
//! - ComputeContext: Device and batch-size selection
//! - HashEmbedder: Deterministic, model-free provider for tests and fallback
//! - EmbeddingCache: Pluggable blob cache (in-memory and on-disk)
//! - EmbeddingStore: Fingerprint-checked corpus vectors, recomputed on miss
//! - cosine_similarity: The similarity measure every scorer shares

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod cache;
pub mod context;
pub mod error;
pub mod hash;
pub mod provider;
pub mod similarity;
pub mod store;

// Re-export commonly used types
pub use cache::{
    CorpusFingerprint, DirectoryCache, EmbeddingBlob, EmbeddingCache, MemoryCache,
    BLOB_FORMAT_VERSION, BLOB_MAGIC,
};
pub use context::{ComputeContext, ComputeDevice, DEFAULT_BATCH_SIZE};
pub use error::{CacheError, CacheResult, EmbedError, Result};
pub use hash::HashEmbedder;
pub use provider::{EmbeddedToken, EmbeddingProvider, EmbeddingVector, TokenEmbedding};
pub use similarity::{check_dimension, cosine_similarity};
pub use store::EmbeddingStore;
