//! Search scorers and rank fusion for Lodestone
//!
//! This crate provides:
//! - Search trait for interchangeable corpus scorers
//! - WordSearch: token-granularity neural tf-idf scoring
//! - SentenceSearch: one-vector-per-document cosine scoring
//! - PlaintextSearch: exact-word tf-idf with no embedding provider
//! - FusePolicy and the fusion functions for hybrid result lists
//!
//! Every scorer ranks its whole corpus for a query, sorts by descending
//! score with corpus order breaking ties, and truncates only as the final
//! step.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fuse;
pub mod plaintext;
pub mod sentence;
pub mod word;
pub mod words;

use lodestone_core::ScoredResult;
use std::cmp::Ordering;

// Re-export commonly used types
pub use error::{Result, SearchError};
pub use fuse::{
    alternate_lists, alternate_lists_unique, fuse, fuse_interleaved, FusePolicy,
};
pub use plaintext::PlaintextSearch;
pub use sentence::{SentenceSearch, SentenceSearchBuilder, SentenceSearchConfig};
pub use word::{WordSearch, WordSearchConfig};
pub use words::{extract_unique_words, extract_words};

/// A relevance scorer over one corpus.
///
/// Implementations score every document for a query; `n` limits how many
/// results come back, applied only after the full ranking is computed so a
/// truncated list is always a prefix of the untruncated one.
pub trait Search<K>: Send + Sync {
    /// Rank the corpus against `query`, truncating to `n` results
    fn search(&self, query: &str, n: Option<usize>) -> Result<Vec<ScoredResult<K>>>;

    /// Short scorer name for logs
    fn name(&self) -> &str;
}

/// Stable descending sort by score, then truncate.
///
/// `sort_by` is stable, so equal scores keep the order `results` arrived in,
/// which every scorer arranges to be corpus order. NaN scores compare equal
/// and therefore also hold their position.
pub(crate) fn rank_descending<K>(
    mut results: Vec<ScoredResult<K>>,
    n: Option<usize>,
) -> Vec<ScoredResult<K>> {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    if let Some(n) = n {
        results.truncate(n);
    }
    results
}
