//! Lodestone - Semantic and hybrid text search with match highlighting
//!
//! Lodestone ranks a corpus of documents against free-text queries and
//! explains its matches down to the character. Three interchangeable scorers
//! cover the cost/quality spectrum, a fusion layer merges lexical and
//! semantic match lists, and a highlighter maps matches back onto the
//! source text:
//!
//! - [`WordSearch`]: token-granularity neural tf-idf, memory-bounded by
//!   similarity chunking
//! - [`SentenceSearch`]: one cached vector per document, cosine scored
//! - [`PlaintextSearch`]: exact-word tf-idf with no embedding model at all
//! - [`fuse()`] and [`fuse_interleaved`]: category-aware merging of lexical
//!   and semantic match lists
//! - [`Highlighter`]: exact plus semantic highlight spans, rendered as
//!   lossless runs
//!
//! # Quick Start
//!
//! ```
//! use lodestone::{Corpus, HashEmbedder, Search, SentenceSearch};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus = Arc::new(Corpus::from_texts([
//!     "the whale surfaced beside the boat",
//!     "tax forms are due at the end of april",
//! ])?);
//!
//! let scorer = SentenceSearch::builder(corpus, Arc::new(HashEmbedder::new(64))).build()?;
//! let ranked = scorer.search("whale surfaced near the boat", Some(1))?;
//! assert_eq!(ranked[0].key, 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Functionality is split across four member crates, re-exported here:
//! lodestone-core (corpus and shared value types), lodestone-embed
//! (embedding providers, similarity, and the on-disk vector cache),
//! lodestone-search (scorers and rank fusion), and lodestone-highlight
//! (span computation and terminal rendering). Applications that want a
//! real neural provider implement [`EmbeddingProvider`] over their model;
//! everything downstream is provider-agnostic.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use lodestone_core::{
    CharSpan, Corpus, CorpusError, HighlightRun, MatchRecord, ScoredResult,
};
pub use lodestone_embed::{
    check_dimension, cosine_similarity, CacheError, ComputeContext, ComputeDevice,
    CorpusFingerprint, DirectoryCache, EmbedError, EmbeddedToken, EmbeddingBlob, EmbeddingCache,
    EmbeddingProvider, EmbeddingStore, EmbeddingVector, HashEmbedder, MemoryCache, TokenEmbedding,
};
pub use lodestone_highlight::{
    is_highlightable, is_stopword, merge_spans, render_ansi, spans_to_runs, AnsiColor, AnsiStyle,
    HighlightConfig, HighlightError, Highlighter,
};
pub use lodestone_search::{
    alternate_lists, alternate_lists_unique, extract_unique_words, extract_words, fuse,
    fuse_interleaved, FusePolicy, PlaintextSearch, Search, SearchError, SentenceSearch,
    SentenceSearchBuilder, SentenceSearchConfig, WordSearch, WordSearchConfig,
};

/// Commonly used imports in one place
pub mod prelude {
    pub use lodestone_core::{CharSpan, Corpus, HighlightRun, MatchRecord, ScoredResult};
    pub use lodestone_embed::{EmbeddingCache, EmbeddingProvider, HashEmbedder};
    pub use lodestone_highlight::{HighlightConfig, Highlighter};
    pub use lodestone_search::{
        fuse, fuse_interleaved, FusePolicy, PlaintextSearch, Search, SentenceSearch, WordSearch,
    };
}
