//! Core types for Lodestone
//!
//! This crate defines the foundational types shared by every layer of the
//! search pipeline:
//! - Corpus: Ordered, keyed collection of documents
//! - ScoredResult: One ranked hit (key plus relevance score)
//! - MatchRecord: Externally produced match with its category tags
//! - CharSpan: Byte-offset span into a document
//! - HighlightRun: One segment of a partitioned document
//! - CorpusError: Error hierarchy for corpus construction

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod corpus;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use corpus::Corpus;
pub use error::{CorpusError, Result};
pub use types::{CharSpan, HighlightRun, MatchRecord, ScoredResult};
