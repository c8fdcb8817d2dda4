//! Query-aware match highlighting for Lodestone
//!
//! This crate provides:
//! - Highlighter: exact plus semantic match spans over a document
//! - merge_spans and spans_to_runs for span normalization
//! - Stopword and highlightability predicates
//! - ANSI rendering of highlighted runs for terminals
//!
//! Highlighting always partitions the document losslessly: the returned run
//! texts concatenate back to the input byte for byte.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ansi;
pub mod error;
pub mod highlighter;
pub mod span;
pub mod stopwords;

// Re-export commonly used types
pub use ansi::{render_ansi, AnsiColor, AnsiStyle};
pub use error::{HighlightError, Result};
pub use highlighter::{HighlightConfig, Highlighter};
pub use span::{merge_spans, spans_to_runs};
pub use stopwords::{is_highlightable, is_stopword};
