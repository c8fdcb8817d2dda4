//! Shared value types for the search pipeline
//!
//! This module defines the foundational types:
//! - ScoredResult: One ranked hit (key plus relevance score)
//! - MatchRecord: Externally produced match with its category tags
//! - CharSpan: Byte-offset span into a document
//! - HighlightRun: One segment of a partitioned document

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One ranked document: its corpus key and relevance score.
///
/// Scorers return these sorted by descending score; documents with equal
/// scores keep their corpus order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult<K> {
    /// Corpus key of the matched document
    pub key: K,
    /// Relevance score; higher is more relevant
    pub score: f64,
}

impl<K> ScoredResult<K> {
    /// Create a scored result
    pub fn new(key: K, score: f64) -> Self {
        Self { key, score }
    }
}

/// A match produced upstream of fusion, tagged with the categories of query
/// that produced it.
///
/// Categories use a sorted set so records render and compare
/// deterministically regardless of tag insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Identifier of the matched entity
    pub id: String,
    /// Names of the query categories that matched this entity
    pub categories: BTreeSet<String>,
}

impl MatchRecord {
    /// Create a record with no category tags
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            categories: BTreeSet::new(),
        }
    }

    /// Add one category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Replace the category tags
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// True when this record carries `category`
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

/// A half-open byte range `[start, end)` into a document.
///
/// Offsets always lie on `char` boundaries of the document the span was
/// computed against, so slicing with them cannot split a character.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CharSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl CharSpan {
    /// Create a span; `start` must not exceed `end`
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} exceeds end {}", start, end);
        Self { start, end }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-length spans
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice `text` with this span, or `None` when the span falls outside
    /// `text` or off a character boundary
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for CharSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One segment of a document partitioned for display.
///
/// A highlighted document is a sequence of runs whose texts concatenate back
/// to the original document exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRun {
    /// The segment text, verbatim from the document
    pub text: String,
    /// True when this segment matched the query
    pub highlight: bool,
}

impl HighlightRun {
    /// A segment that matched the query
    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: true,
        }
    }

    /// A segment that did not match
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: false,
        }
    }
}
