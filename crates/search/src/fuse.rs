//! Hybrid rank fusion
//!
//! Lexical and semantic matchers hand their results over as
//! [`MatchRecord`]s, each tagged with the query categories that produced it.
//! Fusion turns those into one id list, either strictly by category
//! precedence ([`fuse`]) or interleaved in windows so semantic hits surface
//! early ([`fuse_interleaved`]). Input order is preserved within every
//! group, and an id is emitted at most once, at its best position.

use lodestone_core::MatchRecord;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Category names treated as lexical matches, highest precedence first
pub const DEFAULT_KEYWORD_CATEGORIES: [&str; 3] = [
    "keyword_name",
    "keyword_display_name",
    "keyword_description",
];

/// Category name tagging semantic matches
pub const DEFAULT_SEMANTIC_CATEGORY: &str = "semantic";

/// Default interleave window size
pub const DEFAULT_WINDOW: usize = 3;

/// How match categories rank and interleave during fusion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusePolicy {
    /// Lexical category names, highest precedence first
    pub keyword_categories: Vec<String>,
    /// Category marking semantic matches; ranks below every keyword category
    pub semantic_category: String,
    /// Window size for interleaved presentation
    pub window: usize,
}

impl Default for FusePolicy {
    fn default() -> Self {
        Self {
            keyword_categories: DEFAULT_KEYWORD_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            semantic_category: DEFAULT_SEMANTIC_CATEGORY.to_string(),
            window: DEFAULT_WINDOW,
        }
    }
}

impl FusePolicy {
    /// Override the keyword category list
    pub fn with_keyword_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Override the semantic category name
    pub fn with_semantic_category(mut self, category: impl Into<String>) -> Self {
        self.semantic_category = category.into();
        self
    }

    /// Override the interleave window
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Precedence slot for a record: the earliest keyword category it
    /// carries, then the semantic category, then `None`
    pub fn priority_slot(&self, record: &MatchRecord) -> Option<usize> {
        for (slot, category) in self.keyword_categories.iter().enumerate() {
            if record.has_category(category) {
                return Some(slot);
            }
        }
        if record.has_category(&self.semantic_category) {
            return Some(self.keyword_categories.len());
        }
        None
    }

    /// True when the record carries any keyword category
    pub fn is_keyword(&self, record: &MatchRecord) -> bool {
        self.keyword_categories
            .iter()
            .any(|category| record.has_category(category))
    }
}

/// Order match records by category precedence.
///
/// Records group under the highest-precedence category they carry; groups
/// concatenate in policy order with records keeping their input order inside
/// each group. Records matching no listed category trail at the end, and a
/// repeated id keeps only its first (best) position.
pub fn fuse(lexical: &[MatchRecord], semantic: &[MatchRecord], policy: &FusePolicy) -> Vec<String> {
    let category_count = policy.keyword_categories.len() + 1;
    // one group per listed category, plus a trailing group for the rest
    let mut groups: Vec<Vec<&str>> = vec![Vec::new(); category_count + 1];
    for record in lexical.iter().chain(semantic.iter()) {
        let slot = policy.priority_slot(record).unwrap_or(category_count);
        groups[slot].push(record.id.as_str());
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut fused = Vec::new();
    for group in groups {
        for id in group {
            if seen.insert(id) {
                fused.push(id.to_string());
            }
        }
    }
    fused
}

/// Interleave two lists in fixed-size positional windows: `window` items of
/// `left`, `window` items of `right`, and so on until both are exhausted.
pub fn alternate_lists<T: Clone>(left: &[T], right: &[T], window: usize) -> Vec<T> {
    let window = window.max(1);
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let longest = left.len().max(right.len());
    let mut start = 0;
    while start < longest {
        let end = start + window;
        if start < left.len() {
            merged.extend_from_slice(&left[start..end.min(left.len())]);
        }
        if start < right.len() {
            merged.extend_from_slice(&right[start..end.min(right.len())]);
        }
        start = end;
    }
    merged
}

/// [`alternate_lists`] that emits each id once, wherever it appears first.
///
/// Items already emitted by either side are skipped without counting toward
/// the current window, so windows stay full as long as unseen items remain.
pub fn alternate_lists_unique<T, I, F>(
    left: &[T],
    right: &[T],
    window: usize,
    id_of: F,
) -> Vec<T>
where
    T: Clone,
    I: Eq + Hash,
    F: Fn(&T) -> I,
{
    let window = window.max(1);
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut seen: FxHashSet<I> = FxHashSet::default();
    let mut left_cursor = 0;
    let mut right_cursor = 0;
    let mut take_left = true;

    while left_cursor < left.len() || right_cursor < right.len() {
        let (source, cursor) = if take_left {
            (left, &mut left_cursor)
        } else {
            (right, &mut right_cursor)
        };
        let mut taken = 0;
        while *cursor < source.len() && taken < window {
            let item = &source[*cursor];
            *cursor += 1;
            if seen.insert(id_of(item)) {
                merged.push(item.clone());
                taken += 1;
            }
        }
        take_left = !take_left;
    }
    merged
}

/// Partition records into keyword and semantic lists by policy, then
/// interleave their ids with [`alternate_lists_unique`].
pub fn fuse_interleaved(
    lexical: &[MatchRecord],
    semantic: &[MatchRecord],
    policy: &FusePolicy,
) -> Vec<String> {
    let mut keyword_ids = Vec::new();
    let mut semantic_ids = Vec::new();
    for record in lexical.iter().chain(semantic.iter()) {
        if policy.is_keyword(record) {
            keyword_ids.push(record.id.clone());
        } else {
            semantic_ids.push(record.id.clone());
        }
    }
    alternate_lists_unique(&keyword_ids, &semantic_ids, policy.window, |id| id.clone())
}
