//! Query-aware document highlighting
//!
//! Two matchers feed one span set. The exact matcher scans the document for
//! case-insensitive occurrences of each query word; the semantic matcher
//! embeds both sides at token granularity and marks document tokens whose
//! vectors land close to any query token. Sub-word continuation pieces
//! absorb into their whole word, overlapping and adjacent spans merge, and
//! the result partitions the document into plain and highlighted runs that
//! concatenate back to the original text.

use crate::error::Result;
use crate::span::{merge_spans, spans_to_runs};
use crate::stopwords::is_highlightable;
use lodestone_core::{CharSpan, HighlightRun};
use lodestone_embed::{cosine_similarity, EmbeddingProvider, TokenEmbedding};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default similarity threshold for semantic token matches
const DEFAULT_THRESHOLD: f64 = 0.5;

/// Tuning for [`Highlighter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Cosine similarity a document token must exceed against some query
    /// token to count as a semantic match
    pub threshold: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl HighlightConfig {
    /// Override the semantic match threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Highlights query matches in documents.
///
/// Construction is cheap; the provider is only consulted per call, once for
/// the query and once per document.
pub struct Highlighter {
    provider: Arc<dyn EmbeddingProvider>,
    config: HighlightConfig,
}

impl Highlighter {
    /// Create a highlighter with the default configuration
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(provider, HighlightConfig::default())
    }

    /// Create a highlighter with an explicit configuration
    pub fn with_config(provider: Arc<dyn EmbeddingProvider>, config: HighlightConfig) -> Self {
        Self { provider, config }
    }

    /// Partition `target` into runs, highlighting everything `query` matches
    /// exactly or semantically
    pub fn highlight(&self, target: &str, query: &str) -> Result<Vec<HighlightRun>> {
        let query_tokens = self.provider.embed_tokens(query)?;
        self.highlight_embedded(target, query, &query_tokens)
    }

    /// Highlight several documents against one query, embedding the query
    /// only once
    pub fn highlight_many(
        &self,
        targets: &[&str],
        query: &str,
    ) -> Result<Vec<Vec<HighlightRun>>> {
        let query_tokens = self.provider.embed_tokens(query)?;
        let mut highlighted = Vec::with_capacity(targets.len());
        for target in targets {
            highlighted.push(self.highlight_embedded(target, query, &query_tokens)?);
        }
        tracing::debug!(
            target: "lodestone::highlight",
            docs = targets.len(),
            query_tokens = query_tokens.len(),
            "highlighted document batch"
        );
        Ok(highlighted)
    }

    /// Merged spans of every exact query-word occurrence in `target`
    pub fn exact_spans(&self, target: &str, query: &str) -> Vec<CharSpan> {
        merge_spans(exact_occurrences(target, query))
    }

    /// Merged spans of document tokens within `threshold` of some query
    /// token, with continuation pieces absorbed into their whole words
    pub fn semantic_spans(&self, target: &str, query: &str) -> Result<Vec<CharSpan>> {
        let query_tokens = self.provider.embed_tokens(query)?;
        let target_tokens = self.provider.embed_tokens(target)?;
        Ok(self.semantic_spans_embedded(&target_tokens, &query_tokens))
    }

    fn highlight_embedded(
        &self,
        target: &str,
        query: &str,
        query_tokens: &TokenEmbedding,
    ) -> Result<Vec<HighlightRun>> {
        let target_tokens = self.provider.embed_tokens(target)?;
        let mut spans = self.semantic_spans_embedded(&target_tokens, query_tokens);
        spans.extend(exact_occurrences(target, query));
        let merged = merge_spans(spans);
        Ok(spans_to_runs(target, &merged))
    }

    fn semantic_spans_embedded(
        &self,
        target_tokens: &TokenEmbedding,
        query_tokens: &TokenEmbedding,
    ) -> Vec<CharSpan> {
        let matched: Vec<usize> = target_tokens
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| is_highlightable(&token.text))
            .filter(|(_, token)| {
                query_tokens.tokens.iter().any(|query_token| {
                    cosine_similarity(&query_token.vector, &token.vector) > self.config.threshold
                })
            })
            .map(|(index, _)| index)
            .collect();

        expand_continuations(target_tokens, &matched)
            .into_iter()
            .map(|(start, end)| {
                CharSpan::new(
                    target_tokens.tokens[start].span.start,
                    target_tokens.tokens[end].span.end,
                )
            })
            .collect()
    }
}

/// Widen each matched token index to the whole word it belongs to and merge
/// the results into disjoint token ranges.
///
/// A matched continuation piece pulls in its head piece and every sibling;
/// a matched head piece pulls in its trailing pieces. Ranges covering
/// consecutive tokens collapse into one. Returned ranges are sorted,
/// inclusive on both ends, and index into `tokens`.
fn expand_continuations(tokens: &TokenEmbedding, matched: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = matched
        .iter()
        .map(|&index| {
            let mut start = index;
            if tokens.is_continuation(start) {
                while start > 0 && tokens.is_continuation(start - 1) {
                    start -= 1;
                }
                start = start.saturating_sub(1);
            }
            let mut end = index;
            while tokens.is_continuation(end + 1) {
                end += 1;
            }
            (start, end)
        })
        .collect();
    ranges.sort();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.0 <= last.1 + 1 => last.1 = last.1.max(range.1),
            _ => merged.push(range),
        }
    }
    merged
}

/// Spans of every case-insensitive occurrence of each query word in `target`.
///
/// Query words that are stopwords or carry no alphabetic character are
/// skipped; occurrences of one word never overlap, but occurrences of
/// different words may.
fn exact_occurrences(target: &str, query: &str) -> Vec<CharSpan> {
    let mut spans = Vec::new();
    for word in query.split_whitespace() {
        let lowered = word.to_lowercase();
        if !is_highlightable(&lowered) {
            continue;
        }
        let chars: Vec<char> = lowered.chars().collect();
        spans.extend(find_occurrences(target, &chars));
    }
    spans
}

/// All non-overlapping occurrences of `word` in `target`, scanning left to
/// right
fn find_occurrences(target: &str, word: &[char]) -> Vec<CharSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    while cursor < target.len() {
        match match_at(target, cursor, word) {
            Some(end) => {
                spans.push(CharSpan::new(cursor, end));
                cursor = end;
            }
            None => {
                cursor += target[cursor..]
                    .chars()
                    .next()
                    .map_or(1, |ch| ch.len_utf8());
            }
        }
    }
    spans
}

/// Match `word` (already lowercase) against `target` starting at byte
/// `start`, folding each document character to lowercase as it is compared.
///
/// Characters that lowercase to several characters must be consumed whole:
/// a match that would end partway through such an expansion is rejected.
/// Returns the end byte offset of the match.
fn match_at(target: &str, start: usize, word: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut end = start;
    for ch in target[start..].chars() {
        for folded in ch.to_lowercase() {
            if matched == word.len() || word[matched] != folded {
                return None;
            }
            matched += 1;
        }
        end += ch.len_utf8();
        if matched == word.len() {
            return Some(end);
        }
    }
    None
}
