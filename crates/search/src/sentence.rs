//! Sentence-level cosine scoring over cached corpus vectors
//!
//! One vector per document, computed once through the embedding store (and
//! therefore cacheable across processes), then a straight cosine pass per
//! query. The cheap, coarse counterpart to [`crate::word::WordSearch`].

use crate::error::Result;
use crate::{rank_descending, Search};
use lodestone_core::{Corpus, ScoredResult};
use lodestone_embed::{
    check_dimension, cosine_similarity, EmbeddingCache, EmbeddingProvider, EmbeddingStore,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Default number of documents scored per batch
const DEFAULT_BATCH_SIZE: usize = 32;

/// Tuning for [`SentenceSearch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSearchConfig {
    /// Documents scored per batch during a query pass
    pub batch_size: usize,
}

impl Default for SentenceSearchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SentenceSearchConfig {
    /// Override the scoring batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

type BlacklistFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Builder for [`SentenceSearch`]; finish with [`build`](Self::build)
pub struct SentenceSearchBuilder<K> {
    corpus: Arc<Corpus<K>>,
    provider: Arc<dyn EmbeddingProvider>,
    cache: Option<Arc<dyn EmbeddingCache>>,
    config: SentenceSearchConfig,
    blacklist: Option<BlacklistFn>,
}

impl<K> SentenceSearchBuilder<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Reuse corpus vectors through `cache`
    pub fn cache(mut self, cache: Arc<dyn EmbeddingCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Override the scoring configuration
    pub fn config(mut self, config: SentenceSearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Exclude documents whose text matches `predicate` from every result
    /// list. The predicate runs once per document at build time.
    pub fn blacklist<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.blacklist = Some(Box::new(predicate));
        self
    }

    /// Embed (or load) the corpus vectors and finish the scorer
    pub fn build(self) -> Result<SentenceSearch<K>> {
        let store = match &self.cache {
            Some(cache) => {
                EmbeddingStore::build_or_load(&self.corpus, self.provider.as_ref(), cache.as_ref())?
            }
            None => EmbeddingStore::build(&self.corpus, self.provider.as_ref())?,
        };

        let excluded_slots: FxHashSet<usize> = match &self.blacklist {
            Some(predicate) => self
                .corpus
                .texts()
                .enumerate()
                .filter(|(_, text)| predicate(text))
                .map(|(slot, _)| slot)
                .collect(),
            None => FxHashSet::default(),
        };
        if !excluded_slots.is_empty() {
            tracing::debug!(
                target: "lodestone::search",
                excluded = excluded_slots.len(),
                docs = self.corpus.len(),
                "sentence scorer blacklist resolved"
            );
        }

        Ok(SentenceSearch {
            corpus: self.corpus,
            provider: self.provider,
            store,
            excluded_slots,
            config: self.config,
        })
    }
}

/// One-vector-per-document cosine scorer.
///
/// Blacklisted documents are excluded from results before any truncation, so
/// asking for `n` results returns `n` non-blacklisted documents whenever
/// that many exist.
pub struct SentenceSearch<K> {
    corpus: Arc<Corpus<K>>,
    provider: Arc<dyn EmbeddingProvider>,
    store: EmbeddingStore,
    excluded_slots: FxHashSet<usize>,
    config: SentenceSearchConfig,
}

impl<K> SentenceSearch<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Start building a scorer over `corpus`
    pub fn builder(
        corpus: Arc<Corpus<K>>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> SentenceSearchBuilder<K> {
        SentenceSearchBuilder {
            corpus,
            provider,
            cache: None,
            config: SentenceSearchConfig::default(),
            blacklist: None,
        }
    }

    /// The corpus this scorer was built over
    pub fn corpus(&self) -> &Corpus<K> {
        &self.corpus
    }

    /// The embedding store backing this scorer
    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    /// `(key, vector)` pairs in corpus order, blacklisted documents included
    pub fn embeddings(&self) -> impl Iterator<Item = (&K, &[f32])> {
        self.corpus.keys().zip(self.store.rows())
    }
}

impl<K> Search<K> for SentenceSearch<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn search(&self, query: &str, n: Option<usize>) -> Result<Vec<ScoredResult<K>>> {
        let query_vector = self.provider.embed_one(query)?;
        check_dimension(self.store.dimension(), query_vector.len())?;

        let rows: Vec<&[f32]> = self.store.rows().collect();
        let mut scores: Vec<f64> = Vec::with_capacity(rows.len());
        for batch in rows.chunks(self.config.batch_size.max(1)) {
            scores.extend(
                batch
                    .iter()
                    .map(|row| cosine_similarity(&query_vector, row)),
            );
        }

        let results: Vec<ScoredResult<K>> = self
            .corpus
            .iter()
            .zip(scores)
            .enumerate()
            .filter(|(slot, _)| !self.excluded_slots.contains(slot))
            .map(|(_, ((key, _), score))| ScoredResult::new(key.clone(), score))
            .collect();
        Ok(rank_descending(results, n))
    }

    fn name(&self) -> &str {
        "sentence"
    }
}
