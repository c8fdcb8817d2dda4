//! Exact-word tf-idf scoring
//!
//! The lexical baseline of the pipeline: no embedding provider, no model,
//! just term frequency weighted by inverse document frequency. Useful on its
//! own for identifier-heavy corpora and as the keyword side of hybrid
//! fusion.

use crate::error::Result;
use crate::words::extract_words;
use crate::{rank_descending, Search};
use lodestone_core::{Corpus, ScoredResult};
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Exact-word tf-idf scorer.
///
/// A word's idf is `corpus_size / document_frequency`; a document scores the
/// sum of `tf * idf` over the query's words (repeats in the query count
/// again) and is returned only when its score is positive.
pub struct PlaintextSearch<K> {
    corpus: Arc<Corpus<K>>,
    // per-document word -> tf*idf, aligned with corpus order
    tf_idf: Vec<FxHashMap<String, f64>>,
}

impl<K> PlaintextSearch<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Build the tf-idf tables for `corpus`
    pub fn new(corpus: Arc<Corpus<K>>) -> Self {
        let mut tf: Vec<FxHashMap<String, f64>> = Vec::with_capacity(corpus.len());
        for text in corpus.texts() {
            let mut counts = FxHashMap::default();
            for word in extract_words(text) {
                *counts.entry(word).or_insert(0.0) += 1.0;
            }
            tf.push(counts);
        }

        let mut document_frequency: FxHashMap<String, f64> = FxHashMap::default();
        for counts in &tf {
            for word in counts.keys() {
                *document_frequency.entry(word.clone()).or_insert(0.0) += 1.0;
            }
        }

        let corpus_size = corpus.len() as f64;
        let idf: FxHashMap<String, f64> = document_frequency
            .into_iter()
            .map(|(word, df)| (word, corpus_size / df))
            .collect();

        let tf_idf = tf
            .into_iter()
            .map(|counts| {
                counts
                    .into_iter()
                    .map(|(word, count)| {
                        let weight = idf.get(&word).copied().unwrap_or(0.0);
                        (word, count * weight)
                    })
                    .collect()
            })
            .collect();

        tracing::debug!(
            target: "lodestone::search",
            docs = corpus.len(),
            "plaintext tf-idf tables built"
        );
        PlaintextSearch { corpus, tf_idf }
    }

    /// The corpus this scorer was built over
    pub fn corpus(&self) -> &Corpus<K> {
        &self.corpus
    }
}

impl<K> Search<K> for PlaintextSearch<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn search(&self, query: &str, n: Option<usize>) -> Result<Vec<ScoredResult<K>>> {
        let query_words = extract_words(query);
        let mut results = Vec::new();
        for ((key, _), doc_scores) in self.corpus.iter().zip(self.tf_idf.iter()) {
            let mut score = 0.0;
            for word in &query_words {
                score += doc_scores.get(word).copied().unwrap_or(0.0);
            }
            if score > 0.0 {
                results.push(ScoredResult::new(key.clone(), score));
            }
        }
        Ok(rank_descending(results, n))
    }

    fn name(&self) -> &str {
        "plaintext"
    }
}
