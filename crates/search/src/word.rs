//! Token-granularity neural tf-idf scoring
//!
//! Every corpus document is embedded once at token granularity. At query
//! time each query token is compared against each document token by cosine
//! similarity, and the classic tf-idf recipe is rebuilt from those soft
//! signals:
//!
//! - tf of a query token in a document: the sum of its similarities to the
//!   document's tokens
//! - idf of a query token: the corpus size divided by the sum, over
//!   documents, of its best similarity in each document; a token whose
//!   aggregate is not positive contributes nothing
//!
//! A document's score is the sum over query tokens of `tf * log2(idf)`.
//!
//! The similarity tensor for a whole corpus does not fit in memory at scale,
//! so documents are processed in chunks sized off a fixed element budget.
//! Chunking bounds peak memory only; scores are identical for every chunk
//! size.

use crate::error::Result;
use crate::{rank_descending, Search};
use lodestone_core::{Corpus, ScoredResult};
use lodestone_embed::{
    check_dimension, cosine_similarity, EmbeddingProvider, TokenEmbedding,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Default scale factor for the chunk-size budget
pub const DEFAULT_BASE_CHUNK_SIZE: usize = 100;

/// Tuning for [`WordSearch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSearchConfig {
    /// Scale factor for the per-chunk similarity budget. The chunk size is
    /// `base_chunk_size * 2^32` divided by the total similarity element
    /// count, clamped to at least one document per chunk; zero forces
    /// one-document chunks.
    pub base_chunk_size: usize,
}

impl Default for WordSearchConfig {
    fn default() -> Self {
        Self {
            base_chunk_size: DEFAULT_BASE_CHUNK_SIZE,
        }
    }
}

impl WordSearchConfig {
    /// Override the chunk budget scale factor
    pub fn with_base_chunk_size(mut self, base_chunk_size: usize) -> Self {
        self.base_chunk_size = base_chunk_size;
        self
    }
}

/// Token-granularity neural tf-idf scorer.
///
/// Construction embeds the whole corpus at token granularity and keeps the
/// per-document token matrices, unpadded. Queries embed only the query.
pub struct WordSearch<K> {
    corpus: Arc<Corpus<K>>,
    provider: Arc<dyn EmbeddingProvider>,
    doc_tokens: Vec<TokenEmbedding>,
    max_doc_len: usize,
    config: WordSearchConfig,
}

impl<K> WordSearch<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Embed every corpus document at token granularity
    pub fn new(corpus: Arc<Corpus<K>>, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        Self::with_config(corpus, provider, WordSearchConfig::default())
    }

    /// [`WordSearch::new`] with explicit tuning
    pub fn with_config(
        corpus: Arc<Corpus<K>>,
        provider: Arc<dyn EmbeddingProvider>,
        config: WordSearchConfig,
    ) -> Result<Self> {
        let dimension = provider.dimension();
        let mut doc_tokens = Vec::with_capacity(corpus.len());
        for text in corpus.texts() {
            let tokens = provider.embed_tokens(text)?;
            for token in &tokens.tokens {
                check_dimension(dimension, token.vector.len())?;
            }
            doc_tokens.push(tokens);
        }
        let max_doc_len = doc_tokens.iter().map(TokenEmbedding::len).max().unwrap_or(0);
        tracing::debug!(
            target: "lodestone::search",
            docs = doc_tokens.len(),
            max_doc_len,
            "token corpus embedded"
        );
        Ok(WordSearch {
            corpus,
            provider,
            doc_tokens,
            max_doc_len,
            config,
        })
    }

    /// The corpus this scorer was built over
    pub fn corpus(&self) -> &Corpus<K> {
        &self.corpus
    }

    /// Documents per chunk for a query of `query_len` tokens.
    ///
    /// The budget counts similarity elements: corpus size times the longest
    /// document's token count times the query's token count.
    fn chunk_size(&self, query_len: usize) -> usize {
        let total = (self.doc_tokens.len() as u128)
            * (self.max_doc_len as u128)
            * (query_len as u128);
        if total == 0 {
            return self.doc_tokens.len().max(1);
        }
        let budget = (self.config.base_chunk_size as u128) << 32;
        ((budget / total).min(usize::MAX as u128) as usize).max(1)
    }
}

impl<K> Search<K> for WordSearch<K>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn search(&self, query: &str, n: Option<usize>) -> Result<Vec<ScoredResult<K>>> {
        let query_tokens = self.provider.embed_tokens(query)?;
        for token in &query_tokens.tokens {
            check_dimension(self.provider.dimension(), token.vector.len())?;
        }
        let query_len = query_tokens.len();
        let corpus_size = self.doc_tokens.len();
        if corpus_size == 0 {
            return Ok(Vec::new());
        }

        let chunk = self.chunk_size(query_len);
        // idf aggregate per query token: best similarity in each document,
        // summed over documents
        let mut idf_sums = vec![0.0f64; query_len];
        // tf per document and query token
        let mut tf_rows: Vec<Vec<f64>> = Vec::with_capacity(corpus_size);

        for chunk_docs in self.doc_tokens.chunks(chunk) {
            // materialize this chunk's similarity block: [doc][query][token]
            let mut scores: Vec<Vec<Vec<f64>>> = Vec::with_capacity(chunk_docs.len());
            for doc in chunk_docs {
                let mut doc_scores = Vec::with_capacity(query_len);
                for query_token in &query_tokens.tokens {
                    let row: Vec<f64> = doc
                        .tokens
                        .iter()
                        .map(|doc_token| {
                            cosine_similarity(&query_token.vector, &doc_token.vector)
                        })
                        .collect();
                    doc_scores.push(row);
                }
                scores.push(doc_scores);
            }

            for doc_scores in &scores {
                tf_rows.push(
                    doc_scores
                        .iter()
                        .map(|row| row.iter().sum::<f64>())
                        .collect(),
                );
                for (qi, row) in doc_scores.iter().enumerate() {
                    if !row.is_empty() {
                        idf_sums[qi] +=
                            row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    }
                }
            }
        }

        let corpus_f = corpus_size as f64;
        // a query token with no positive aggregate had no document token to
        // resemble; it contributes nothing instead of an infinite idf
        let idf: Vec<f64> = idf_sums
            .iter()
            .map(|&sum| if sum > 0.0 { (corpus_f / sum).log2() } else { 0.0 })
            .collect();

        let mut results = Vec::with_capacity(corpus_size);
        for ((key, _), tf_row) in self.corpus.iter().zip(tf_rows) {
            let score: f64 = tf_row
                .iter()
                .zip(idf.iter())
                .map(|(tf, idf)| tf * idf)
                .sum();
            results.push(ScoredResult::new(key.clone(), score));
        }

        tracing::debug!(
            target: "lodestone::search",
            chunks = (corpus_size + chunk - 1) / chunk,
            chunk_size = chunk,
            query_tokens = query_len,
            "word scoring pass complete"
        );
        Ok(rank_descending(results, n))
    }

    fn name(&self) -> &str {
        "word"
    }
}
