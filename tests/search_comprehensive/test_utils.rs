//! Shared fixtures and helpers for the comprehensive suite

use lodestone::{
    Corpus, EmbedError, EmbeddingProvider, EmbeddingVector, HashEmbedder, ScoredResult,
    TokenEmbedding,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Embedding dimension used throughout the suite
pub const DIMENSION: usize = 32;

/// Install a test subscriber so traced paths show up under `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Fixture corpus: one short maintenance note per boat system
pub fn knowledge_corpus() -> Arc<Corpus<&'static str>> {
    let entries = [
        ("mooring", "secure the mooring lines before the tide turns"),
        ("engine", "the diesel engine overheats when the coolant runs low"),
        ("galley", "the galley stove must be off while refueling"),
        ("charts", "paper charts back up the chartplotter on long passages"),
        ("anchor", "set the anchor with enough chain for the depth"),
        ("radio", "call the harbormaster on the radio before entering port"),
        ("sails", "reef the sails early when the wind keeps building"),
        ("bilge", "check the bilge pump float switch every month"),
    ];
    Arc::new(
        Corpus::new(entries.into_iter().map(|(key, text)| (key, text.to_string()))).unwrap(),
    )
}

/// Fresh hash provider at the suite dimension
pub fn provider() -> Arc<HashEmbedder> {
    Arc::new(HashEmbedder::new(DIMENSION))
}

/// Wraps [`HashEmbedder`] and counts every sentence-level embedding request;
/// cache tests use the count to prove work was (or was not) redone
pub struct CountingProvider {
    inner: HashEmbedder,
    texts_embedded: AtomicUsize,
}

impl CountingProvider {
    /// Counting provider at `dimension`
    pub fn new(dimension: usize) -> Self {
        Self {
            inner: HashEmbedder::new(dimension),
            texts_embedded: AtomicUsize::new(0),
        }
    }

    /// Texts embedded through [`EmbeddingProvider::embed`] so far
    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for CountingProvider {
    fn embed(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed(texts)
    }

    fn embed_tokens(&self, text: &str) -> Result<TokenEmbedding, EmbedError> {
        self.inner.embed_tokens(text)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn name(&self) -> &str {
        "counting-hash"
    }
}

/// Keys of a ranked result list, in order
pub fn ranked_keys<K: Clone>(results: &[ScoredResult<K>]) -> Vec<K> {
    results.iter().map(|result| result.key.clone()).collect()
}

/// Assert every adjacent score pair is non-increasing
pub fn assert_descending<K>(results: &[ScoredResult<K>]) {
    for pair in results.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "scores out of order: {} before {}",
            pair[0].score,
            pair[1].score
        );
    }
}
