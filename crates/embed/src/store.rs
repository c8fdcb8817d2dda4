//! Fingerprint-checked corpus embedding store
//!
//! [`EmbeddingStore::build_or_load`] is the one path scorers use to get
//! corpus vectors: fingerprint the corpus, try the cache, validate whatever
//! came back, and recompute through the provider when anything is off. A
//! cache that fails to load or persist costs a recompute and a warning,
//! never wrong data and never a hard failure.

use crate::cache::{CorpusFingerprint, EmbeddingBlob, EmbeddingCache};
use crate::error::Result;
use crate::provider::EmbeddingProvider;
use lodestone_core::Corpus;
use std::fmt::Debug;
use std::hash::Hash;

/// One embedding row per corpus document, in corpus order.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    blob: EmbeddingBlob,
    fingerprint: CorpusFingerprint,
}

impl EmbeddingStore {
    /// Embed `corpus` through `provider`, without any cache.
    pub fn build<K>(corpus: &Corpus<K>, provider: &dyn EmbeddingProvider) -> Result<Self>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let fingerprint = CorpusFingerprint::of_corpus(corpus);
        let blob = Self::compute(corpus, provider)?;
        Ok(EmbeddingStore { blob, fingerprint })
    }

    /// Load corpus vectors from `cache`, recomputing on miss, mismatch, or
    /// corruption, and persisting after a recompute.
    pub fn build_or_load<K>(
        corpus: &Corpus<K>,
        provider: &dyn EmbeddingProvider,
        cache: &dyn EmbeddingCache,
    ) -> Result<Self>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let fingerprint = CorpusFingerprint::of_corpus(corpus);

        match cache.load(&fingerprint) {
            Ok(Some(blob)) => {
                if blob_matches(&blob, corpus.len(), provider.dimension()) {
                    tracing::debug!(
                        target: "lodestone::embed",
                        cache = cache.name(),
                        fingerprint = %fingerprint,
                        "corpus embeddings loaded from cache"
                    );
                    return Ok(EmbeddingStore { blob, fingerprint });
                }
                tracing::warn!(
                    target: "lodestone::embed",
                    cache = cache.name(),
                    fingerprint = %fingerprint,
                    rows = blob.row_count(),
                    expected_rows = corpus.len(),
                    dimension = blob.dimension(),
                    expected_dimension = provider.dimension(),
                    "discarding cached embeddings with the wrong shape"
                );
            }
            Ok(None) => {
                tracing::debug!(
                    target: "lodestone::embed",
                    cache = cache.name(),
                    fingerprint = %fingerprint,
                    "no cached embeddings for this corpus"
                );
            }
            Err(e) => {
                tracing::warn!(
                    target: "lodestone::embed",
                    cache = cache.name(),
                    fingerprint = %fingerprint,
                    error = %e,
                    "discarding unreadable embedding cache entry"
                );
            }
        }

        let blob = Self::compute(corpus, provider)?;
        if let Err(e) = cache.save(&fingerprint, &blob) {
            tracing::warn!(
                target: "lodestone::embed",
                cache = cache.name(),
                fingerprint = %fingerprint,
                error = %e,
                "failed to persist corpus embeddings"
            );
        }
        Ok(EmbeddingStore { blob, fingerprint })
    }

    fn compute<K>(corpus: &Corpus<K>, provider: &dyn EmbeddingProvider) -> Result<EmbeddingBlob>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let texts: Vec<&str> = corpus.texts().collect();
        tracing::info!(
            target: "lodestone::embed",
            provider = provider.name(),
            docs = texts.len(),
            "computing corpus embeddings"
        );
        let rows = provider.embed(&texts)?;
        EmbeddingBlob::from_rows(provider.dimension(), rows)
    }

    /// Fingerprint of the corpus these vectors belong to
    pub fn fingerprint(&self) -> &CorpusFingerprint {
        &self.fingerprint
    }

    /// Vector dimension
    pub fn dimension(&self) -> usize {
        self.blob.dimension()
    }

    /// Number of document rows
    pub fn row_count(&self) -> usize {
        self.blob.row_count()
    }

    /// Row for document `index`, if present
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.blob.row(index)
    }

    /// Rows in corpus order
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.blob.rows()
    }

    /// The underlying blob, for persistence outside the cache trait
    pub fn blob(&self) -> &EmbeddingBlob {
        &self.blob
    }
}

/// A cached blob is usable only when its shape matches the corpus and
/// provider asking for it. Zero-row blobs skip the dimension check so an
/// empty corpus round-trips through caches written at any dimension.
fn blob_matches(blob: &EmbeddingBlob, expected_rows: usize, expected_dimension: usize) -> bool {
    blob.row_count() == expected_rows
        && (blob.row_count() == 0 || blob.dimension() == expected_dimension)
}
