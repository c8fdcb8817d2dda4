//! Embedding cache behavior through the public API
//!
//! The sentence scorer owns the only expensive per-corpus work, so these
//! tests pin when that work is reused and when it must be redone.

use crate::test_utils::{init_tracing, knowledge_corpus, CountingProvider, DIMENSION};
use lodestone::{Corpus, DirectoryCache, MemoryCache, Search, SentenceSearch};
use std::sync::Arc;

// ============================================================================
// Warm Starts
// ============================================================================

/// A second build over the same corpus loads vectors from disk instead of
/// embedding again, and ranks identically
#[test]
fn test_caching_warm_start_skips_recompute() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let corpus = knowledge_corpus();

    let cold = Arc::new(CountingProvider::new(DIMENSION));
    let scorer = SentenceSearch::builder(corpus.clone(), cold.clone())
        .cache(Arc::new(DirectoryCache::new(dir.path())))
        .build()
        .unwrap();
    assert_eq!(cold.texts_embedded(), corpus.len());

    // fresh cache handle over the same directory, as a new process would have
    let warm = Arc::new(CountingProvider::new(DIMENSION));
    let reloaded = SentenceSearch::builder(corpus.clone(), warm.clone())
        .cache(Arc::new(DirectoryCache::new(dir.path())))
        .build()
        .unwrap();
    assert_eq!(warm.texts_embedded(), 0, "warm build re-embedded the corpus");

    let query = "diesel engine coolant";
    assert_eq!(
        scorer.search(query, None).unwrap(),
        reloaded.search(query, None).unwrap()
    );
}

/// A memory cache shared between builders serves the second one
#[test]
fn test_caching_memory_cache_within_process() {
    let cache = Arc::new(MemoryCache::new());
    let corpus = knowledge_corpus();

    let first = Arc::new(CountingProvider::new(DIMENSION));
    SentenceSearch::builder(corpus.clone(), first.clone())
        .cache(cache.clone())
        .build()
        .unwrap();
    assert_eq!(first.texts_embedded(), corpus.len());
    assert_eq!(cache.len(), 1);

    let second = Arc::new(CountingProvider::new(DIMENSION));
    SentenceSearch::builder(corpus, second.clone())
        .cache(cache.clone())
        .build()
        .unwrap();
    assert_eq!(second.texts_embedded(), 0);
    assert_eq!(cache.len(), 1);
}

// ============================================================================
// Invalidation
// ============================================================================

/// Changing any document text misses the cache; the untouched corpus keeps
/// its own entry alongside the new one
#[test]
fn test_caching_corpus_change_invalidates() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(DirectoryCache::new(dir.path()));
    let original = knowledge_corpus();

    let seed = Arc::new(CountingProvider::new(DIMENSION));
    SentenceSearch::builder(original.clone(), seed.clone())
        .cache(cache.clone())
        .build()
        .unwrap();
    assert_eq!(seed.texts_embedded(), original.len());

    let edited = Arc::new(
        Corpus::new([
            ("engine", "the outboard seized after the winter".to_string()),
            ("galley", "the galley stove must be off while refueling".to_string()),
        ])
        .unwrap(),
    );
    let fresh = Arc::new(CountingProvider::new(DIMENSION));
    SentenceSearch::builder(edited.clone(), fresh.clone())
        .cache(cache.clone())
        .build()
        .unwrap();
    assert_eq!(fresh.texts_embedded(), edited.len());

    // the original corpus still warm-starts from its own entry
    let back = Arc::new(CountingProvider::new(DIMENSION));
    SentenceSearch::builder(original, back.clone())
        .cache(cache)
        .build()
        .unwrap();
    assert_eq!(back.texts_embedded(), 0);
}

/// A provider with a different dimension cannot use cached vectors
#[test]
fn test_caching_dimension_change_recomputes() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = knowledge_corpus();

    let wide = Arc::new(CountingProvider::new(DIMENSION));
    SentenceSearch::builder(corpus.clone(), wide.clone())
        .cache(Arc::new(DirectoryCache::new(dir.path())))
        .build()
        .unwrap();
    assert_eq!(wide.texts_embedded(), corpus.len());

    let narrow = Arc::new(CountingProvider::new(DIMENSION / 2));
    SentenceSearch::builder(corpus.clone(), narrow.clone())
        .cache(Arc::new(DirectoryCache::new(dir.path())))
        .build()
        .unwrap();
    assert_eq!(
        narrow.texts_embedded(),
        corpus.len(),
        "a cached blob of the wrong shape must not be served"
    );

    // the replacement entry now serves the narrow provider
    let narrow_again = Arc::new(CountingProvider::new(DIMENSION / 2));
    SentenceSearch::builder(corpus, narrow_again.clone())
        .cache(Arc::new(DirectoryCache::new(dir.path())))
        .build()
        .unwrap();
    assert_eq!(narrow_again.texts_embedded(), 0);
}
