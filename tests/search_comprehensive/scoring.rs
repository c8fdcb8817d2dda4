//! Cross-scorer contract
//!
//! Every scorer ranks the same fixture corpus; these tests pin the behavior
//! they all share: full rankings, descending scores, corpus order on ties,
//! truncation as a prefix of the full list, and bit-for-bit determinism.

use crate::test_utils::{
    assert_descending, init_tracing, knowledge_corpus, provider, ranked_keys,
};
use lodestone::{
    Corpus, PlaintextSearch, Search, SentenceSearch, WordSearch, WordSearchConfig,
};
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn scorers() -> Vec<Box<dyn Search<&'static str>>> {
    let corpus = knowledge_corpus();
    vec![
        Box::new(PlaintextSearch::new(corpus.clone())),
        Box::new(WordSearch::new(corpus.clone(), provider()).unwrap()),
        Box::new(SentenceSearch::builder(corpus, provider()).build().unwrap()),
    ]
}

// ============================================================================
// Ranking Correctness
// ============================================================================

/// Plaintext scoring keeps only documents sharing a query word
#[test]
fn test_scoring_plaintext_ranks_exact_overlap_first() {
    let scorer = PlaintextSearch::new(knowledge_corpus());
    let results = scorer.search("anchor chain depth", None).unwrap();
    assert_eq!(ranked_keys(&results), vec!["anchor"]);
    assert!(results[0].score > 0.0);
}

/// Word-level scoring ranks the document with the most token overlap first
/// and still scores the whole corpus
#[test]
fn test_scoring_word_search_favors_token_overlap() {
    let scorer =
        WordSearch::new(knowledge_corpus(), Arc::new(lodestone::HashEmbedder::new(128))).unwrap();
    let results = scorer.search("diesel engine overheats coolant", None).unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(results[0].key, "engine");
    assert_descending(&results);
}

/// Sentence scoring agrees with word scoring on a clear winner
#[test]
fn test_scoring_sentence_agrees_on_the_clear_winner() {
    let scorer =
        SentenceSearch::builder(knowledge_corpus(), Arc::new(lodestone::HashEmbedder::new(128)))
            .build()
            .unwrap();
    let results = scorer.search("diesel engine overheats coolant", None).unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(results[0].key, "engine");
    assert_descending(&results);
}

/// Documents with identical scores keep their corpus order
#[test]
fn test_scoring_ties_keep_corpus_order() {
    let corpus = Arc::new(
        Corpus::new([
            ("first", "alpha beta".to_string()),
            ("second", "alpha gamma".to_string()),
            ("third", "alpha delta".to_string()),
        ])
        .unwrap(),
    );
    let scorer = PlaintextSearch::new(corpus);
    let results = scorer.search("alpha", None).unwrap();
    assert_eq!(ranked_keys(&results), vec!["first", "second", "third"]);
    assert!(results.windows(2).all(|pair| pair[0].score == pair[1].score));
}

// ============================================================================
// Shared Contract
// ============================================================================

/// Running the same query twice returns bit-identical results
#[test]
fn test_scoring_rankings_are_deterministic() {
    init_tracing();
    for scorer in scorers() {
        let first = scorer.search("secure the lines before the tide", None).unwrap();
        let second = scorer.search("secure the lines before the tide", None).unwrap();
        assert_eq!(first, second, "{} ranking drifted between runs", scorer.name());
    }
}

/// A truncated result list is always a prefix of the full one
#[test]
fn test_scoring_truncation_is_a_prefix() {
    for scorer in scorers() {
        let full = scorer.search("engine coolant", None).unwrap();
        let top = scorer.search("engine coolant", Some(3)).unwrap();
        let expected = &full[..full.len().min(3)];
        assert_eq!(top, expected, "{} truncation is not a prefix", scorer.name());
    }
}

/// Scorers are interchangeable behind the Search trait
#[test]
fn test_scoring_trait_objects_interchange() {
    let names: Vec<String> = scorers().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(names, vec!["plaintext", "word", "sentence"]);
    for scorer in scorers() {
        let results = scorer.search("harbormaster radio", Some(5)).unwrap();
        assert!(results.len() <= 5);
        assert_descending(&results);
    }
}

/// The chunk budget changes memory use, never scores or order
#[test]
fn test_scoring_chunk_budget_never_changes_scores() {
    let corpus = knowledge_corpus();
    let reference = WordSearch::new(corpus.clone(), provider()).unwrap();
    let expected = reference.search("coolant runs low", None).unwrap();

    for base in [0, 1, 7, 10_000] {
        let scorer = WordSearch::with_config(
            corpus.clone(),
            provider(),
            WordSearchConfig::default().with_base_chunk_size(base),
        )
        .unwrap();
        let results = scorer.search("coolant runs low", None).unwrap();
        assert_eq!(ranked_keys(&results), ranked_keys(&expected));
        for (got, want) in results.iter().zip(expected.iter()) {
            assert!(
                (got.score - want.score).abs() < 1e-9,
                "chunk budget {} moved a score: {} vs {}",
                base,
                got.score,
                want.score
            );
        }
    }
}
