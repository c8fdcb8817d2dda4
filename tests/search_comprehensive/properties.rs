//! Property-based invariants over random corpora
//!
//! The unit suites pin concrete behavior; these properties sweep random
//! inputs through the public API and check the contracts that must hold for
//! every corpus, query, and budget.

use lodestone::{
    fuse, fuse_interleaved, Corpus, FusePolicy, HashEmbedder, Highlighter, MatchRecord,
    PlaintextSearch, Search, SentenceSearch,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

proptest! {
    /// Sentence scoring ranks the whole corpus with non-increasing scores
    #[test]
    fn prop_rankings_are_exhaustive_and_sorted(
        docs in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,6}", 1..8),
        query in "[a-z]{1,8}( [a-z]{1,8}){0,3}",
    ) {
        let corpus = Arc::new(Corpus::from_texts(docs.clone()).unwrap());
        let scorer = SentenceSearch::builder(corpus, Arc::new(HashEmbedder::new(16)))
            .build()
            .unwrap();
        let results = scorer.search(&query, None).unwrap();
        prop_assert_eq!(results.len(), docs.len());
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    /// Any truncated ranking is a prefix of the full one
    #[test]
    fn prop_truncation_is_always_a_prefix(
        docs in proptest::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,4}", 1..10),
        query in "[a-z]{1,6}( [a-z]{1,6}){0,2}",
        n in 0usize..12,
    ) {
        let corpus = Arc::new(Corpus::from_texts(docs).unwrap());
        let scorer = PlaintextSearch::new(corpus);
        let full = scorer.search(&query, None).unwrap();
        let truncated = scorer.search(&query, Some(n)).unwrap();
        prop_assert_eq!(&truncated[..], &full[..full.len().min(n)]);
    }

    /// Highlight runs always rebuild the document and strictly alternate
    #[test]
    fn prop_highlight_runs_are_lossless(
        target in "[a-zA-Z0-9 ,.]{0,60}",
        query in "[a-zA-Z]{0,12}( [a-zA-Z]{1,10}){0,2}",
    ) {
        let highlighter = Highlighter::new(Arc::new(HashEmbedder::new(16)));
        let runs = highlighter.highlight(&target, &query).unwrap();
        let rebuilt: String = runs.iter().map(|run| run.text.as_str()).collect();
        prop_assert_eq!(rebuilt, target);
        for run in &runs {
            prop_assert!(!run.text.is_empty());
        }
        for pair in runs.windows(2) {
            prop_assert_ne!(pair[0].highlight, pair[1].highlight);
        }
    }

    /// Fusion emits every input id exactly once, in both presentations
    #[test]
    fn prop_fused_ids_are_unique_and_complete(
        lexical_ids in proptest::collection::vec("[a-f0-9]{4}", 0..12),
        semantic_ids in proptest::collection::vec("[a-f0-9]{4}", 0..12),
    ) {
        let lexical: Vec<MatchRecord> = lexical_ids
            .iter()
            .map(|id| MatchRecord::new(id.clone()).with_category("keyword_name"))
            .collect();
        let semantic: Vec<MatchRecord> = semantic_ids
            .iter()
            .map(|id| MatchRecord::new(id.clone()).with_category("semantic"))
            .collect();
        let expected: HashSet<&String> = lexical_ids.iter().chain(semantic_ids.iter()).collect();

        let policy = FusePolicy::default();
        let ranked = fuse(&lexical, &semantic, &policy);
        prop_assert_eq!(ranked.len(), expected.len());
        prop_assert_eq!(ranked.iter().collect::<HashSet<_>>(), expected.clone());

        let woven = fuse_interleaved(&lexical, &semantic, &policy);
        prop_assert_eq!(woven.len(), expected.len());
        prop_assert_eq!(woven.iter().collect::<HashSet<_>>(), expected);
    }
}
