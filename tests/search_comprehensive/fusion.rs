//! Hybrid fusion over real scorer output
//!
//! Lexical and semantic rankings of the fixture corpus are tagged with their
//! producing categories and merged, the way an application assembles one
//! result list from several matchers.

use crate::test_utils::{knowledge_corpus, provider};
use lodestone::{
    fuse, fuse_interleaved, FusePolicy, MatchRecord, PlaintextSearch, ScoredResult, Search,
    SentenceSearch,
};
use std::collections::HashSet;

// ============================================================================
// Test Helpers
// ============================================================================

fn records(results: &[ScoredResult<&'static str>], category: &str) -> Vec<MatchRecord> {
    results
        .iter()
        .map(|result| MatchRecord::new(result.key).with_category(category))
        .collect()
}

// ============================================================================
// Category Fusion
// ============================================================================

/// Lexical matches outrank semantic ones, and a document found by both
/// appears once at its lexical position
#[test]
fn test_fusion_prefers_keyword_matches() {
    let corpus = knowledge_corpus();
    let lexical = PlaintextSearch::new(corpus.clone())
        .search("anchor chain", None)
        .unwrap();
    let semantic = SentenceSearch::builder(corpus, provider())
        .build()
        .unwrap()
        .search("anchor chain", Some(3))
        .unwrap();

    let fused = fuse(
        &records(&lexical, "keyword_name"),
        &records(&semantic, "semantic"),
        &FusePolicy::default(),
    );

    assert_eq!(fused[0], "anchor");
    let unique: HashSet<&String> = fused.iter().collect();
    assert_eq!(unique.len(), fused.len(), "fused list repeated an id");
}

/// Records arriving over the wire fuse the same as locally built ones
#[test]
fn test_fusion_accepts_wire_records() {
    let payload = r#"[
        {"id": "doc-7", "categories": ["semantic"]},
        {"id": "doc-2", "categories": ["keyword_name"]},
        {"id": "doc-9", "categories": ["keyword_description", "semantic"]}
    ]"#;
    let parsed: Vec<MatchRecord> = serde_json::from_str(payload).unwrap();
    let fused = fuse(&parsed, &[], &FusePolicy::default());
    assert_eq!(fused, vec!["doc-2", "doc-9", "doc-7"]);
}

// ============================================================================
// Interleaved Fusion
// ============================================================================

/// Interleaving alternates windows of keyword and semantic matches
#[test]
fn test_fusion_interleaves_for_presentation() {
    let lexical: Vec<MatchRecord> = (0..5)
        .map(|i| MatchRecord::new(format!("k{}", i)).with_category("keyword_name"))
        .collect();
    let semantic: Vec<MatchRecord> = (0..5)
        .map(|i| MatchRecord::new(format!("s{}", i)).with_category("semantic"))
        .collect();

    let fused = fuse_interleaved(&lexical, &semantic, &FusePolicy::default());
    assert_eq!(
        fused,
        vec!["k0", "k1", "k2", "s0", "s1", "s2", "k3", "k4", "s3", "s4"]
    );
}

/// A full hybrid pass yields every document once, best source first
#[test]
fn test_fusion_end_to_end_hybrid_list() {
    let corpus = knowledge_corpus();
    let lexical = PlaintextSearch::new(corpus.clone())
        .search("engine coolant leak", None)
        .unwrap();
    let semantic = SentenceSearch::builder(corpus.clone(), provider())
        .build()
        .unwrap()
        .search("engine coolant leak", None)
        .unwrap();

    let policy = FusePolicy::default().with_window(2);
    let fused = fuse_interleaved(
        &records(&lexical, "keyword_name"),
        &records(&semantic, "semantic"),
        &policy,
    );

    // only the engine note shares an exact word, so it leads; the semantic
    // ranking contributes everything else exactly once
    assert_eq!(fused[0], "engine");
    assert_eq!(fused.len(), corpus.len());
    let unique: HashSet<&String> = fused.iter().collect();
    assert_eq!(unique.len(), corpus.len());
}
