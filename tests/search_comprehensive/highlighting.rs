//! Search-then-highlight round trips
//!
//! After ranking, applications show the winning documents with their matches
//! marked. These tests run that full path: query the fixture corpus, then
//! highlight the winning text and render it.

use crate::test_utils::{knowledge_corpus, provider, ranked_keys};
use lodestone::{
    render_ansi, AnsiStyle, HighlightConfig, Highlighter, PlaintextSearch, Search,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Highlighter whose semantic matcher only fires on identical tokens
fn strict_highlighter() -> Highlighter {
    Highlighter::with_config(provider(), HighlightConfig::default().with_threshold(0.99))
}

/// Highlighter with the semantic matcher disabled outright
fn exact_only_highlighter() -> Highlighter {
    Highlighter::with_config(provider(), HighlightConfig::default().with_threshold(1.5))
}

fn rebuild(runs: &[lodestone::HighlightRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

// ============================================================================
// Round Trips
// ============================================================================

/// The winning document comes back with each query word marked
#[test]
fn test_highlighting_explains_the_winning_document() {
    let corpus = knowledge_corpus();
    let query = "anchor chain depth";
    let winner = PlaintextSearch::new(corpus.clone()).search(query, Some(1)).unwrap();
    assert_eq!(ranked_keys(&winner), vec!["anchor"]);

    let text = corpus.get(&"anchor").unwrap();
    let runs = strict_highlighter().highlight(text, query).unwrap();

    let marked: Vec<&str> = runs
        .iter()
        .filter(|run| run.highlight)
        .map(|run| run.text.as_str())
        .collect();
    assert_eq!(marked, vec!["anchor", "chain", "depth"]);
    assert_eq!(rebuild(&runs), text);
}

/// Highlighting any document is lossless, matched or not
#[test]
fn test_highlighting_runs_rebuild_every_document() {
    let corpus = knowledge_corpus();
    let texts: Vec<&str> = corpus.texts().collect();
    let highlighter = Highlighter::new(provider());

    let all_runs = highlighter.highlight_many(&texts, "engine coolant").unwrap();
    assert_eq!(all_runs.len(), corpus.len());
    for (runs, text) in all_runs.iter().zip(texts.iter()) {
        assert_eq!(rebuild(runs), *text);
    }

    // the engine note must carry a mark around its exact matches
    let engine_runs = &all_runs[1];
    assert!(engine_runs
        .iter()
        .any(|run| run.highlight && run.text.contains("engine")));
}

// ============================================================================
// Rendering
// ============================================================================

/// Highlighted runs render as SGR escapes around the matched text
#[test]
fn test_highlighting_ansi_rendering() {
    let corpus = knowledge_corpus();
    let text = corpus.get(&"radio").unwrap();
    let runs = exact_only_highlighter().highlight(text, "radio").unwrap();
    assert_eq!(
        render_ansi(&runs, AnsiStyle::default()),
        "call the harbormaster on the \x1b[30;107mradio\x1b[0m before entering port"
    );
}

/// A query of nothing but stopwords marks nothing
#[test]
fn test_highlighting_stopword_query_stays_plain() {
    let corpus = knowledge_corpus();
    let text = corpus.get(&"galley").unwrap();
    let runs = exact_only_highlighter().highlight(text, "the while").unwrap();
    assert_eq!(runs.len(), 1);
    assert!(!runs[0].highlight);
    assert_eq!(runs[0].text, text);
}

/// Multibyte text highlights on character boundaries
#[test]
fn test_highlighting_multibyte_documents() {
    let text = "the naïve café guest";
    let runs = exact_only_highlighter().highlight(text, "naïve").unwrap();
    assert_eq!(rebuild(&runs), text);
    let marked: Vec<&str> = runs
        .iter()
        .filter(|run| run.highlight)
        .map(|run| run.text.as_str())
        .collect();
    assert_eq!(marked, vec!["naïve"]);
}
