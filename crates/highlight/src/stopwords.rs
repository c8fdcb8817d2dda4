//! English stopword filtering
//!
//! Function words match nearly everything semantically and would wash a
//! document out with highlights, so tokens on this list never receive a
//! highlight of their own. The inventory is the standard English stopword
//! list plus the reserved sentence-framing tokens of sub-word vocabularies.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Stopword inventory, all lowercase.
///
/// Contracted forms are deliberately absent: "won", "don't", or "it's" in a
/// query carry content and must stay matchable.
const WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
    "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "to", "from", "up", "down", "in",
    "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s",
    "t", "can", "will", "just", "don", "should", "now", "[cls]", "[sep]",
];

static STOPWORDS: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| WORDS.iter().copied().collect());

/// True when `word` is a stopword; matching is case-insensitive
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

/// True when `word` deserves a highlight of its own: not a stopword, and
/// carrying at least one alphabetic character
pub fn is_highlightable(word: &str) -> bool {
    !is_stopword(word) && word.chars().any(|ch| ch.is_alphabetic())
}
