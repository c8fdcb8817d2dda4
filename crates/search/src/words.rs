//! Word extraction for lexical scoring
//!
//! # Examples
//!
//! ```
//! use lodestone_search::words::extract_words;
//!
//! let words = extract_words("The quick-witted FOX, again!");
//! assert_eq!(words, vec!["the", "quick", "witted", "fox", "again"]);
//! ```

use rustc_hash::FxHashSet;

/// Lowercased maximal runs of alphanumeric or underscore characters, in
/// source order, repeats included.
pub fn extract_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            for lower in ch.to_lowercase() {
                current.push(lower);
            }
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Like [`extract_words`], keeping only the first occurrence of each word.
///
/// ```
/// use lodestone_search::words::extract_unique_words;
///
/// let words = extract_unique_words("to be or not to be");
/// assert_eq!(words, vec!["to", "be", "or", "not"]);
/// ```
pub fn extract_unique_words(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    extract_words(text)
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
