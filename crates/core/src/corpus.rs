//! Ordered, keyed document collections
//!
//! A [`Corpus`] is the unit every scorer is built over. Insertion order is
//! load-bearing: scorers report equal-scored documents in corpus order, so
//! the corpus preserves the order documents were supplied in and exposes it
//! through slot-based accessors.

use crate::error::{CorpusError, Result};
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An ordered collection of keyed, non-empty documents.
///
/// Keys must be unique and documents non-empty; both are checked at
/// construction so scorers never have to revalidate.
#[derive(Debug, Clone)]
pub struct Corpus<K> {
    entries: Vec<(K, String)>,
    index: FxHashMap<K, usize>,
}

impl<K> Corpus<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Build a corpus from `(key, document)` pairs.
    ///
    /// The first empty document or duplicated key is reported as an error.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, String)>,
    {
        let entries: Vec<(K, String)> = entries.into_iter().collect();
        let mut index =
            FxHashMap::with_capacity_and_hasher(entries.len(), Default::default());
        for (slot, (key, text)) in entries.iter().enumerate() {
            if text.is_empty() {
                return Err(CorpusError::EmptyDocument {
                    key: format!("{:?}", key),
                });
            }
            if index.insert(key.clone(), slot).is_some() {
                return Err(CorpusError::DuplicateKey {
                    key: format!("{:?}", key),
                });
            }
        }
        Ok(Corpus { entries, index })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Document stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Key at insertion position `slot`.
    pub fn key_at(&self, slot: usize) -> Option<&K> {
        self.entries.get(slot).map(|(key, _)| key)
    }

    /// Document at insertion position `slot`.
    pub fn text_at(&self, slot: usize) -> Option<&str> {
        self.entries.get(slot).map(|(_, text)| text.as_str())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Documents in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, text)| text.as_str())
    }

    /// `(key, document)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.entries.iter().map(|(key, text)| (key, text.as_str()))
    }

    /// Split every document into fixed-size character windows, keyed by
    /// `(key, window_index)`.
    ///
    /// Windows never split a character; the last window of a document may be
    /// short. Window indexes start at zero for each document, and windows
    /// inherit the document order of the source corpus.
    pub fn chunked(&self, window: usize) -> Result<Corpus<(K, usize)>> {
        let window = window.max(1);
        let mut windows = Vec::new();
        for (key, text) in self.iter() {
            let chars: Vec<char> = text.chars().collect();
            for (wi, piece) in chars.chunks(window).enumerate() {
                windows.push(((key.clone(), wi), piece.iter().collect::<String>()));
            }
        }
        Corpus::new(windows)
    }
}

impl Corpus<usize> {
    /// Corpus keyed by position, for callers without natural keys.
    pub fn from_texts<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Corpus::new(
            texts
                .into_iter()
                .enumerate()
                .map(|(slot, text)| (slot, text.into())),
        )
    }
}
