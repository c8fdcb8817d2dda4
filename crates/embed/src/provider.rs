//! The embedding provider contract
//!
//! A provider turns text into vectors at two granularities: one vector per
//! text ([`EmbeddingProvider::embed`]) and one vector per token
//! ([`EmbeddingProvider::embed_tokens`]). Token embeddings carry the byte
//! span each token came from, which is what lets highlighters map similarity
//! hits back onto the source string.

use crate::error::{EmbedError, Result};
use lodestone_core::CharSpan;
use serde::{Deserialize, Serialize};

/// A dense embedding vector
pub type EmbeddingVector = Vec<f32>;

/// One token of an embedded text: its text, vector, and source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedToken {
    /// Token text; continuation pieces keep their `##` prefix
    pub text: String,
    /// Embedding vector for this token
    pub vector: EmbeddingVector,
    /// Byte span of the token in the source text
    pub span: CharSpan,
}

/// Token-level embedding of one text.
///
/// Holds only tokens that map to real characters of the source; providers
/// must not emit synthetic control tokens here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenEmbedding {
    /// Tokens in source order
    pub tokens: Vec<EmbeddedToken>,
}

impl TokenEmbedding {
    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the text produced no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token texts in source order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|token| token.text.as_str())
    }

    /// True when token `index` is a `##` continuation piece.
    ///
    /// Out-of-range indexes are not continuations, which lets boundary walks
    /// probe one past either end without a bounds check.
    pub fn is_continuation(&self, index: usize) -> bool {
        self.tokens
            .get(index)
            .map_or(false, |token| token.text.starts_with("##"))
    }
}

/// Turns text into embedding vectors.
///
/// Implementations must be deterministic for a given input and must produce
/// vectors of exactly [`dimension`](EmbeddingProvider::dimension) values.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed each text into one vector, in input order
    fn embed(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>>;

    /// Embed one text at token granularity
    fn embed_tokens(&self, text: &str) -> Result<TokenEmbedding>;

    /// Dimension of every vector this provider produces
    fn dimension(&self) -> usize;

    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Embed a single text, checking that exactly one vector comes back
    fn embed_one(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vectors = self.embed(&[text])?;
        let produced = vectors.len();
        match vectors.pop() {
            Some(vector) if produced == 1 => Ok(vector),
            _ => Err(EmbedError::Unavailable {
                reason: format!(
                    "provider {} returned {} vectors for a single text",
                    self.name(),
                    produced
                ),
            }),
        }
    }
}
