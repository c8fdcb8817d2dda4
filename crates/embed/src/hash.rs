//! Deterministic hash-based embedding provider
//!
//! [`HashEmbedder`] maps every token to a unit vector derived from the xxh3
//! hash of its text, expanded through an LCG. Identical words (case-folded)
//! always land on identical vectors, different words land on near-orthogonal
//! ones, so exact-word overlap ranks high while everything stays fully
//! deterministic with no model on disk.
//!
//! It exists for tests, benchmarks, and environments without a model, and it
//! mirrors the shape of a model-backed provider: wordpiece-style `##`
//! continuation pieces for long words, punctuation as standalone tokens, and
//! byte spans back into the source text.

use crate::context::ComputeContext;
use crate::error::Result;
use crate::provider::{EmbeddedToken, EmbeddingProvider, EmbeddingVector, TokenEmbedding};
use lodestone_core::CharSpan;
use xxhash_rust::xxh3::xxh3_64;

/// Default vector dimension for hash embeddings
pub const DEFAULT_DIMENSION: usize = 64;

/// Words longer than this many characters split into pieces
const MAX_WORD_CHARS: usize = 8;

/// Characters per wordpiece-style piece of a long word
const PIECE_CHARS: usize = 4;

/// Deterministic, model-free embedding provider.
///
/// The compute context is accepted for constructor parity with model-backed
/// providers; hashing always runs on the CPU.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    context: ComputeContext,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl HashEmbedder {
    /// Embedder producing vectors of `dimension` values
    pub fn new(dimension: usize) -> Self {
        Self::with_context(dimension, ComputeContext::default())
    }

    /// Embedder with an explicit compute context
    pub fn with_context(dimension: usize, context: ComputeContext) -> Self {
        Self { dimension, context }
    }

    /// The context this embedder was built with
    pub fn context(&self) -> &ComputeContext {
        &self.context
    }

    /// Unit vector for one token text
    fn vector_for(&self, token: &str) -> EmbeddingVector {
        let mut state = xxh3_64(token.as_bytes());
        let mut vector = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1);
            // take the upper bits; the low bits of an LCG cycle too fast
            let unit = ((state >> 11) as f64) / ((1u64 << 53) as f64);
            vector.push((unit * 2.0 - 1.0) as f32);
        }
        normalize(&mut vector);
        vector
    }

    /// Sentence vector: normalized sum of the whole-word vectors
    fn sentence_vector(&self, text: &str) -> EmbeddingVector {
        let mut acc = vec![0.0f64; self.dimension];
        let mut words = 0usize;
        for segment in segment_text(text) {
            if !segment.is_word {
                continue;
            }
            let vector = self.vector_for(&segment.lower);
            for (sum, value) in acc.iter_mut().zip(vector) {
                *sum += f64::from(value);
            }
            words += 1;
        }
        if words == 0 {
            return vec![0.0; self.dimension];
        }
        let mut vector: Vec<f32> = acc.into_iter().map(|v| v as f32).collect();
        normalize(&mut vector);
        vector
    }

    /// Emit the token(s) for one word segment, splitting long words into
    /// `##` continuation pieces with spans into the original text
    fn push_word_tokens(&self, segment: &Segment<'_>, tokens: &mut Vec<EmbeddedToken>) {
        // char-boundary byte offsets within the raw word, with the end offset
        let offsets: Vec<usize> = segment
            .raw
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(segment.raw.len()))
            .collect();
        let char_count = offsets.len() - 1;

        if char_count <= MAX_WORD_CHARS {
            tokens.push(EmbeddedToken {
                vector: self.vector_for(&segment.lower),
                text: segment.lower.clone(),
                span: segment.span,
            });
            return;
        }

        let mut piece_start = 0;
        while piece_start < char_count {
            let piece_end = (piece_start + PIECE_CHARS).min(char_count);
            let raw_piece = &segment.raw[offsets[piece_start]..offsets[piece_end]];
            let text = if piece_start == 0 {
                raw_piece.to_lowercase()
            } else {
                format!("##{}", raw_piece.to_lowercase())
            };
            tokens.push(EmbeddedToken {
                vector: self.vector_for(&text),
                text,
                span: CharSpan::new(
                    segment.span.start + offsets[piece_start],
                    segment.span.start + offsets[piece_end],
                ),
            });
            piece_start = piece_end;
        }
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
        Ok(texts
            .iter()
            .map(|text| self.sentence_vector(text))
            .collect())
    }

    fn embed_tokens(&self, text: &str) -> Result<TokenEmbedding> {
        let mut tokens = Vec::new();
        for segment in segment_text(text) {
            if segment.is_word {
                self.push_word_tokens(&segment, &mut tokens);
            } else {
                tokens.push(EmbeddedToken {
                    vector: self.vector_for(&segment.lower),
                    text: segment.lower,
                    span: segment.span,
                });
            }
        }
        Ok(TokenEmbedding { tokens })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// Scale a vector to unit norm in place; zero vectors stay zero
fn normalize(vector: &mut [f32]) {
    let norm: f64 = vector
        .iter()
        .map(|&v| f64::from(v) * f64::from(v))
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value = (f64::from(*value) / norm) as f32;
        }
    }
}

/// One word or punctuation segment of the source text
struct Segment<'a> {
    raw: &'a str,
    lower: String,
    span: CharSpan,
    is_word: bool,
}

impl<'a> Segment<'a> {
    fn word(text: &'a str, start: usize, end: usize) -> Self {
        let raw = &text[start..end];
        Segment {
            raw,
            lower: raw.to_lowercase(),
            span: CharSpan::new(start, end),
            is_word: true,
        }
    }

    fn punct(text: &'a str, start: usize, end: usize) -> Self {
        let raw = &text[start..end];
        Segment {
            raw,
            lower: raw.to_lowercase(),
            span: CharSpan::new(start, end),
            is_word: false,
        }
    }
}

/// Split on whitespace, with ASCII punctuation as standalone segments
fn segment_text(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut word_start: Option<usize> = None;

    for (offset, ch) in text.char_indices() {
        if ch.is_whitespace() || is_punctuation(ch) {
            if let Some(start) = word_start.take() {
                segments.push(Segment::word(text, start, offset));
            }
            if is_punctuation(ch) {
                segments.push(Segment::punct(text, offset, offset + ch.len_utf8()));
            }
        } else if word_start.is_none() {
            word_start = Some(offset);
        }
    }
    if let Some(start) = word_start.take() {
        segments.push(Segment::word(text, start, text.len()));
    }
    segments
}

/// ASCII punctuation, matching the splitting rules of wordpiece tokenizers
fn is_punctuation(ch: char) -> bool {
    matches!(ch, '!'..='/' | ':'..='@' | '['..='`' | '{'..='~')
}
