//! Highlighting error types

use lodestone_embed::EmbedError;
use thiserror::Error;

/// Convenience alias for highlight operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors surfaced while computing highlights
#[derive(Debug, Error)]
pub enum HighlightError {
    /// The embedding provider failed while matching tokens semantically
    #[error("embedding failure during highlighting: {0}")]
    Embed(#[from] EmbedError),
}
