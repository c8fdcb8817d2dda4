//! Error types for search scoring

use lodestone_embed::EmbedError;
use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised while building or querying a scorer
#[derive(Debug, Error)]
pub enum SearchError {
    /// The embedding layer failed
    #[error("embedding failure during search: {0}")]
    Embed(#[from] EmbedError),
}
