//! Error taxonomy. Subsystem errors fold into [`PrismError`].

mod embedding_error;
mod search_error;

pub use embedding_error::EmbeddingError;
pub use search_error::SearchError;

/// Crate-wide result alias.
pub type PrismResult<T> = Result<T, PrismError>;

/// Top-level error for every Prism operation.
#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("unknown search mode: {mode}")]
    UnknownMode { mode: String },

    #[error("invalid content type: {value}")]
    InvalidContentType { value: String },

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl PrismError {
    /// Fatal errors abort the request. Everything else is reported on the
    /// response's `error` field with empty results.
    pub fn is_fatal(&self) -> bool {
        match self {
            PrismError::Embedding(EmbeddingError::Exhausted { .. }) => true,
            PrismError::Embedding(EmbeddingError::UnknownModel { .. }) => true,
            PrismError::Embedding(_) => false,
            PrismError::Search(_) => false,
            PrismError::UnknownMode { .. } => true,
            PrismError::InvalidContentType { .. } => true,
            PrismError::Config { .. } => true,
            PrismError::Serialization { .. } => false,
        }
    }
}

impl From<serde_json::Error> for PrismError {
    fn from(e: serde_json::Error) -> Self {
        PrismError::Serialization {
            reason: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for PrismError {
    fn from(e: toml::de::Error) -> Self {
        PrismError::Config {
            reason: e.to_string(),
        }
    }
}
