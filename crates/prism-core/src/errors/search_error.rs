/// Retrieval-path errors raised by the store or a strategy.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("vector store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("strategy {strategy} failed: {reason}")]
    StrategyFailed { strategy: String, reason: String },

    #[error("invalid filter: {reason}")]
    InvalidFilter { reason: String },
}
