//! Span definitions per operation: search, strategy, embedding.

/// Create a span covering one orchestrated search.
#[macro_export]
macro_rules! search_span {
    ($query_id:expr, $mode:expr) => {
        tracing::info_span!("prism.search", query_id = %$query_id, mode = %$mode)
    };
}

/// Create a span covering one retrieval strategy.
#[macro_export]
macro_rules! strategy_span {
    ($strategy:expr) => {
        tracing::debug_span!("prism.strategy", strategy = %$strategy)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($model:expr) => {
        tracing::debug_span!("prism.embedding", model = %$model)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "prism.search";
    pub const STRATEGY: &str = "prism.strategy";
    pub const EMBEDDING: &str = "prism.embedding";
}
