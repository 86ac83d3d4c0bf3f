//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log an embedding model fallback.
pub fn embedding_fallback(selected: &str, fallback: &str, failure: &str) {
    tracing::warn!(
        event = "embedding_fallback",
        selected = %selected,
        fallback = %fallback,
        failure = %failure,
        "embedding model fell back"
    );
}

/// Log a rewrite of a model's declared dimension.
pub fn dimension_degraded(model: &str, declared: usize, observed: usize) {
    tracing::warn!(
        event = "dimension_degraded",
        model = %model,
        declared = declared,
        observed = observed,
        "embedding dimension differs from declared; declared dimension rewritten"
    );
}

/// Log an embedding below the quality threshold.
pub fn low_confidence_embedding(model: &str, confidence: f64, threshold: f64) {
    tracing::debug!(
        event = "low_confidence_embedding",
        model = %model,
        confidence = confidence,
        threshold = threshold,
        "embedding confidence below threshold"
    );
}

/// Log a partial strategy failure.
pub fn strategy_failed(strategy: &str, scope: &str, reason: &str) {
    tracing::warn!(
        event = "strategy_failed",
        strategy = %strategy,
        scope = %scope,
        reason = %reason,
        "strategy sub-search failed; continuing without it"
    );
}

/// Log a completed search.
pub fn search_completed(mode: &str, result_count: usize, total_time_ms: f64, cached: bool) {
    tracing::info!(
        event = "search_completed",
        mode = %mode,
        result_count = result_count,
        total_time_ms = total_time_ms,
        cached = cached,
        "search completed"
    );
}

/// Log a cache clear.
pub fn cache_cleared(cache: &str, entries: usize) {
    tracing::info!(
        event = "cache_cleared",
        cache = %cache,
        entries = entries,
        "cache cleared"
    );
}
