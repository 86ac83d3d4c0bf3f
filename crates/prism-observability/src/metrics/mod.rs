//! Metrics for the embedding manager and the search orchestrator.

pub mod embedding_metrics;
pub mod latency_ring;
pub mod search_metrics;

pub use embedding_metrics::{EmbeddingMetrics, PerformanceSnapshot};
pub use latency_ring::LatencyRing;
pub use search_metrics::{SearchMetrics, SearchMetricsSnapshot};
