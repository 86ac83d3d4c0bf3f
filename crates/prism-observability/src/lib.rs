//! # prism-observability
//!
//! Structured tracing with span and event definitions, plus metrics for the
//! embedding manager and the search orchestrator.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{
    EmbeddingMetrics, LatencyRing, PerformanceSnapshot, SearchMetrics, SearchMetricsSnapshot,
};
