//! Request counts, cache hit rate, latency percentiles, per-model usage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::latency_ring::LatencyRing;

/// Rolling embedding metrics, owned by one embedding manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMetrics {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Calls slower than the slow-embedding threshold.
    pub slow_embeddings: u64,
    /// Calls answered by a fallback model.
    pub fallbacks: u64,
    /// Calls whose every candidate model failed.
    pub exhausted: u64,
    /// Successful provider calls per model.
    pub model_usage: BTreeMap<String, u64>,
    latencies: LatencyRing,
}

/// Point-in-time view returned by `performance_metrics()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Percentage, rounded to two decimals.
    pub cache_hit_rate: f64,
    pub p95_latency_ms: f64,
    pub average_latency_ms: f64,
    pub slow_embeddings: u64,
    pub fallbacks: u64,
    pub exhausted: u64,
    pub model_usage: BTreeMap<String, u64>,
    pub cache_entries: u64,
}

impl EmbeddingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&mut self) {
        self.total_requests += 1;
        self.cache_hits += 1;
    }

    pub fn record_cache_miss(&mut self) {
        self.total_requests += 1;
        self.cache_misses += 1;
    }

    /// Record the latency of one call; `slow` marks it against the threshold.
    pub fn record_latency(&mut self, ms: f64, slow_threshold_ms: u64) {
        self.latencies.record(ms);
        if ms > slow_threshold_ms as f64 {
            self.slow_embeddings += 1;
        }
    }

    pub fn record_model(&mut self, model: &str, fallback: bool) {
        *self.model_usage.entry(model.to_string()).or_default() += 1;
        if fallback {
            self.fallbacks += 1;
        }
    }

    pub fn record_exhausted(&mut self) {
        self.exhausted += 1;
    }

    /// Hit rate as a percentage rounded to two decimals.
    pub fn cache_hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        let pct = self.cache_hits as f64 / self.total_requests as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }

    pub fn p95_latency_ms(&self) -> f64 {
        self.latencies.p95()
    }

    pub fn snapshot(&self, cache_entries: u64) -> PerformanceSnapshot {
        PerformanceSnapshot {
            total_requests: self.total_requests,
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
            cache_hit_rate: self.cache_hit_rate(),
            p95_latency_ms: self.latencies.p95(),
            average_latency_ms: self.latencies.mean(),
            slow_embeddings: self.slow_embeddings,
            fallbacks: self.fallbacks,
            exhausted: self.exhausted,
            model_usage: self.model_usage.clone(),
            cache_entries,
        }
    }

    /// Reset all counters and samples.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
