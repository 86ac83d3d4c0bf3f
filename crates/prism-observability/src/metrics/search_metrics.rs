//! Per-mode query counts, response-cache effectiveness, latency, partial failures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::latency_ring::LatencyRing;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetrics {
    pub queries_by_mode: BTreeMap<String, u64>,
    pub response_cache_hits: u64,
    pub response_cache_misses: u64,
    /// Strategy sub-searches that failed and were skipped.
    pub partial_failures: u64,
    /// Queries answered with the `error` field set.
    pub failed_queries: u64,
    latencies: LatencyRing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetricsSnapshot {
    pub queries_by_mode: BTreeMap<String, u64>,
    pub total_queries: u64,
    pub response_cache_hits: u64,
    pub response_cache_misses: u64,
    pub partial_failures: u64,
    pub failed_queries: u64,
    pub p95_latency_ms: f64,
    pub average_latency_ms: f64,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&mut self, mode: &str, total_time_ms: f64) {
        *self.queries_by_mode.entry(mode.to_string()).or_default() += 1;
        self.latencies.record(total_time_ms);
    }

    pub fn record_cache_lookup(&mut self, hit: bool) {
        if hit {
            self.response_cache_hits += 1;
        } else {
            self.response_cache_misses += 1;
        }
    }

    pub fn record_partial_failures(&mut self, count: usize) {
        self.partial_failures += count as u64;
    }

    pub fn record_failed_query(&mut self) {
        self.failed_queries += 1;
    }

    pub fn total_queries(&self) -> u64 {
        self.queries_by_mode.values().sum()
    }

    pub fn snapshot(&self) -> SearchMetricsSnapshot {
        SearchMetricsSnapshot {
            queries_by_mode: self.queries_by_mode.clone(),
            total_queries: self.total_queries(),
            response_cache_hits: self.response_cache_hits,
            response_cache_misses: self.response_cache_misses,
            partial_failures: self.partial_failures,
            failed_queries: self.failed_queries,
            p95_latency_ms: self.latencies.p95(),
            average_latency_ms: self.latencies.mean(),
        }
    }
}
