//! Bounded latency sample buffer.

use prism_core::constants::{LATENCY_COMPACT_TO, LATENCY_RING_CAPACITY};
use serde::{Deserialize, Serialize};

/// Latency samples in milliseconds. Once more than `capacity` samples are
/// held, the oldest are dropped so only the most recent `compact_to` remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyRing {
    samples_ms: Vec<f64>,
    capacity: usize,
    compact_to: usize,
}

impl Default for LatencyRing {
    fn default() -> Self {
        Self::with_bounds(LATENCY_RING_CAPACITY, LATENCY_COMPACT_TO)
    }
}

impl LatencyRing {
    pub fn with_bounds(capacity: usize, compact_to: usize) -> Self {
        Self {
            samples_ms: Vec::new(),
            capacity,
            compact_to: compact_to.min(capacity),
        }
    }

    pub fn record(&mut self, ms: f64) {
        self.samples_ms.push(ms);
        if self.samples_ms.len() > self.capacity {
            let excess = self.samples_ms.len() - self.compact_to;
            self.samples_ms.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.samples_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples_ms.is_empty()
    }

    /// Sorted sample at `floor(n * p)`, clamped to the last index. 0 when empty.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.samples_ms.is_empty() {
            return 0.0;
        }
        let mut sorted = self.samples_ms.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
        sorted[idx]
    }

    pub fn p95(&self) -> f64 {
        self.percentile(0.95)
    }

    pub fn mean(&self) -> f64 {
        if self.samples_ms.is_empty() {
            return 0.0;
        }
        self.samples_ms.iter().sum::<f64>() / self.samples_ms.len() as f64
    }

    pub fn clear(&mut self) {
        self.samples_ms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_to_most_recent_half() {
        let mut ring = LatencyRing::default();
        for i in 0..1001 {
            ring.record(i as f64);
        }
        assert_eq!(ring.len(), 500);
        // Oldest dropped: the first remaining sample is 501.
        assert_eq!(ring.percentile(0.0), 501.0);
    }

    #[test]
    fn p95_indexes_at_floor() {
        let mut ring = LatencyRing::default();
        for i in 1..=20 {
            ring.record(i as f64);
        }
        // floor(20 * 0.95) = 19 -> the 20th value.
        assert_eq!(ring.p95(), 20.0);

        let mut small = LatencyRing::default();
        for v in [5.0, 1.0, 3.0] {
            small.record(v);
        }
        // floor(3 * 0.95) = 2.
        assert_eq!(small.p95(), 5.0);
    }

    #[test]
    fn empty_ring_reports_zero() {
        let ring = LatencyRing::default();
        assert_eq!(ring.p95(), 0.0);
        assert_eq!(ring.mean(), 0.0);
    }
}
