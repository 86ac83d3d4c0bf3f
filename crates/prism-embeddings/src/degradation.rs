//! Degradation event log for the fallback chain.
//!
//! Every fallback and every dimension rewrite is recorded here and logged.

use std::sync::Mutex;

use chrono::Utc;
use prism_core::models::DegradationEvent;

#[derive(Debug, Default)]
pub struct DegradationLog {
    events: Mutex<Vec<DegradationEvent>>,
}

impl DegradationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fallback model answered after `failed` could not.
    pub fn record_fallback(&self, failed: &str, failure: &str, fallback_used: &str) {
        prism_observability::tracing_setup::events::embedding_fallback(
            failed,
            fallback_used,
            failure,
        );
        self.push(DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{failed}: {failure}"),
            fallback_used: fallback_used.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// A model's declared dimension was rewritten to what its provider returned.
    pub fn record_dimension(&self, model: &str, declared: usize, observed: usize) {
        prism_observability::tracing_setup::events::dimension_degraded(model, declared, observed);
        self.push(DegradationEvent {
            component: "embeddings.dimension".to_string(),
            failure: format!("{model} declared {declared}, returned {observed}"),
            fallback_used: format!("{model}@{observed}"),
            timestamp: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain accumulated events.
    pub fn drain(&self) -> Vec<DegradationEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn push(&self, event: DegradationEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DegradationEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_events_drain_once() {
        let log = DegradationLog::new();
        log.record_fallback("primary", "timeout", "secondary");
        assert_eq!(log.len(), 1);
        let events = log.drain();
        assert_eq!(events[0].fallback_used, "secondary");
        assert!(events[0].failure.contains("timeout"));
        assert!(log.is_empty());
    }
}
