//! Query-response cache keyed by `mode:text:options`.
//!
//! Entries live in a [`DashMap`]; a FIFO log of keys bounds the map at
//! `capacity`, evicting the oldest insertion first. Re-inserting an existing
//! key replaces the value without refreshing its position.

use std::collections::VecDeque;
use std::sync::Mutex;

use dashmap::DashMap;
use prism_core::errors::PrismResult;
use prism_core::models::{CacheStats, ComprehensiveSearchResponse, SearchMode, SearchOptions};
use tracing::debug;

pub struct ResponseCache {
    entries: DashMap<String, ComprehensiveSearchResponse>,
    order: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// `mode:text:json(options)`.
    pub fn key(mode: SearchMode, text: &str, options: &SearchOptions) -> PrismResult<String> {
        Ok(format!("{mode}:{text}:{}", serde_json::to_string(options)?))
    }

    pub fn get(&self, key: &str) -> Option<ComprehensiveSearchResponse> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: String, response: ComprehensiveSearchResponse) {
        let mut order = self.order.lock().unwrap_or_else(|e| e.into_inner());
        if self.entries.insert(key.clone(), response).is_none() {
            order.push_back(key);
        }
        while order.len() > self.capacity {
            if let Some(oldest) = order.pop_front() {
                self.entries.remove(&oldest);
                debug!(key = %oldest, "response cache evicted oldest entry");
            }
        }
    }

    /// Remove every entry and return how many there were.
    pub fn clear(&self) -> usize {
        let mut order = self.order.lock().unwrap_or_else(|e| e.into_inner());
        let removed = self.entries.len();
        self.entries.clear();
        order.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size and keys, oldest first.
    pub fn stats(&self) -> CacheStats {
        let order = self.order.lock().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            size: self.entries.len(),
            keys: order.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> ComprehensiveSearchResponse {
        ComprehensiveSearchResponse::empty(SearchMode::Basic)
    }

    #[test]
    fn key_includes_mode_text_and_options() {
        let options = SearchOptions {
            limit: Some(5),
            ..Default::default()
        };
        let key = ResponseCache::key(SearchMode::Graph, "postgres", &options).unwrap();
        assert!(key.starts_with("graph:postgres:{"));
        assert!(key.contains("\"limit\":5"));
        assert_ne!(
            key,
            ResponseCache::key(SearchMode::Basic, "postgres", &options).unwrap()
        );
    }

    #[test]
    fn evicts_oldest_first() {
        let cache = ResponseCache::new(2);
        cache.insert("a".into(), response());
        cache.insert("b".into(), response());
        cache.insert("a".into(), response());
        cache.insert("c".into(), response());
        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.keys, vec!["b".to_string(), "c".to_string()]);
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn clear_empties_everything() {
        let cache = ResponseCache::new(4);
        cache.insert("a".into(), response());
        cache.insert("b".into(), response());
        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.stats(), CacheStats::default());
        assert!(cache.is_empty());
    }
}
