//! Per-model embedding cache backed by moka.
//!
//! TinyLFU admission, bounded by entry count, no TTL: entries live until
//! evicted for capacity or explicitly cleared.

use std::sync::Arc;

use moka::sync::Cache;

/// Cache key for `text` embedded under `model`.
///
/// The model name is part of the hashed key, so two models never share an
/// entry for the same text.
pub fn cache_key(model: &str, text: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(model.as_bytes());
    hasher.update(b"\0");
    hasher.update(normalize_text(text).as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Lowercase, trimmed, with whitespace runs collapsed to one space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub struct EmbeddingCache {
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub fn get(&self, model: &str, text: &str) -> Option<Arc<Vec<f32>>> {
        self.cache.get(&cache_key(model, text))
    }

    pub fn insert(&self, model: &str, text: &str, vector: Vec<f32>) {
        self.cache.insert(cache_key(model, text), Arc::new(vector));
    }

    /// Entry count after applying pending maintenance.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_differ_per_model() {
        assert_ne!(cache_key("a", "hello"), cache_key("b", "hello"));
    }

    #[test]
    fn keys_ignore_case_and_spacing() {
        assert_eq!(
            cache_key("m", "  Hello   World "),
            cache_key("m", "hello world")
        );
    }

    #[test]
    fn model_and_text_boundary_is_unambiguous() {
        assert_ne!(cache_key("ab", "c"), cache_key("a", "bc"));
    }

    #[test]
    fn insert_get_and_clear() {
        let cache = EmbeddingCache::new(100);
        cache.insert("m", "text", vec![1.0, 2.0]);
        assert_eq!(cache.get("m", "text").as_deref(), Some(&vec![1.0, 2.0]));
        assert!(cache.get("other", "text").is_none());
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.get("m", "text").is_none());
        assert!(cache.is_empty());
    }
}
