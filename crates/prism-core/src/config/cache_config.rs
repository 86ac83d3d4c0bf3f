use serde::{Deserialize, Serialize};

use super::defaults;

/// Query-response cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached responses; the oldest entry is evicted first.
    pub response_capacity: usize,
    /// Cache responses even when the caller does not opt in.
    pub enabled_by_default: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            response_capacity: defaults::DEFAULT_RESPONSE_CACHE_CAPACITY,
            enabled_by_default: defaults::DEFAULT_CACHE_ENABLED,
        }
    }
}
