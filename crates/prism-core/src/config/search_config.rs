use serde::{Deserialize, Serialize};

use super::defaults;

/// Similarity floors, limits and fan-out bounds per strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub min_similarity: f64,
    pub entity_min_similarity: f64,
    pub entity_limit: usize,
    pub graph_min_similarity: f64,
    pub graph_limit: usize,
    pub multi_modal_min_similarity: f64,
    pub multi_modal_limit: usize,
    /// Concurrent sub-searches per strategy.
    pub max_concurrency: usize,
    /// Hops for graph-mode traversal.
    pub graph_mode_hops: usize,
    /// Hops for every other mode that runs the graph strategy.
    pub graph_hops: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_RESULT_LIMIT,
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            entity_min_similarity: defaults::DEFAULT_ENTITY_MIN_SIMILARITY,
            entity_limit: defaults::DEFAULT_ENTITY_LIMIT,
            graph_min_similarity: defaults::DEFAULT_GRAPH_MIN_SIMILARITY,
            graph_limit: defaults::DEFAULT_GRAPH_LIMIT,
            multi_modal_min_similarity: defaults::DEFAULT_MULTI_MODAL_MIN_SIMILARITY,
            multi_modal_limit: defaults::DEFAULT_MULTI_MODAL_LIMIT,
            max_concurrency: defaults::DEFAULT_MAX_CONCURRENCY,
            graph_mode_hops: defaults::DEFAULT_GRAPH_MODE_HOPS,
            graph_hops: defaults::DEFAULT_GRAPH_HOPS,
        }
    }
}
