use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{FusionAlgorithm, StrategyKind};

/// Result fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub algorithm: FusionAlgorithm,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Weighted-fusion weight per strategy.
    pub weights: BTreeMap<StrategyKind, f64>,
    /// Weight for strategies missing from `weights`.
    pub unlisted_weight: f64,
    /// Similarity assumed when a result carries none.
    pub missing_similarity: f64,
}

impl FusionConfig {
    pub fn default_weights() -> BTreeMap<StrategyKind, f64> {
        BTreeMap::from([
            (StrategyKind::Vector, defaults::DEFAULT_VECTOR_FUSION_WEIGHT),
            (StrategyKind::Graph, defaults::DEFAULT_GRAPH_FUSION_WEIGHT),
            (StrategyKind::Entity, defaults::DEFAULT_ENTITY_FUSION_WEIGHT),
            (StrategyKind::Temporal, defaults::DEFAULT_TEMPORAL_FUSION_WEIGHT),
        ])
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            algorithm: FusionAlgorithm::Rrf,
            rrf_k: defaults::DEFAULT_RRF_K,
            weights: Self::default_weights(),
            unlisted_weight: defaults::DEFAULT_UNLISTED_FUSION_WEIGHT,
            missing_similarity: defaults::DEFAULT_MISSING_SIMILARITY,
        }
    }
}
