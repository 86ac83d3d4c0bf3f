use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights for the five rerank sub-scores. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub vector: f64,
    pub entity: f64,
    pub temporal: f64,
    pub quality: f64,
    pub graph: f64,
}

impl RankingWeights {
    pub fn sum(&self) -> f64 {
        self.vector + self.entity + self.temporal + self.quality + self.graph
    }

    pub fn has_negative(&self) -> bool {
        [self.vector, self.entity, self.temporal, self.quality, self.graph]
            .iter()
            .any(|w| *w < 0.0)
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            vector: defaults::DEFAULT_VECTOR_WEIGHT,
            entity: defaults::DEFAULT_ENTITY_WEIGHT,
            temporal: defaults::DEFAULT_TEMPORAL_WEIGHT,
            quality: defaults::DEFAULT_QUALITY_WEIGHT,
            graph: defaults::DEFAULT_GRAPH_WEIGHT,
        }
    }
}
