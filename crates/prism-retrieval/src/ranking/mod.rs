//! Reranker: five-factor combined score, stable descending sort.

pub mod scorer;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use prism_core::config::RankingWeights;
use prism_core::models::ExtractedEntity;
use prism_graph::AugmentedResult;

#[derive(Debug, Clone, Copy)]
pub struct Reranker {
    weights: RankingWeights,
}

impl Reranker {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> RankingWeights {
        self.weights
    }

    /// Score every result against `query_entities` and sort by combined
    /// score, descending. Ties keep their incoming order.
    pub fn rerank(
        &self,
        items: Vec<AugmentedResult>,
        query_entities: &[ExtractedEntity],
    ) -> Vec<AugmentedResult> {
        self.rerank_at(items, query_entities, Utc::now())
    }

    /// [`rerank`](Self::rerank) with an explicit clock.
    pub fn rerank_at(
        &self,
        mut items: Vec<AugmentedResult>,
        query_entities: &[ExtractedEntity],
        now: DateTime<Utc>,
    ) -> Vec<AugmentedResult> {
        let query_keys: HashSet<String> = query_entities.iter().map(ExtractedEntity::key).collect();
        for item in &mut items {
            item.result.scoring = Some(scorer::score(item, &query_keys, &self.weights, now));
        }
        items.sort_by(|a, b| {
            let (a, b) = (combined(a), combined(b));
            b.total_cmp(&a)
        });
        items
    }
}

impl Default for Reranker {
    fn default() -> Self {
        Self::new(RankingWeights::default())
    }
}

fn combined(item: &AugmentedResult) -> f64 {
    item.result.scoring.map_or(0.0, |s| s.combined)
}
