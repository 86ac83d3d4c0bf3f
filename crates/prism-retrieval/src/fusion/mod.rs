//! Merge per-strategy result lists into one ranked, duplicate-free list.

pub mod concat;
pub mod rrf_fusion;
pub mod weighted_fusion;

use std::collections::BTreeMap;

use prism_core::config::FusionConfig;
use prism_core::models::{FusionAlgorithm, SearchResult, StrategyKind};

/// One strategy's results, best first.
#[derive(Debug, Clone)]
pub struct RankedList {
    pub strategy: StrategyKind,
    pub results: Vec<SearchResult>,
}

impl RankedList {
    pub fn new(strategy: StrategyKind, results: Vec<SearchResult>) -> Self {
        Self { strategy, results }
    }
}

/// Fuse with `algorithm`. `weights` replaces the configured weighted-fusion
/// weights when given.
pub fn fuse(
    algorithm: FusionAlgorithm,
    lists: &[RankedList],
    config: &FusionConfig,
    weights: Option<&BTreeMap<StrategyKind, f64>>,
) -> Vec<SearchResult> {
    match algorithm {
        FusionAlgorithm::Rrf => rrf_fusion::fuse(lists, config.rrf_k),
        FusionAlgorithm::Weighted => weighted_fusion::fuse(
            lists,
            weights.unwrap_or(&config.weights),
            config.unlisted_weight,
            config.missing_similarity,
        ),
        FusionAlgorithm::Concat => concat::fuse(lists),
    }
}

/// Accumulates a score per result id, remembering first-discovery order.
#[derive(Default)]
pub(crate) struct ScoreTable {
    order: Vec<String>,
    entries: std::collections::HashMap<String, (SearchResult, f64)>,
}

impl ScoreTable {
    /// Add `score` to `result`'s id. The first occurrence's object is kept.
    pub(crate) fn add(&mut self, result: &SearchResult, score: f64) {
        match self.entries.get_mut(&result.id) {
            Some((_, total)) => *total += score,
            None => {
                self.order.push(result.id.clone());
                self.entries.insert(result.id.clone(), (result.clone(), score));
            }
        }
    }

    /// Results with `fused_score` set, sorted descending. Ties keep
    /// discovery order.
    pub(crate) fn into_sorted(mut self) -> Vec<SearchResult> {
        let mut fused: Vec<SearchResult> = self
            .order
            .iter()
            .filter_map(|id| self.entries.remove(id))
            .map(|(mut result, score)| {
                result.fused_score = Some(score);
                result
            })
            .collect();
        fused.sort_by(|a, b| {
            let (a, b) = (a.fused_score.unwrap_or(0.0), b.fused_score.unwrap_or(0.0));
            b.total_cmp(&a)
        });
        fused
    }
}
