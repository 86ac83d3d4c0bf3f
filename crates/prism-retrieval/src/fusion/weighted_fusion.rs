//! Weighted fusion: each result contributes `w * 1/(rank + 1) * similarity`.

use std::collections::BTreeMap;

use prism_core::models::{SearchResult, StrategyKind};

use super::{RankedList, ScoreTable};

/// Fuse with per-strategy weights. Strategies absent from `weights` weigh
/// `unlisted_weight`; a non-finite similarity counts as `missing_similarity`.
pub fn fuse(
    lists: &[RankedList],
    weights: &BTreeMap<StrategyKind, f64>,
    unlisted_weight: f64,
    missing_similarity: f64,
) -> Vec<SearchResult> {
    let mut table = ScoreTable::default();
    for list in lists {
        let weight = weights.get(&list.strategy).copied().unwrap_or(unlisted_weight);
        for (rank, result) in list.results.iter().enumerate() {
            let similarity = if result.similarity.is_finite() {
                result.similarity
            } else {
                missing_similarity
            };
            table.add(result, weight * (1.0 / (rank as f64 + 1.0)) * similarity);
        }
    }
    table.into_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::test_support::*;
    use prism_core::config::FusionConfig;

    #[test]
    fn rank_discount_and_similarity_multiply() {
        let lists = vec![RankedList::new(
            StrategyKind::Vector,
            vec![result("a", 0.8), result("b", 0.9)],
        )];
        let fused = fuse(&lists, &FusionConfig::default_weights(), 0.1, 0.5);
        assert!((fused[0].fused_score.unwrap() - 0.4 * 0.8).abs() < 1e-12);
        assert!((fused[1].fused_score.unwrap() - 0.4 * 0.5 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn scores_accumulate_across_strategies() {
        let lists = vec![
            RankedList::new(StrategyKind::Vector, vec![result("a", 0.5)]),
            RankedList::new(StrategyKind::Graph, vec![result("a", 0.5)]),
        ];
        let fused = fuse(&lists, &FusionConfig::default_weights(), 0.1, 0.5);
        assert!((fused[0].fused_score.unwrap() - (0.4 * 0.5 + 0.2 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn unlisted_strategy_and_missing_similarity_use_defaults() {
        let lists = vec![RankedList::new(StrategyKind::MultiModal, vec![result("a", f64::NAN)])];
        let fused = fuse(&lists, &BTreeMap::new(), 0.1, 0.5);
        assert!((fused[0].fused_score.unwrap() - 0.05).abs() < 1e-12);
    }
}
