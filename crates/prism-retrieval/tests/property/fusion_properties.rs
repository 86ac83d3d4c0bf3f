use std::collections::HashSet;
use std::sync::Arc;

use prism_core::config::{FusionConfig, RankingWeights};
use prism_core::models::{Chunk, ChunkMetadata, FusionAlgorithm, SearchResult, StrategyKind};
use prism_graph::{GraphAugmenter, HeuristicExtractor};
use prism_retrieval::fusion::{self, RankedList};
use prism_retrieval::Reranker;
use proptest::prelude::*;

fn result(id: u8, similarity: f64, text: &str) -> SearchResult {
    SearchResult::from_chunk(
        Chunk {
            id: format!("r{id}"),
            text: text.to_string(),
            metadata: ChunkMetadata::default(),
        },
        similarity,
    )
}

/// Up to four strategy lists drawn from a small id space, so overlaps and
/// in-list repeats are common.
fn arb_lists() -> impl Strategy<Value = Vec<RankedList>> {
    let strategies = [
        StrategyKind::Vector,
        StrategyKind::Entity,
        StrategyKind::Graph,
        StrategyKind::MultiModal,
    ];
    prop::collection::vec(
        prop::collection::vec((0u8..20, -1.0f64..2.0), 0..15),
        1..=4,
    )
    .prop_map(move |lists| {
        lists
            .into_iter()
            .zip(strategies)
            .map(|(rows, strategy)| {
                RankedList::new(
                    strategy,
                    rows.into_iter().map(|(id, sim)| result(id, sim, "text")).collect(),
                )
            })
            .collect()
    })
}

fn arb_algorithm() -> impl Strategy<Value = FusionAlgorithm> {
    prop_oneof![
        Just(FusionAlgorithm::Rrf),
        Just(FusionAlgorithm::Weighted),
        Just(FusionAlgorithm::Concat),
    ]
}

fn arb_weight() -> impl Strategy<Value = f64> {
    0.0f64..2.0
}

proptest! {
    #[test]
    fn fusion_never_yields_duplicate_ids(lists in arb_lists(), algorithm in arb_algorithm()) {
        let fused = fusion::fuse(algorithm, &lists, &FusionConfig::default(), None);
        let ids: HashSet<&str> = fused.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids.len(), fused.len());

        let input: HashSet<&str> = lists
            .iter()
            .flat_map(|l| l.results.iter().map(|r| r.id.as_str()))
            .collect();
        prop_assert_eq!(ids, input);
    }

    #[test]
    fn rrf_scores_are_non_increasing(lists in arb_lists()) {
        let fused = fusion::fuse(FusionAlgorithm::Rrf, &lists, &FusionConfig::default(), None);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].fused_score.unwrap() >= pair[1].fused_score.unwrap());
        }
    }

    #[test]
    fn combined_score_stays_in_unit_interval(
        lists in arb_lists(),
        vector in arb_weight(),
        entity in arb_weight(),
        temporal in arb_weight(),
        quality in arb_weight(),
        graph in arb_weight(),
    ) {
        let fused = fusion::fuse(FusionAlgorithm::Rrf, &lists, &FusionConfig::default(), None);
        let augmenter = GraphAugmenter::new(Arc::new(HeuristicExtractor::default()));
        let augmented = augmenter.augment(fused, &[]);
        let weights = RankingWeights { vector, entity, temporal, quality, graph };
        let ranked = Reranker::new(weights).rerank(augmented, &[]);
        for item in &ranked {
            let scoring = item.result.scoring.unwrap();
            prop_assert!((0.0..=1.0).contains(&scoring.combined));
            for sub in [scoring.vector, scoring.entity, scoring.temporal, scoring.quality, scoring.graph] {
                prop_assert!((0.0..=1.0).contains(&sub));
            }
        }
        for pair in ranked.windows(2) {
            prop_assert!(
                pair[0].result.scoring.unwrap().combined >= pair[1].result.scoring.unwrap().combined
            );
        }
    }
}
