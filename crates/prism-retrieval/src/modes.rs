//! Per-mode plans: which expansions and strategies run, how deep the graph
//! traversal goes, and which weights the reranker uses.

use prism_core::config::{PrismConfig, RankingWeights};
use prism_core::models::{
    ExpansionFlags, GraphTraversal, SearchMode, SearchOptions, SearchQuery, StrategyKind,
};

/// Graph mode leans on entity and graph evidence.
pub const GRAPH_MODE_WEIGHTS: RankingWeights = RankingWeights {
    vector: 0.2,
    entity: 0.3,
    temporal: 0.1,
    quality: 0.1,
    graph: 0.3,
};

/// Multi-modal mode leans on provider quality.
pub const MULTI_MODAL_WEIGHTS: RankingWeights = RankingWeights {
    vector: 0.35,
    entity: 0.1,
    temporal: 0.1,
    quality: 0.35,
    graph: 0.1,
};

#[derive(Debug, Clone)]
pub struct ModePlan {
    pub query: SearchQuery,
    /// `None` skips augmentation and reranking (basic mode).
    pub ranking: Option<RankingWeights>,
}

impl ModePlan {
    pub fn mode(&self) -> SearchMode {
        self.query.mode
    }

    pub fn reranks(&self) -> bool {
        self.ranking.is_some()
    }

    pub fn has_advanced_results(&self) -> bool {
        matches!(self.mode(), SearchMode::Advanced | SearchMode::Comprehensive)
    }

    pub fn has_knowledge_graph(&self) -> bool {
        matches!(self.mode(), SearchMode::Graph | SearchMode::Comprehensive)
    }

    pub fn has_multi_modal_analysis(&self) -> bool {
        matches!(self.mode(), SearchMode::MultiModal | SearchMode::Comprehensive)
    }
}

pub fn plan(mode: SearchMode, text: &str, options: &SearchOptions, config: &PrismConfig) -> ModePlan {
    use StrategyKind::*;

    let (expansion, strategies, hops, ranking) = match mode {
        SearchMode::Basic => (ExpansionFlags::default(), vec![Vector], None, None),
        SearchMode::Advanced => {
            let mut strategies = vec![Vector];
            if options.entity_expansion {
                strategies.push(Entity);
            }
            let expansion = ExpansionFlags {
                semantic: options.semantic_expansion,
                entity: options.entity_expansion,
                graph: false,
            };
            (expansion, strategies, None, Some(config.ranking))
        }
        SearchMode::Graph => (
            ExpansionFlags {
                semantic: true,
                entity: true,
                graph: true,
            },
            vec![Vector, Entity, Graph],
            Some(config.search.graph_mode_hops),
            Some(GRAPH_MODE_WEIGHTS),
        ),
        SearchMode::MultiModal => (
            ExpansionFlags {
                semantic: true,
                ..Default::default()
            },
            vec![Vector, MultiModal],
            None,
            Some(MULTI_MODAL_WEIGHTS),
        ),
        SearchMode::Comprehensive => (
            ExpansionFlags {
                semantic: true,
                entity: true,
                graph: true,
            },
            vec![Vector, Entity, Graph, MultiModal],
            Some(config.search.graph_hops),
            Some(config.ranking),
        ),
    };

    ModePlan {
        query: SearchQuery {
            text: text.to_string(),
            mode,
            expansion,
            strategies,
            graph_traversal: hops.map(|max_hops| GraphTraversal {
                max_hops: max_hops.max(1),
            }),
            options: options.clone(),
        },
        ranking,
    }
}
