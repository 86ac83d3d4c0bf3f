//! StrategyExecutor: runs the retrieval strategies a query selects.
//!
//! Strategies run concurrently. Inside a strategy, independent sub-searches
//! go through a bounded, order-preserving fan-out. A failed sub-search turns
//! into a [`StrategyWarning`]; only fatal errors (embedding exhaustion)
//! abort the query.

pub mod entity_search;
pub mod fan_out;
pub mod graph_search;
pub mod multi_modal_search;
pub mod vector_search;

use std::collections::BTreeMap;
use std::sync::Arc;

use prism_core::config::SearchConfig;
use prism_core::errors::PrismResult;
use prism_core::models::{
    QueryAnalysis, SearchQuery, SearchResult, StrategyKind, StrategyWarning,
};
use prism_core::traits::{IEntityExtractor, IVectorStore};
use prism_embeddings::EmbeddingStrategyManager;
use tracing::{debug, Instrument};

use crate::analysis::QueryAnalyzer;
use crate::fusion::RankedList;

/// Collaborators shared by every strategy.
pub struct SearchContext {
    pub store: Arc<dyn IVectorStore>,
    pub embeddings: Arc<EmbeddingStrategyManager>,
    pub extractor: Arc<dyn IEntityExtractor>,
    pub config: SearchConfig,
}

/// What one strategy produced.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    /// Deduplicated by id, first occurrence wins.
    pub results: Vec<SearchResult>,
    pub warnings: Vec<StrategyWarning>,
    /// Sub-searches issued.
    pub attempted: usize,
    /// Sub-searches that failed.
    pub failed: usize,
}

impl StrategyOutcome {
    pub fn empty(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            results: Vec::new(),
            warnings: Vec::new(),
            attempted: 0,
            failed: 0,
        }
    }

    /// Every issued sub-search failed.
    pub fn is_total_failure(&self) -> bool {
        self.attempted > 0 && self.failed == self.attempted
    }

    /// Fold another outcome of the same strategy into this one.
    pub fn absorb(&mut self, other: StrategyOutcome) {
        for result in other.results {
            if !self.results.iter().any(|r| r.id == result.id) {
                self.results.push(result);
            }
        }
        self.warnings.extend(other.warnings);
        self.attempted += other.attempted;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub outcomes: Vec<StrategyOutcome>,
}

impl ExecutionReport {
    pub fn ranked_lists(&self) -> Vec<RankedList> {
        self.outcomes
            .iter()
            .map(|o| RankedList::new(o.strategy, o.results.clone()))
            .collect()
    }

    pub fn warnings(&self) -> Vec<StrategyWarning> {
        self.outcomes
            .iter()
            .flat_map(|o| o.warnings.iter().cloned())
            .collect()
    }

    pub fn counts(&self) -> BTreeMap<StrategyKind, usize> {
        self.outcomes
            .iter()
            .map(|o| (o.strategy, o.results.len()))
            .collect()
    }

    /// At least one sub-search was issued and none succeeded.
    pub fn all_failed(&self) -> bool {
        let attempted: usize = self.outcomes.iter().map(|o| o.attempted).sum();
        attempted > 0 && self.outcomes.iter().all(|o| o.attempted == o.failed)
    }
}

pub struct StrategyExecutor {
    ctx: SearchContext,
}

impl StrategyExecutor {
    pub fn new(ctx: SearchContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Run every strategy `query` uses, concurrently. Outcomes come back in
    /// vector, entity, graph, multi-modal order.
    pub async fn execute(
        &self,
        query: &SearchQuery,
        analysis: &QueryAnalysis,
    ) -> PrismResult<ExecutionReport> {
        let ctx = &self.ctx;
        let filters = &query.options.filters;
        let limit = query.options.limit.unwrap_or(ctx.config.default_limit);
        let seeds = QueryAnalyzer::entity_seeds(&query.text, analysis);
        let hops = query.graph_traversal.map_or(1, |t| t.max_hops);

        let vector = async {
            if !query.uses(StrategyKind::Vector) {
                return None;
            }
            let span = prism_observability::strategy_span!(StrategyKind::Vector);
            Some(
                vector_search::run(ctx, &analysis.query_embedding, limit, filters)
                    .instrument(span)
                    .await,
            )
        };
        let entity = async {
            if !query.uses(StrategyKind::Entity) {
                return None;
            }
            let span = prism_observability::strategy_span!(StrategyKind::Entity);
            Some(entity_search::run(ctx, &seeds, filters).instrument(span).await)
        };
        let graph = async {
            if !query.uses(StrategyKind::Graph) {
                return None;
            }
            let span = prism_observability::strategy_span!(StrategyKind::Graph);
            Some(graph_search::run(ctx, analysis, filters, hops).instrument(span).await)
        };
        let multi_modal = async {
            if !query.uses(StrategyKind::MultiModal) {
                return None;
            }
            let span = prism_observability::strategy_span!(StrategyKind::MultiModal);
            Some(
                multi_modal_search::run(ctx, &analysis.query_embedding, filters)
                    .instrument(span)
                    .await,
            )
        };

        let (vector, entity, graph, multi_modal) = tokio::join!(vector, entity, graph, multi_modal);

        let mut outcomes = Vec::new();
        for outcome in [vector, entity, graph, multi_modal].into_iter().flatten() {
            outcomes.push(outcome?);
        }
        debug!(
            strategies = outcomes.len(),
            results = outcomes.iter().map(|o| o.results.len()).sum::<usize>(),
            failures = outcomes.iter().map(|o| o.failed).sum::<usize>(),
            "strategies executed"
        );
        Ok(ExecutionReport { outcomes })
    }
}
