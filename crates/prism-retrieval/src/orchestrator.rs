//! ComprehensiveSearchOrchestrator: validates the mode, serves or fills the
//! response cache, and drives one query through the pipeline.
//!
//! analysis → strategies → fusion → augmentation → multi-modal analysis →
//! reranking → knowledge graph → response

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use prism_core::config::PrismConfig;
use prism_core::errors::PrismResult;
use prism_core::models::{
    AdvancedResults, CacheStats, Chunk, ComprehensiveSearchQuery, ComprehensiveSearchResponse,
    Facets, SearchAnalytics, SearchMode, SearchResult, StoreStats,
};
use prism_core::traits::{IEntityExtractor, IVectorStore};
use prism_embeddings::EmbeddingStrategyManager;
use prism_graph::{GraphAugmenter, HeuristicExtractor, KnowledgeGraphBuilder};
use prism_observability::metrics::{PerformanceSnapshot, SearchMetrics, SearchMetricsSnapshot};
use prism_observability::tracing_setup::events;
use tracing::{debug, Instrument};

use crate::analysis::QueryAnalyzer;
use crate::cache::ResponseCache;
use crate::fusion;
use crate::modes::{self, ModePlan};
use crate::multimodal::MultiModalAnalyzer;
use crate::ranking::Reranker;
use crate::search::{SearchContext, StrategyExecutor};

pub struct ComprehensiveSearchOrchestrator {
    config: PrismConfig,
    store: Arc<dyn IVectorStore>,
    embeddings: Arc<EmbeddingStrategyManager>,
    analyzer: QueryAnalyzer,
    executor: StrategyExecutor,
    augmenter: GraphAugmenter,
    multi_modal: MultiModalAnalyzer,
    knowledge: KnowledgeGraphBuilder,
    cache: ResponseCache,
    metrics: Mutex<SearchMetrics>,
}

impl ComprehensiveSearchOrchestrator {
    pub fn new(
        config: PrismConfig,
        store: Arc<dyn IVectorStore>,
        embeddings: Arc<EmbeddingStrategyManager>,
        extractor: Arc<dyn IEntityExtractor>,
    ) -> Self {
        let executor = StrategyExecutor::new(SearchContext {
            store: Arc::clone(&store),
            embeddings: Arc::clone(&embeddings),
            extractor: Arc::clone(&extractor),
            config: config.search.clone(),
        });
        Self {
            analyzer: QueryAnalyzer::new(Arc::clone(&extractor), Arc::clone(&embeddings)),
            augmenter: GraphAugmenter::new(extractor),
            multi_modal: MultiModalAnalyzer::new(),
            knowledge: KnowledgeGraphBuilder::new(),
            cache: ResponseCache::new(config.cache.response_capacity),
            metrics: Mutex::new(SearchMetrics::new()),
            executor,
            store,
            embeddings,
            config,
        }
    }

    /// Embedding manager built from `config.embedding` and the heuristic
    /// entity extractor.
    pub async fn with_defaults(config: PrismConfig, store: Arc<dyn IVectorStore>) -> Self {
        let embeddings = Arc::new(EmbeddingStrategyManager::from_config(&config.embedding).await);
        Self::new(config, store, embeddings, Arc::new(HeuristicExtractor::default()))
    }

    pub fn config(&self) -> &PrismConfig {
        &self.config
    }

    pub fn embeddings(&self) -> &Arc<EmbeddingStrategyManager> {
        &self.embeddings
    }

    /// Run `query` in its requested mode.
    ///
    /// An unknown mode or exhausted embedding models return `Err`. Recoverable
    /// failures (the store is unavailable, every strategy failed) come back
    /// as a response with `error` set and no results.
    pub async fn search(
        &self,
        query: &ComprehensiveSearchQuery,
    ) -> PrismResult<ComprehensiveSearchResponse> {
        let started = Instant::now();
        let mode: SearchMode = query.mode.parse()?;
        let options = &query.options;

        let cache_key = if options.use_cache || self.config.cache.enabled_by_default {
            Some(ResponseCache::key(mode, &query.text, options)?)
        } else {
            None
        };
        if let Some(key) = &cache_key {
            let hit = self.cache.get(key);
            self.lock_metrics().record_cache_lookup(hit.is_some());
            if let Some(mut response) = hit {
                response.analytics.cached = true;
                response.analytics.total_time_ms = elapsed_ms(started);
                self.lock_metrics()
                    .record_query(mode.as_str(), response.analytics.total_time_ms);
                events::search_completed(
                    mode.as_str(),
                    response.results.len(),
                    response.analytics.total_time_ms,
                    true,
                );
                return Ok(response);
            }
        }

        let plan = modes::plan(mode, &query.text, options, &self.config);
        let analytics = SearchAnalytics::new(mode);
        let span = prism_observability::search_span!(analytics.query_id, mode);

        let mut response = match self.run(&plan, analytics).instrument(span).await {
            Ok(response) => response,
            Err(e) if !e.is_fatal() => {
                debug!(error = %e, mode = %mode, "recoverable search failure");
                ComprehensiveSearchResponse::failed(mode, e.to_string())
            }
            Err(e) => {
                self.lock_metrics().record_failed_query();
                return Err(e);
            }
        };
        response.analytics.total_time_ms = elapsed_ms(started);

        {
            let mut metrics = self.lock_metrics();
            if response.error.is_some() {
                metrics.record_failed_query();
            } else {
                metrics.record_query(mode.as_str(), response.analytics.total_time_ms);
            }
            metrics.record_partial_failures(response.analytics.warnings.len());
        }
        if let Some(key) = cache_key {
            if response.error.is_none() && response.analytics.warnings.is_empty() {
                self.cache.insert(key, response.clone());
            }
        }
        events::search_completed(
            mode.as_str(),
            response.results.len(),
            response.analytics.total_time_ms,
            false,
        );
        Ok(response)
    }

    async fn run(
        &self,
        plan: &ModePlan,
        mut analytics: SearchAnalytics,
    ) -> PrismResult<ComprehensiveSearchResponse> {
        let mode = plan.mode();
        let query = &plan.query;
        let limit = query.options.limit.unwrap_or(self.config.search.default_limit);
        let mut clock = PhaseClock::start();

        // Step 1: Analyze the query. Basic mode only needs the embedding.
        let analysis = if mode == SearchMode::Basic {
            self.analyzer.embed_only(&query.text).await?
        } else {
            self.analyzer.analyze(&query.text, query.expansion).await?
        };
        clock.lap("analysis");

        // Step 2: Run the selected strategies.
        let report = self.executor.execute(query, &analysis).await?;
        clock.lap("strategies");
        analytics.warnings = report.warnings();

        if report.all_failed() {
            let message = analytics
                .warnings
                .first()
                .map(|w| w.message.clone())
                .unwrap_or_else(|| "every search strategy failed".to_string());
            analytics.time_breakdown = clock.finish();
            return Ok(ComprehensiveSearchResponse {
                analytics,
                ..ComprehensiveSearchResponse::failed(mode, message)
            });
        }

        let Some(weights) = plan.ranking else {
            let results = basic_results(report.ranked_lists(), limit);
            analytics.time_breakdown = clock.finish();
            return Ok(ComprehensiveSearchResponse {
                facets: Facets::from_results(&results),
                results,
                analytics,
                ..ComprehensiveSearchResponse::empty(mode)
            });
        };

        // Step 3: Fuse the per-strategy lists.
        let algorithm = query
            .options
            .fusion
            .unwrap_or(self.config.fusion.algorithm);
        let fused = fusion::fuse(
            algorithm,
            &report.ranked_lists(),
            &self.config.fusion,
            query.options.fusion_weights.as_ref(),
        );
        let fused_count = fused.len();
        clock.lap("fusion");

        // Step 4: Per-result entities and graph context.
        let augmented = self.augmenter.augment(fused, &analysis.entities);
        clock.lap("augmentation");

        // Step 5: Rerank and cut to the limit.
        let mut ranked = Reranker::new(weights).rerank(augmented, &analysis.entities);
        ranked.truncate(limit);
        clock.lap("reranking");

        // Step 6: Cross-modal signals over what is returned.
        let multi_modal_analysis = plan.has_multi_modal_analysis().then(|| {
            let results: Vec<SearchResult> = ranked.iter().map(|a| a.result.clone()).collect();
            self.multi_modal.analyze(&results)
        });
        if multi_modal_analysis.is_some() {
            clock.lap("multi_modal");
        }

        // Step 7: Knowledge graph over what is returned.
        let (knowledge_insights, graph_insights) = if plan.has_knowledge_graph() {
            let insights = self.knowledge.build(&mut ranked);
            let graph = self.knowledge.graph_insights(&ranked, &insights.segment);
            clock.lap("knowledge_graph");
            (Some(insights), Some(graph))
        } else {
            (None, None)
        };

        let results: Vec<SearchResult> = ranked.into_iter().map(|a| a.into_result()).collect();
        let advanced_results = plan.has_advanced_results().then(|| AdvancedResults {
            strategy_counts: report.counts(),
            fusion_algorithm: algorithm,
            fused_count,
        });
        analytics.time_breakdown = clock.finish();

        debug!(
            mode = %mode,
            results = results.len(),
            fused = fused_count,
            warnings = analytics.warnings.len(),
            "pipeline complete"
        );

        Ok(ComprehensiveSearchResponse {
            facets: Facets::from_results(&results),
            results,
            analytics,
            advanced_results,
            knowledge_insights,
            multi_modal_analysis,
            query_analysis: Some(analysis),
            graph_insights,
            error: None,
        })
    }

    /// Empty the response cache. The embedding cache is untouched.
    pub fn clear_cache(&self) {
        let removed = self.cache.clear();
        events::cache_cleared("response", removed);
    }

    pub fn clear_embedding_cache(&self) {
        self.embeddings.clear_cache();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn metrics(&self) -> SearchMetricsSnapshot {
        self.lock_metrics().snapshot()
    }

    pub fn embedding_metrics(&self) -> PerformanceSnapshot {
        self.embeddings.performance_metrics()
    }

    pub async fn get_chunk(&self, id: &str) -> PrismResult<Option<Chunk>> {
        self.store.get_chunk_by_id(id).await
    }

    pub async fn store_stats(&self) -> PrismResult<StoreStats> {
        self.store.get_stats().await
    }

    fn lock_metrics(&self) -> std::sync::MutexGuard<'_, SearchMetrics> {
        self.metrics.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Vector results, most similar first, deduplicated and cut to `limit`.
fn basic_results(lists: Vec<fusion::RankedList>, limit: usize) -> Vec<SearchResult> {
    let mut results = fusion::concat::dedup(lists.into_iter().flat_map(|l| l.results).collect());
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results.truncate(limit);
    results
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Wall-clock time per pipeline phase.
struct PhaseClock {
    last: Instant,
    phases: BTreeMap<String, f64>,
}

impl PhaseClock {
    fn start() -> Self {
        Self {
            last: Instant::now(),
            phases: BTreeMap::new(),
        }
    }

    fn lap(&mut self, phase: &str) {
        self.phases.insert(phase.to_string(), elapsed_ms(self.last));
        self.last = Instant::now();
    }

    fn finish(self) -> BTreeMap<String, f64> {
        self.phases
    }
}
