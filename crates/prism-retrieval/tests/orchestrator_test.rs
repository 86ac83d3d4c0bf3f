//! Orchestrator behavior around failures, caching, fusion choice and the
//! store passthroughs.

use std::collections::HashSet;
use std::sync::Arc;

use prism_core::config::{EmbeddingConfig, PrismConfig};
use prism_core::errors::{EmbeddingError, PrismError};
use prism_core::models::{
    ComprehensiveSearchQuery, ContentType, FusionAlgorithm, SearchOptions, StrategyKind,
};
use prism_core::traits::IVectorStore;
use prism_embeddings::EmbeddingStrategyManager;
use prism_graph::HeuristicExtractor;
use prism_retrieval::ComprehensiveSearchOrchestrator;
use prism_storage::MemoryVectorStore;
use test_fixtures::{load_config, load_corpus, FailingProvider, FailingStore, SelectiveFailStore};

async fn indexed_store(manager: &EmbeddingStrategyManager) -> Arc<MemoryVectorStore> {
    let store = Arc::new(MemoryVectorStore::new());
    for chunk in load_corpus() {
        let embedding = manager.embed(&chunk.text).await.unwrap();
        store.upsert(chunk, embedding);
    }
    store
}

fn orchestrator(
    config: PrismConfig,
    store: Arc<dyn IVectorStore>,
    manager: Arc<EmbeddingStrategyManager>,
) -> ComprehensiveSearchOrchestrator {
    ComprehensiveSearchOrchestrator::new(config, store, manager, Arc::new(HeuristicExtractor::default()))
}

async fn golden() -> ComprehensiveSearchOrchestrator {
    let config = load_config();
    let manager = Arc::new(EmbeddingStrategyManager::from_config(&config.embedding).await);
    let store = indexed_store(&manager).await;
    orchestrator(config, store, manager)
}

fn failing_manager(config: &EmbeddingConfig) -> EmbeddingStrategyManager {
    let manager = EmbeddingStrategyManager::new(config);
    for model in &config.models {
        manager
            .register_provider(&model.name, Arc::new(FailingProvider::new(&model.name, model.dimension)))
            .unwrap();
    }
    manager
}

#[tokio::test]
async fn unknown_mode_raises_without_touching_the_cache() {
    let orchestrator = golden().await;
    let err = orchestrator
        .search(&ComprehensiveSearchQuery::new("Postgres", "semantic"))
        .await
        .unwrap_err();
    assert!(matches!(err, PrismError::UnknownMode { ref mode } if mode == "semantic"));
    assert_eq!(orchestrator.cache_stats().size, 0);
}

#[tokio::test]
async fn embedding_exhaustion_is_fatal() {
    let config = load_config();
    let manager = Arc::new(failing_manager(&config.embedding));
    let orchestrator = orchestrator(config, Arc::new(MemoryVectorStore::new()), manager);

    let err = orchestrator
        .search(&ComprehensiveSearchQuery::new("Postgres", "comprehensive"))
        .await
        .unwrap_err();
    assert!(matches!(err, PrismError::Embedding(EmbeddingError::Exhausted { .. })));
    assert!(err.is_fatal());
    assert_eq!(orchestrator.metrics().failed_queries, 1);
}

#[tokio::test]
async fn unavailable_store_yields_an_error_response() {
    let config = load_config();
    let manager = Arc::new(EmbeddingStrategyManager::from_config(&config.embedding).await);
    let orchestrator = orchestrator(config, Arc::new(FailingStore), manager);

    let response = orchestrator
        .search(&ComprehensiveSearchQuery::new("database systems", "basic"))
        .await
        .unwrap();
    assert!(response.results.is_empty());
    let error = response.error.expect("error is reported on the response");
    assert!(error.contains("scripted outage"), "{error}");
    assert_eq!(response.analytics.warnings.len(), 1);
    // Error responses are never cached.
    assert_eq!(orchestrator.cache_stats().size, 0);
}

#[tokio::test]
async fn one_failed_content_type_only_warns() {
    let config = load_config();
    let manager = Arc::new(EmbeddingStrategyManager::from_config(&config.embedding).await);
    let store = Arc::new(SelectiveFailStore::new(
        indexed_store(&manager).await,
        |filters| filters.file_types == [ContentType::Video],
    ));
    let orchestrator = orchestrator(config, Arc::clone(&store) as Arc<dyn IVectorStore>, manager);

    let response = orchestrator
        .search(&ComprehensiveSearchQuery::new("database systems", "multi_modal"))
        .await
        .unwrap();

    assert!(response.error.is_none());
    assert!(!response.results.is_empty());
    assert_eq!(store.failures(), 1);
    let warnings = &response.analytics.warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].strategy, StrategyKind::MultiModal);
    assert_eq!(warnings[0].scope, "video");
    assert_eq!(orchestrator.metrics().partial_failures, 1);
    // Partial responses are not cached either.
    assert_eq!(orchestrator.cache_stats().size, 0);
}

#[tokio::test]
async fn single_entity_query_runs_the_entity_strategy() {
    let orchestrator = golden().await;
    let response = orchestrator
        .search(&ComprehensiveSearchQuery::new("Postgres", "comprehensive"))
        .await
        .unwrap();

    let analysis = response.query_analysis.unwrap();
    assert!(analysis.entities.iter().any(|e| e.text == "Postgres"));
    let advanced = response.advanced_results.unwrap();
    assert!(advanced.strategy_counts[&StrategyKind::Entity] > 0);
}

#[tokio::test]
async fn multi_modal_analysis_describes_returned_results() {
    let orchestrator = golden().await;
    let options = SearchOptions {
        limit: Some(2),
        ..Default::default()
    };
    let response = orchestrator
        .search(&ComprehensiveSearchQuery::new("database systems", "comprehensive").with_options(options))
        .await
        .unwrap();

    assert!(response.advanced_results.unwrap().fused_count > response.results.len());
    let analysis = response.multi_modal_analysis.unwrap();
    let counted: usize = analysis.content_type_counts.values().sum();
    assert_eq!(counted, response.results.len());
    let bucketed: usize = analysis.quality_distribution.values().sum();
    assert_eq!(bucketed, response.results.len());
}

#[tokio::test]
async fn comprehensive_response_is_complete_and_consistent() {
    let orchestrator = golden().await;
    let options = SearchOptions {
        limit: Some(5),
        ..Default::default()
    };
    let response = orchestrator
        .search(&ComprehensiveSearchQuery::new("Postgres database", "comprehensive").with_options(options))
        .await
        .unwrap();

    assert!(!response.results.is_empty());
    assert!(response.results.len() <= 5);
    let ids: HashSet<&str> = response.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), response.results.len());

    for pair in response.results.windows(2) {
        assert!(pair[0].scoring.unwrap().combined >= pair[1].scoring.unwrap().combined);
    }

    let advanced = response.advanced_results.unwrap();
    assert_eq!(advanced.fusion_algorithm, FusionAlgorithm::Rrf);
    assert_eq!(
        advanced.strategy_counts.keys().copied().collect::<Vec<_>>(),
        vec![
            StrategyKind::Vector,
            StrategyKind::Entity,
            StrategyKind::Graph,
            StrategyKind::MultiModal
        ]
    );
    assert!(advanced.fused_count >= response.results.len());

    let faceted: usize = response.facets.content_types.values().sum();
    assert_eq!(faceted, response.results.len());

    assert!(response.multi_modal_analysis.is_some());
    let graph = response.graph_insights.unwrap();
    assert_eq!(graph.node_count, response.results.len());
    assert!(response.knowledge_insights.is_some());
    assert!(response.query_analysis.is_some());
}

#[tokio::test]
async fn caller_fusion_choice_is_honored() {
    let orchestrator = golden().await;
    let options = SearchOptions {
        entity_expansion: true,
        fusion: Some(FusionAlgorithm::Weighted),
        ..Default::default()
    };
    let response = orchestrator
        .search(&ComprehensiveSearchQuery::new("database systems", "advanced").with_options(options))
        .await
        .unwrap();

    let advanced = response.advanced_results.unwrap();
    assert_eq!(advanced.fusion_algorithm, FusionAlgorithm::Weighted);
    assert!(advanced.strategy_counts.contains_key(&StrategyKind::Entity));
    assert!(response.results.iter().all(|r| r.fused_score.is_some()));
}

#[tokio::test]
async fn repeated_query_hits_the_response_cache() {
    let orchestrator = golden().await;
    let query = ComprehensiveSearchQuery::new("vector search", "comprehensive");

    let first = orchestrator.search(&query).await.unwrap();
    let second = orchestrator.search(&query).await.unwrap();
    assert!(!first.analytics.cached);
    assert!(second.analytics.cached);
    assert_eq!(first.results, second.results);
    assert_eq!(first.analytics.query_id, second.analytics.query_id);

    let metrics = orchestrator.metrics();
    assert_eq!(metrics.response_cache_hits, 1);
    assert_eq!(metrics.response_cache_misses, 1);
    assert_eq!(metrics.total_queries, 2);

    let keys = orchestrator.cache_stats().keys;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("comprehensive:vector search:"));
}

#[tokio::test]
async fn clearing_the_response_cache_keeps_embeddings() {
    let orchestrator = golden().await;
    orchestrator
        .search(&ComprehensiveSearchQuery::new("Postgres", "advanced"))
        .await
        .unwrap();
    let embedded = orchestrator.embeddings().cache_len();
    assert!(embedded > 0);

    orchestrator.clear_cache();
    assert_eq!(orchestrator.cache_stats().size, 0);
    assert_eq!(orchestrator.embeddings().cache_len(), embedded);

    orchestrator.clear_embedding_cache();
    assert_eq!(orchestrator.embeddings().cache_len(), 0);
}

#[tokio::test]
async fn store_passthroughs() {
    let orchestrator = golden().await;
    let chunk = orchestrator.get_chunk("db-postgres").await.unwrap().unwrap();
    assert!(chunk.text.starts_with("Postgres is a database"));
    assert!(orchestrator.get_chunk("missing").await.unwrap().is_none());

    let stats = orchestrator.store_stats().await.unwrap();
    assert_eq!(stats.total_chunks, load_corpus().len());
    assert_eq!(stats.by_content_type[&ContentType::Pdf], 2);
}
