//! Per-result entity extraction and graph context against the query entities.

use std::collections::HashSet;
use std::sync::Arc;

use prism_core::models::{
    Centrality, EntityCluster, EntityRelationship, ExtractedEntity, GraphContext, SearchResult,
};
use prism_core::traits::IEntityExtractor;
use tracing::debug;

/// A fused result together with what the extractor found in its text.
#[derive(Debug, Clone)]
pub struct AugmentedResult {
    pub result: SearchResult,
    pub entities: Vec<ExtractedEntity>,
    pub relationships: Vec<EntityRelationship>,
    pub clusters: Vec<EntityCluster>,
}

impl AugmentedResult {
    /// Lower-cased entity keys.
    pub fn entity_keys(&self) -> HashSet<String> {
        self.entities.iter().map(ExtractedEntity::key).collect()
    }

    pub fn into_result(self) -> SearchResult {
        self.result
    }
}

pub struct GraphAugmenter {
    extractor: Arc<dyn IEntityExtractor>,
}

impl GraphAugmenter {
    pub fn new(extractor: Arc<dyn IEntityExtractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &Arc<dyn IEntityExtractor> {
        &self.extractor
    }

    /// Extract entities, relationships and clusters from one result's text.
    pub fn analyze(&self, result: SearchResult) -> AugmentedResult {
        let entities = self.extractor.extract_entities(&result.text);
        let relationships = self.extractor.extract_relationships(&result.text, &entities);
        let clusters = self.extractor.cluster_entities(&entities, &relationships);
        AugmentedResult {
            result,
            entities,
            relationships,
            clusters,
        }
    }

    /// Analyze every result and attach a [`GraphContext`] computed against
    /// `query_entities`. Order is preserved.
    pub fn augment(
        &self,
        results: Vec<SearchResult>,
        query_entities: &[ExtractedEntity],
    ) -> Vec<AugmentedResult> {
        let augmented: Vec<AugmentedResult> = results
            .into_iter()
            .map(|result| {
                let mut item = self.analyze(result);
                item.result.graph_context = Some(graph_context(&item, query_entities));
                item
            })
            .collect();
        debug!(
            results = augmented.len(),
            query_entities = query_entities.len(),
            "graph augmentation complete"
        );
        augmented
    }
}

/// Relationships touching a query entity, a two-level distance, and the
/// heuristic centrality triple.
pub fn graph_context(item: &AugmentedResult, query_entities: &[ExtractedEntity]) -> GraphContext {
    let entity_connections: Vec<EntityRelationship> = item
        .relationships
        .iter()
        .filter(|rel| query_entities.iter().any(|q| rel.touches(&q.text)))
        .cloned()
        .collect();
    let graph_distance = if entity_connections.is_empty() { 2 } else { 1 };
    let centrality = Centrality {
        betweenness: (entity_connections.len() as f64 / 5.0).min(1.0),
        closeness: (item.entities.len() as f64 / 10.0).min(1.0),
        pagerank: (item.relationships.len() as f64 / 8.0).min(1.0),
    };
    GraphContext {
        entity_connections,
        graph_distance,
        centrality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::HeuristicExtractor;
    use prism_core::models::{Chunk, ChunkMetadata};

    fn result(id: &str, text: &str) -> SearchResult {
        SearchResult::from_chunk(
            Chunk {
                id: id.to_string(),
                text: text.to_string(),
                metadata: ChunkMetadata::default(),
            },
            0.5,
        )
    }

    fn augmenter() -> GraphAugmenter {
        GraphAugmenter::new(Arc::new(HeuristicExtractor::default()))
    }

    #[test]
    fn connected_result_is_at_distance_one() {
        let query = HeuristicExtractor::default().extract_entities("Postgres");
        let out = augmenter().augment(vec![result("a", "Postgres is a database.")], &query);
        let ctx = out[0].result.graph_context.as_ref().unwrap();
        assert_eq!(ctx.graph_distance, 1);
        assert_eq!(ctx.entity_connections.len(), 1);
        assert!((ctx.centrality.betweenness - 0.2).abs() < 1e-12);
        assert!((ctx.centrality.closeness - 0.2).abs() < 1e-12);
        assert!((ctx.centrality.pagerank - 0.125).abs() < 1e-12);
    }

    #[test]
    fn unconnected_result_is_at_distance_two() {
        let query = HeuristicExtractor::default().extract_entities("Redis");
        let out = augmenter().augment(vec![result("a", "Postgres is a database.")], &query);
        let ctx = out[0].result.graph_context.as_ref().unwrap();
        assert_eq!(ctx.graph_distance, 2);
        assert!(ctx.entity_connections.is_empty());
        assert_eq!(ctx.centrality.betweenness, 0.0);
    }

    #[test]
    fn order_is_preserved_and_empty_text_is_harmless() {
        let out = augmenter().augment(vec![result("x", ""), result("y", "SQLite uses a file.")], &[]);
        assert_eq!(out[0].result.id, "x");
        assert_eq!(out[1].result.id, "y");
        assert!(out[0].entities.is_empty());
        assert_eq!(out[0].result.graph_context.as_ref().unwrap().graph_distance, 2);
    }
}
