//! Query-scoped knowledge graph over a full result set.
//!
//! Built once per response from the augmented results, then discarded.

pub mod connections;
pub mod insights;
pub mod result_graph;

use prism_core::constants::MAX_CONCEPTS_PER_RESULT;
use prism_core::models::{GraphInsights, KnowledgeInsights, KnowledgeSegment, ResultConcepts};
use tracing::debug;

use crate::augmenter::AugmentedResult;

pub use connections::connect;
pub use insights::{content_clusters, key_entities, key_relationships};
pub use result_graph::graph_insights;

#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeGraphBuilder;

impl KnowledgeGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Per-result concepts and pairwise inter-result connections.
    pub fn segment(&self, augmented: &[AugmentedResult]) -> KnowledgeSegment {
        KnowledgeSegment {
            concepts: augmented
                .iter()
                .map(|item| ResultConcepts {
                    result_id: item.result.id.clone(),
                    concepts: top_concepts(item),
                })
                .collect(),
            inter_result_connections: connect(augmented),
        }
    }

    /// Build the segment, write each result's concepts back onto it, and
    /// aggregate the knowledge-level insights.
    pub fn build(&self, augmented: &mut [AugmentedResult]) -> KnowledgeInsights {
        let segment = self.segment(augmented);
        for (item, concepts) in augmented.iter_mut().zip(&segment.concepts) {
            item.result.concepts = concepts.concepts.clone();
        }
        let insights = KnowledgeInsights {
            key_entities: key_entities(augmented),
            key_relationships: key_relationships(augmented),
            content_clusters: content_clusters(augmented),
            segment,
        };
        debug!(
            results = augmented.len(),
            connections = insights.segment.inter_result_connections.len(),
            key_entities = insights.key_entities.len(),
            "knowledge graph built"
        );
        insights
    }

    pub fn graph_insights(
        &self,
        augmented: &[AugmentedResult],
        segment: &KnowledgeSegment,
    ) -> GraphInsights {
        let ids: Vec<&str> = augmented.iter().map(|a| a.result.id.as_str()).collect();
        graph_insights(&ids, &segment.inter_result_connections)
    }
}

/// Concept and term entities of one result, in source order.
pub fn top_concepts(item: &AugmentedResult) -> Vec<String> {
    item.entities
        .iter()
        .filter(|e| e.entity_type.is_conceptual())
        .take(MAX_CONCEPTS_PER_RESULT)
        .map(|e| e.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::augmenter::GraphAugmenter;
    use crate::extraction::HeuristicExtractor;
    use prism_core::models::{Chunk, ChunkMetadata, SearchResult};

    fn augmented(items: &[(&str, &str)]) -> Vec<AugmentedResult> {
        let augmenter = GraphAugmenter::new(Arc::new(HeuristicExtractor::default()));
        items
            .iter()
            .map(|(id, text)| {
                augmenter.analyze(SearchResult::from_chunk(
                    Chunk {
                        id: id.to_string(),
                        text: text.to_string(),
                        metadata: ChunkMetadata::default(),
                    },
                    0.5,
                ))
            })
            .collect()
    }

    #[test]
    fn build_writes_concepts_back() {
        let mut items = augmented(&[("a", "Postgres is a database. Postgres has extensions.")]);
        let insights = KnowledgeGraphBuilder::new().build(&mut items);
        assert_eq!(items[0].result.concepts, vec!["database", "extensions"]);
        assert_eq!(insights.segment.concepts[0].result_id, "a");
    }

    #[test]
    fn concepts_are_capped() {
        let text = "alpha_one beta_two gamma_three delta_four epsilon_five zeta_six";
        let items = augmented(&[("a", text)]);
        assert_eq!(top_concepts(&items[0]).len(), MAX_CONCEPTS_PER_RESULT);
    }

    #[test]
    fn empty_result_set_builds_empty_insights() {
        let mut items = augmented(&[]);
        let builder = KnowledgeGraphBuilder::new();
        let insights = builder.build(&mut items);
        assert!(insights.key_entities.is_empty());
        assert!(insights.segment.inter_result_connections.is_empty());
        let graph = builder.graph_insights(&items, &insights.segment);
        assert_eq!(graph.node_count, 0);
        assert_eq!(graph.most_connected, None);
    }
}
