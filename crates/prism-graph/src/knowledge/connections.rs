//! Pairwise links between results of one response.

use prism_core::constants::SIMILARITY_GAP_THRESHOLD;
use prism_core::models::{ConnectionKind, InterResultConnection};

use crate::augmenter::AugmentedResult;

/// Shared-entity count at which a connection reaches full strength.
pub const SHARED_ENTITY_SATURATION: f64 = 3.0;

/// One connection per unordered pair, in `(i, j)` order with `i < j`.
///
/// Shared entities take precedence. Without them, a pair whose raw
/// similarities differ by more than [`SIMILARITY_GAP_THRESHOLD`] is linked with the gap
/// as its strength.
pub fn connect(augmented: &[AugmentedResult]) -> Vec<InterResultConnection> {
    let keys: Vec<_> = augmented.iter().map(AugmentedResult::entity_keys).collect();
    let mut connections = Vec::new();

    for i in 0..augmented.len() {
        for j in (i + 1)..augmented.len() {
            let (a, b) = (&augmented[i].result, &augmented[j].result);
            let mut shared: Vec<String> = keys[i].intersection(&keys[j]).cloned().collect();
            if !shared.is_empty() {
                shared.sort();
                connections.push(InterResultConnection {
                    source_id: a.id.clone(),
                    target_id: b.id.clone(),
                    kind: ConnectionKind::SharedEntities,
                    strength: (shared.len() as f64 / SHARED_ENTITY_SATURATION).min(1.0),
                    shared_entities: shared,
                });
                continue;
            }
            let gap = (a.similarity - b.similarity).abs();
            if gap > SIMILARITY_GAP_THRESHOLD {
                connections.push(InterResultConnection {
                    source_id: a.id.clone(),
                    target_id: b.id.clone(),
                    kind: ConnectionKind::SemanticSimilarity,
                    strength: gap.min(1.0),
                    shared_entities: Vec::new(),
                });
            }
        }
    }
    connections
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::models::{Chunk, ChunkMetadata, EntityType, ExtractedEntity, SearchResult};

    fn item(id: &str, similarity: f64, entities: &[&str]) -> AugmentedResult {
        AugmentedResult {
            result: SearchResult::from_chunk(
                Chunk {
                    id: id.to_string(),
                    text: String::new(),
                    metadata: ChunkMetadata::default(),
                },
                similarity,
            ),
            entities: entities
                .iter()
                .map(|t| ExtractedEntity {
                    text: t.to_string(),
                    entity_type: EntityType::ProperNoun,
                    start: 0,
                    end: t.len(),
                    confidence: 0.8,
                })
                .collect(),
            relationships: Vec::new(),
            clusters: Vec::new(),
        }
    }

    #[test]
    fn shared_entities_are_case_insensitive() {
        let conns = connect(&[item("a", 0.5, &["Postgres", "SQL"]), item("b", 0.5, &["postgres"])]);
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].kind, ConnectionKind::SharedEntities);
        assert_eq!(conns[0].shared_entities, vec!["postgres"]);
        assert!((conns[0].strength - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn shared_strength_saturates() {
        let ents = ["A1x", "B2x", "C3x", "D4x"];
        let conns = connect(&[item("a", 0.5, &ents), item("b", 0.5, &ents)]);
        assert_eq!(conns[0].strength, 1.0);
    }

    #[test]
    fn large_similarity_gap_links_unrelated_results() {
        let conns = connect(&[item("a", 0.95, &[]), item("b", 0.1, &[])]);
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].kind, ConnectionKind::SemanticSimilarity);
        assert!((conns[0].strength - 0.85).abs() < 1e-12);
    }

    #[test]
    fn small_gap_without_entities_is_not_linked() {
        assert!(connect(&[item("a", 0.9, &[]), item("b", 0.3, &[])]).is_empty());
    }

    #[test]
    fn every_unordered_pair_is_considered_once() {
        let items = [
            item("a", 0.5, &["Kafka"]),
            item("b", 0.5, &["Kafka"]),
            item("c", 0.5, &["Kafka"]),
        ];
        let conns = connect(&items);
        assert_eq!(conns.len(), 3);
        assert_eq!(
            conns.iter().map(|c| (c.source_id.as_str(), c.target_id.as_str())).collect::<Vec<_>>(),
            vec![("a", "b"), ("a", "c"), ("b", "c")]
        );
    }
}
