//! Knowledge-level aggregates over every result of a response.

use std::collections::HashMap;

use prism_core::constants::{MAX_CONTENT_CLUSTERS, MAX_KEY_ENTITIES, MAX_KEY_RELATIONSHIPS};
use prism_core::models::{ContentCluster, KeyEntity, KeyRelationship};

use crate::augmenter::AugmentedResult;
use crate::clustering::{degree_centrality, degrees};

pub const MIN_CLUSTER_MEMBERS: usize = 2;
/// Member count at which a content cluster is fully coherent.
pub const COHERENCE_SATURATION: f64 = 5.0;

/// Entities ranked by how many results mention them, then by their average
/// in-result centrality. Text and type come from the first mention.
pub fn key_entities(augmented: &[AugmentedResult]) -> Vec<KeyEntity> {
    struct Tally {
        entity: KeyEntity,
        centrality_sum: f64,
        first_seen: usize,
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    for item in augmented {
        let degree_of = degrees(&item.entities, &item.relationships);
        for entity in &item.entities {
            let key = entity.key();
            let centrality = degree_centrality(degree_of.get(&key).copied().unwrap_or(0));
            let next = tallies.len();
            let tally = tallies.entry(key).or_insert_with(|| Tally {
                entity: KeyEntity {
                    text: entity.text.clone(),
                    entity_type: entity.entity_type,
                    frequency: 0,
                    average_centrality: 0.0,
                },
                centrality_sum: 0.0,
                first_seen: next,
            });
            tally.entity.frequency += 1;
            tally.centrality_sum += centrality;
        }
    }

    let mut ranked: Vec<Tally> = tallies
        .into_values()
        .map(|mut t| {
            t.entity.average_centrality = t.centrality_sum / t.entity.frequency as f64;
            t
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.entity
            .frequency
            .cmp(&a.entity.frequency)
            .then_with(|| b.entity.average_centrality.total_cmp(&a.entity.average_centrality))
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });
    ranked
        .into_iter()
        .take(MAX_KEY_ENTITIES)
        .map(|t| t.entity)
        .collect()
}

/// Relationships merged by case-insensitive triple, strongest first.
pub fn key_relationships(augmented: &[AugmentedResult]) -> Vec<KeyRelationship> {
    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut merged: HashMap<(String, String, String), KeyRelationship> = HashMap::new();
    for rel in augmented.iter().flat_map(|item| &item.relationships) {
        let key = rel.key();
        match merged.get_mut(&key) {
            Some(existing) => {
                existing.strength += rel.strength;
                existing.occurrences += 1;
            }
            None => {
                order.push(key.clone());
                merged.insert(
                    key,
                    KeyRelationship {
                        subject: rel.subject.clone(),
                        predicate: rel.predicate.clone(),
                        object: rel.object.clone(),
                        strength: rel.strength,
                        occurrences: 1,
                    },
                );
            }
        }
    }

    let mut ranked: Vec<KeyRelationship> =
        order.iter().filter_map(|key| merged.remove(key)).collect();
    ranked.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    ranked.truncate(MAX_KEY_RELATIONSHIPS);
    ranked
}

/// Leading word of a title, lower-cased, stripped of punctuation.
fn leading_word(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
}

/// Results grouped by the leading word of their title. Largest groups first.
pub fn content_clusters(augmented: &[AugmentedResult]) -> Vec<ContentCluster> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();
    for item in augmented {
        let Some(word) = leading_word(item.result.title()) else {
            continue;
        };
        groups
            .entry(word.clone())
            .or_insert_with(|| {
                order.push(word);
                Vec::new()
            })
            .push(item.result.id.clone());
    }

    let mut clusters: Vec<ContentCluster> = order
        .into_iter()
        .filter_map(|label| {
            let result_ids = groups.remove(&label)?;
            (result_ids.len() >= MIN_CLUSTER_MEMBERS).then(|| ContentCluster {
                coherence: (result_ids.len() as f64 / COHERENCE_SATURATION).min(1.0),
                label,
                result_ids,
            })
        })
        .collect();
    clusters.sort_by(|a, b| b.result_ids.len().cmp(&a.result_ids.len()));
    clusters.truncate(MAX_CONTENT_CLUSTERS);
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::augmenter::GraphAugmenter;
    use crate::extraction::HeuristicExtractor;
    use prism_core::models::{Chunk, ChunkMetadata, SearchResult};

    fn augmented(items: &[(&str, Option<&str>, &str)]) -> Vec<AugmentedResult> {
        let augmenter = GraphAugmenter::new(Arc::new(HeuristicExtractor::default()));
        items
            .iter()
            .map(|(id, title, text)| {
                augmenter.analyze(SearchResult::from_chunk(
                    Chunk {
                        id: id.to_string(),
                        text: text.to_string(),
                        metadata: ChunkMetadata {
                            title: title.map(str::to_string),
                            ..Default::default()
                        },
                    },
                    0.5,
                ))
            })
            .collect()
    }

    #[test]
    fn key_entities_rank_by_frequency() {
        let items = augmented(&[
            ("a", None, "we run Kafka and Redis"),
            ("b", None, "we run Kafka"),
        ]);
        let keys = key_entities(&items);
        assert_eq!(keys[0].text, "Kafka");
        assert_eq!(keys[0].frequency, 2);
        assert_eq!(keys[1].text, "Redis");
        assert_eq!(keys[1].frequency, 1);
    }

    #[test]
    fn key_entity_centrality_is_averaged() {
        let items = augmented(&[
            ("a", None, "we run Kafka and Redis"),
            ("b", None, "we run Kafka"),
        ]);
        let kafka = key_entities(&items).into_iter().find(|k| k.text == "Kafka").unwrap();
        // Degree 1 in the first result (co-occurrence with Redis), 0 in the second.
        assert!((kafka.average_centrality - 0.1).abs() < 1e-12);
    }

    #[test]
    fn key_relationships_accumulate_across_results() {
        let items = augmented(&[
            ("a", None, "Postgres is a database."),
            ("b", None, "Postgres is a database."),
        ]);
        let rels = key_relationships(&items);
        assert_eq!(rels[0].subject, "Postgres");
        assert_eq!(rels[0].predicate, "is");
        assert_eq!(rels[0].object, "database");
        assert_eq!(rels[0].occurrences, 2);
        assert!((rels[0].strength - 1.6).abs() < 1e-12);
    }

    #[test]
    fn content_clusters_need_two_members() {
        let items = augmented(&[
            ("a", Some("Database notes: Postgres"), "x"),
            ("b", Some("database notes: SQLite"), "y"),
            ("c", Some("Gardening tips"), "z"),
        ]);
        let clusters = content_clusters(&items);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].label, "database");
        assert_eq!(clusters[0].result_ids, vec!["a", "b"]);
        assert!((clusters[0].coherence - 0.4).abs() < 1e-12);
    }

    #[test]
    fn content_clusters_are_capped_and_sorted() {
        let mut rows = Vec::new();
        for (i, word) in ["alpha", "beta", "gamma", "delta", "eps", "zeta"].iter().enumerate() {
            for k in 0..(2 + i) {
                rows.push((format!("{word}-{k}"), format!("{word} title")));
            }
        }
        let items: Vec<(&str, Option<&str>, &str)> = rows
            .iter()
            .map(|(id, title)| (id.as_str(), Some(title.as_str()), "text"))
            .collect();
        let clusters = content_clusters(&augmented(&items));
        assert_eq!(clusters.len(), MAX_CONTENT_CLUSTERS);
        assert_eq!(clusters[0].label, "zeta");
        assert_eq!(clusters[0].coherence, 1.0);
        assert!(clusters.windows(2).all(|w| w[0].result_ids.len() >= w[1].result_ids.len()));
    }
}
