//! Groups entities that are joined by relationships.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::graphmap::UnGraphMap;
use prism_core::models::{EntityCluster, EntityRelationship, ExtractedEntity};

/// Relationship count at which a cluster's centre reaches full centrality.
pub const CENTRALITY_SATURATION: f64 = 5.0;

/// Centrality of an entity touched by `degree` relationships.
pub fn degree_centrality(degree: usize) -> f64 {
    (degree as f64 / CENTRALITY_SATURATION).min(1.0)
}

/// One cluster per connected entity: the entity plus its direct neighbours.
/// Clusters with identical membership are emitted once; clusters may overlap.
pub fn cluster(
    entities: &[ExtractedEntity],
    relationships: &[EntityRelationship],
) -> Vec<EntityCluster> {
    let graph = entity_graph(entities, relationships);
    let degree_of = degrees(entities, relationships);
    let mut seen: HashSet<BTreeSet<usize>> = HashSet::new();
    let mut clusters = Vec::new();

    for (idx, entity) in entities.iter().enumerate() {
        if !graph.contains_node(idx) || graph.neighbors(idx).next().is_none() {
            continue;
        }
        let degree = degree_of.get(&entity.key()).copied().unwrap_or(0);
        let membership: BTreeSet<usize> = std::iter::once(idx).chain(graph.neighbors(idx)).collect();
        if !seen.insert(membership.clone()) {
            continue;
        }
        let mut members = vec![entity.text.clone()];
        members.extend(
            membership
                .iter()
                .filter(|&&m| m != idx)
                .map(|&m| entities[m].text.clone()),
        );
        clusters.push(EntityCluster {
            id: format!("cluster-{}", clusters.len()),
            name: entity.text.clone(),
            members,
            centrality: degree_centrality(degree),
        });
    }
    clusters
}

/// Undirected entity graph keyed by position in `entities`. Relationships
/// naming an unknown entity are ignored.
pub fn entity_graph(
    entities: &[ExtractedEntity],
    relationships: &[EntityRelationship],
) -> UnGraphMap<usize, ()> {
    let mut graph = UnGraphMap::new();
    for (s, o) in known_endpoints(entities, relationships) {
        if s != o {
            graph.add_edge(s, o, ());
        }
    }
    graph
}

/// Number of relationships touching each entity key, in either direction.
/// Parallel and reversed relationships each count.
pub fn degrees(
    entities: &[ExtractedEntity],
    relationships: &[EntityRelationship],
) -> HashMap<String, usize> {
    let mut counts = vec![0usize; entities.len()];
    for (s, o) in known_endpoints(entities, relationships) {
        counts[s] += 1;
        if o != s {
            counts[o] += 1;
        }
    }
    entities
        .iter()
        .zip(counts)
        .map(|(e, count)| (e.key(), count))
        .collect()
}

fn known_endpoints(
    entities: &[ExtractedEntity],
    relationships: &[EntityRelationship],
) -> Vec<(usize, usize)> {
    let by_key: HashMap<String, usize> = entities
        .iter()
        .enumerate()
        .map(|(i, e)| (e.key(), i))
        .collect();
    relationships
        .iter()
        .filter_map(|rel| {
            Some((
                *by_key.get(&rel.subject.to_lowercase())?,
                *by_key.get(&rel.object.to_lowercase())?,
            ))
        })
        .collect()
}
