use serde::{Deserialize, Serialize};

use super::entity::EntityRelationship;

/// Per-result score components, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub vector: f64,
    pub graph: f64,
    pub entity: f64,
    pub temporal: f64,
    pub quality: f64,
    /// Weighted sum of the components above.
    pub combined: f64,
}

/// Heuristic stand-ins for graph-database centrality measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Centrality {
    pub betweenness: f64,
    pub closeness: f64,
    pub pagerank: f64,
}

/// How one result relates to the entities in the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphContext {
    /// Relationships in the result whose subject or object is a query entity.
    pub entity_connections: Vec<EntityRelationship>,
    /// 1 when any connection exists, else 2.
    pub graph_distance: u32,
    pub centrality: Centrality,
}
