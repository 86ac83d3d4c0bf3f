use serde::{Deserialize, Serialize};

use super::entity::EntityType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    SharedEntities,
    SemanticSimilarity,
}

/// A pairwise link between two results of the same response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterResultConnection {
    pub source_id: String,
    pub target_id: String,
    pub kind: ConnectionKind,
    pub strength: f64,
    /// Lower-cased entity keys the two results share. Empty for similarity links.
    #[serde(default)]
    pub shared_entities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultConcepts {
    pub result_id: String,
    pub concepts: Vec<String>,
}

/// Query-scoped graph over the full result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSegment {
    pub concepts: Vec<ResultConcepts>,
    pub inter_result_connections: Vec<InterResultConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEntity {
    pub text: String,
    pub entity_type: EntityType,
    pub frequency: usize,
    pub average_centrality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRelationship {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Strength accumulated over every occurrence.
    pub strength: f64,
    pub occurrences: usize,
}

/// Results grouped by the leading word of their titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCluster {
    pub label: String,
    pub result_ids: Vec<String>,
    pub coherence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeInsights {
    pub key_entities: Vec<KeyEntity>,
    pub key_relationships: Vec<KeyRelationship>,
    pub content_clusters: Vec<ContentCluster>,
    pub segment: KnowledgeSegment,
}

/// Shape of the per-query result graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInsights {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub connected_components: usize,
    pub most_connected: Option<String>,
}
