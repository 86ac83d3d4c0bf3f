use serde::{Deserialize, Serialize};

/// Kind of a heuristically extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Capitalized word or run of capitalized words.
    ProperNoun,
    /// All-caps token such as `SQL` or `HTTP`.
    Acronym,
    /// Code-like identifier (`snake_case`, `camelCase`, dotted paths).
    Term,
    /// Operand of a relational surface pattern ("X is a *database*").
    Concept,
    /// `#tag` marker.
    Tag,
    /// `[[wiki link]]` marker.
    Link,
}

impl EntityType {
    /// Concepts and terms are what the knowledge graph reports per result.
    pub fn is_conceptual(self) -> bool {
        matches!(self, EntityType::Concept | EntityType::Term)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::ProperNoun => "proper_noun",
            EntityType::Acronym => "acronym",
            EntityType::Term => "term",
            EntityType::Concept => "concept",
            EntityType::Tag => "tag",
            EntityType::Link => "link",
        }
    }
}

/// A named text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub text: String,
    pub entity_type: EntityType,
    /// Byte offsets into the source text.
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

impl ExtractedEntity {
    /// Case-insensitive identity used for overlap and matching.
    pub fn key(&self) -> String {
        self.text.to_lowercase()
    }
}

/// A subject–predicate–object triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRelationship {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub strength: f64,
    /// Source text span the triple was read from.
    pub evidence: String,
}

impl EntityRelationship {
    /// Whether `entity` (case-insensitive) is the subject or the object.
    pub fn touches(&self, entity: &str) -> bool {
        self.subject.eq_ignore_ascii_case(entity) || self.object.eq_ignore_ascii_case(entity)
    }

    /// Case-insensitive triple key.
    pub fn key(&self) -> (String, String, String) {
        (
            self.subject.to_lowercase(),
            self.predicate.to_lowercase(),
            self.object.to_lowercase(),
        )
    }
}

/// Entities that co-occur in relationships. Clusters may overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCluster {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    pub centrality: f64,
}
