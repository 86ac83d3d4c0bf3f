//! Pattern-based entity and relationship extraction.
//!
//! Good enough to seed graph traversal and reranking; not a linguistic
//! parser. Anything smarter plugs in behind the same trait.

pub mod entities;
pub mod patterns;
pub mod relationships;

use prism_core::models::{EntityCluster, EntityRelationship, ExtractedEntity};
use prism_core::traits::IEntityExtractor;

use crate::clustering;

/// Default [`IEntityExtractor`] backed by the surface patterns in [`patterns`].
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    /// Link neighbouring entities of the same sentence with a weak
    /// `co_occurs_with` relationship.
    pub co_occurrence: bool,
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self {
            co_occurrence: true,
        }
    }
}

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relational patterns only.
    pub fn without_co_occurrence() -> Self {
        Self {
            co_occurrence: false,
        }
    }
}

impl IEntityExtractor for HeuristicExtractor {
    fn extract_entities(&self, text: &str) -> Vec<ExtractedEntity> {
        entities::extract(text)
    }

    fn extract_relationships(
        &self,
        text: &str,
        entities: &[ExtractedEntity],
    ) -> Vec<EntityRelationship> {
        relationships::extract(text, entities, self.co_occurrence)
    }

    fn cluster_entities(
        &self,
        entities: &[ExtractedEntity],
        relationships: &[EntityRelationship],
    ) -> Vec<EntityCluster> {
        clustering::cluster(entities, relationships)
    }
}
