use crate::models::{EntityCluster, EntityRelationship, ExtractedEntity};

/// Entity and relationship extraction capability.
///
/// Query analysis, graph augmentation and knowledge-graph construction only
/// see this trait, so the extraction backend can be swapped freely.
pub trait IEntityExtractor: Send + Sync {
    fn extract_entities(&self, text: &str) -> Vec<ExtractedEntity>;

    /// Every returned relationship's subject and object are members of `entities`.
    fn extract_relationships(
        &self,
        text: &str,
        entities: &[ExtractedEntity],
    ) -> Vec<EntityRelationship>;

    fn cluster_entities(
        &self,
        entities: &[ExtractedEntity],
        relationships: &[EntityRelationship],
    ) -> Vec<EntityCluster>;
}
