//! Query analysis: entities, relationships, expansion terms, query embedding.

pub mod synonym_expander;

use std::sync::Arc;

use prism_core::errors::PrismResult;
use prism_core::models::{ExpansionFlags, QueryAnalysis};
use prism_core::traits::IEntityExtractor;
use prism_embeddings::EmbeddingStrategyManager;
use tracing::debug;

pub struct QueryAnalyzer {
    extractor: Arc<dyn IEntityExtractor>,
    embeddings: Arc<EmbeddingStrategyManager>,
}

impl QueryAnalyzer {
    pub fn new(
        extractor: Arc<dyn IEntityExtractor>,
        embeddings: Arc<EmbeddingStrategyManager>,
    ) -> Self {
        Self {
            extractor,
            embeddings,
        }
    }

    /// Extract entities and relationships from `text`, build the expansion
    /// terms requested by `expansion`, and embed `text` with the default
    /// model selection.
    ///
    /// Semantic expansion starts from `[text]`, appends entity texts and then
    /// abbreviation synonyms. Entity expansion appends entity texts. Terms are
    /// deduplicated case-insensitively; the list is empty when neither is set.
    pub async fn analyze(&self, text: &str, expansion: ExpansionFlags) -> PrismResult<QueryAnalysis> {
        let entities = self.extractor.extract_entities(text);
        let relationships = self.extractor.extract_relationships(text, &entities);
        let clusters = self.extractor.cluster_entities(&entities, &relationships);

        let mut expanded_terms: Vec<String> = Vec::new();
        let mut push = |term: &str| {
            let term = term.trim();
            if !term.is_empty() && !expanded_terms.iter().any(|t| t.eq_ignore_ascii_case(term)) {
                expanded_terms.push(term.to_string());
            }
        };
        if expansion.semantic {
            push(text);
            for entity in &entities {
                push(&entity.text);
            }
            for synonym in synonym_expander::synonyms(text) {
                push(&synonym);
            }
        }
        if expansion.entity {
            for entity in &entities {
                push(&entity.text);
            }
        }

        let outcome = self.embeddings.embed_with_strategy(text, None, None).await?;

        debug!(
            entities = entities.len(),
            relationships = relationships.len(),
            expanded_terms = expanded_terms.len(),
            model = %outcome.model,
            "query analyzed"
        );

        Ok(QueryAnalysis {
            entities,
            relationships,
            clusters,
            expanded_terms,
            query_embedding: outcome.vector,
            embedding_model: outcome.model,
            embedding_confidence: outcome.confidence,
        })
    }

    /// Embedding only, for modes that skip analysis.
    pub async fn embed_only(&self, text: &str) -> PrismResult<QueryAnalysis> {
        let outcome = self.embeddings.embed_with_strategy(text, None, None).await?;
        Ok(QueryAnalysis {
            entities: Vec::new(),
            relationships: Vec::new(),
            clusters: Vec::new(),
            expanded_terms: Vec::new(),
            query_embedding: outcome.vector,
            embedding_model: outcome.model,
            embedding_confidence: outcome.confidence,
        })
    }

    /// Seeds for the entity strategy: every entity text, then every expansion
    /// term other than the query text itself. An entity spanning the whole
    /// query is still a seed.
    pub fn entity_seeds(text: &str, analysis: &QueryAnalysis) -> Vec<String> {
        let mut seeds: Vec<String> = Vec::new();
        let entities = analysis.entities.iter().map(|e| e.text.as_str());
        let expansions = analysis
            .expanded_terms
            .iter()
            .map(String::as_str)
            .filter(|term| !term.eq_ignore_ascii_case(text.trim()));
        for seed in entities.chain(expansions) {
            if !seeds.iter().any(|s| s.eq_ignore_ascii_case(seed)) {
                seeds.push(seed.to_string());
            }
        }
        seeds
    }
}
