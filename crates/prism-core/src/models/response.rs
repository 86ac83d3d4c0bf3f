use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chunk::SearchResult;
use super::content_type::ContentType;
use super::entity::{EntityCluster, EntityRelationship, ExtractedEntity};
use super::knowledge::{GraphInsights, KnowledgeInsights};
use super::query::{FusionAlgorithm, SearchMode, StrategyKind};

/// How much each retrieval path is expected to contribute in a mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyScores {
    pub vector: f64,
    pub graph: f64,
    pub entity: f64,
    pub multi_modal: f64,
}

impl StrategyScores {
    pub fn for_mode(mode: SearchMode) -> Self {
        let (vector, graph, entity, multi_modal) = match mode {
            SearchMode::Basic => (1.0, 0.0, 0.0, 0.0),
            SearchMode::Advanced => (0.8, 0.2, 0.5, 0.0),
            SearchMode::Graph => (0.3, 1.0, 0.8, 0.0),
            SearchMode::MultiModal => (0.5, 0.0, 0.3, 1.0),
            SearchMode::Comprehensive => (0.8, 0.7, 0.6, 0.5),
        };
        Self {
            vector,
            graph,
            entity,
            multi_modal,
        }
    }
}

/// A strategy (or one of its sub-searches) failed and contributed nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyWarning {
    pub strategy: StrategyKind,
    /// Which sub-search failed, e.g. an entity text or a content type.
    pub scope: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAnalytics {
    pub query_id: Uuid,
    pub mode: SearchMode,
    /// Wall-clock time of the whole call, in milliseconds.
    pub total_time_ms: f64,
    /// Wall-clock time per pipeline phase, in milliseconds.
    pub time_breakdown: BTreeMap<String, f64>,
    pub strategy_scores: StrategyScores,
    #[serde(default)]
    pub warnings: Vec<StrategyWarning>,
    /// Served from the response cache.
    #[serde(default)]
    pub cached: bool,
}

impl SearchAnalytics {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            query_id: Uuid::new_v4(),
            mode,
            total_time_ms: 0.0,
            time_breakdown: BTreeMap::new(),
            strategy_scores: StrategyScores::for_mode(mode),
            warnings: Vec::new(),
            cached: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedResults {
    /// Raw result count per executed strategy, before fusion.
    pub strategy_counts: BTreeMap<StrategyKind, usize>,
    pub fusion_algorithm: FusionAlgorithm,
    pub fused_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub entities: Vec<ExtractedEntity>,
    pub relationships: Vec<EntityRelationship>,
    pub clusters: Vec<EntityCluster>,
    pub expanded_terms: Vec<String>,
    #[serde(skip)]
    pub query_embedding: Vec<f32>,
    pub embedding_model: String,
    pub embedding_confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBucket {
    High,
    Medium,
    Low,
}

impl QualityBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            QualityBucket::High
        } else if score >= 0.5 {
            QualityBucket::Medium
        } else {
            QualityBucket::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossModalCorrelation {
    pub source_id: String,
    pub target_id: String,
    pub source_type: ContentType,
    pub target_type: ContentType,
    pub correlation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiModalAnalysis {
    pub content_type_counts: BTreeMap<ContentType, usize>,
    pub quality_distribution: BTreeMap<QualityBucket, usize>,
    pub cross_modal_correlations: Vec<CrossModalCorrelation>,
    /// Mean cross-modal correlation; 1.0 when fewer than two modalities are present.
    pub consistency: f64,
    pub modality_weights: BTreeMap<ContentType, f64>,
    /// Mean similarity per modality, scaled by its cross-modal weight.
    pub modality_relevance: BTreeMap<ContentType, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    pub content_types: BTreeMap<ContentType, usize>,
    pub tags: BTreeMap<String, usize>,
    pub folders: BTreeMap<String, usize>,
}

impl Facets {
    pub fn from_results(results: &[SearchResult]) -> Self {
        let mut facets = Facets::default();
        for r in results {
            *facets
                .content_types
                .entry(r.metadata.content_type)
                .or_default() += 1;
            for tag in &r.metadata.tags {
                *facets.tags.entry(tag.to_lowercase()).or_default() += 1;
            }
            if let Some(folder) = &r.metadata.folder {
                *facets.folders.entry(folder.clone()).or_default() += 1;
            }
        }
        facets
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveSearchResponse {
    pub results: Vec<SearchResult>,
    pub analytics: SearchAnalytics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_results: Option<AdvancedResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_insights: Option<KnowledgeInsights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_modal_analysis: Option<MultiModalAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_analysis: Option<QueryAnalysis>,
    pub facets: Facets,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_insights: Option<GraphInsights>,
    /// Set for recoverable failures; `results` is then empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComprehensiveSearchResponse {
    pub fn empty(mode: SearchMode) -> Self {
        Self {
            results: Vec::new(),
            analytics: SearchAnalytics::new(mode),
            advanced_results: None,
            knowledge_insights: None,
            multi_modal_analysis: None,
            query_analysis: None,
            facets: Facets::default(),
            graph_insights: None,
            error: None,
        }
    }

    pub fn failed(mode: SearchMode, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(mode)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_mode_expects_vector_only() {
        let s = StrategyScores::for_mode(SearchMode::Basic);
        assert_eq!(s.vector, 1.0);
        assert_eq!(s.graph + s.entity + s.multi_modal, 0.0);
    }

    #[test]
    fn quality_buckets() {
        assert_eq!(QualityBucket::from_score(0.95), QualityBucket::High);
        assert_eq!(QualityBucket::from_score(0.5), QualityBucket::Medium);
        assert_eq!(QualityBucket::from_score(0.49), QualityBucket::Low);
    }

    proptest::proptest! {
        #[test]
        fn higher_quality_never_lands_in_a_lower_bucket(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            // High < Medium < Low in declaration order.
            proptest::prop_assert!(QualityBucket::from_score(high) <= QualityBucket::from_score(low));
        }
    }
}
