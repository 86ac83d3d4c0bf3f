//! Data model shared across the workspace.

mod chunk;
mod content_type;
mod degradation_event;
mod embedding_model;
mod entity;
mod knowledge;
mod query;
mod response;
mod scoring;

pub use chunk::{Chunk, ChunkMetadata, SearchResult, StoreStats};
pub use content_type::ContentType;
pub use degradation_event::DegradationEvent;
pub use embedding_model::{
    EmbeddingModel, EmbeddingOutcome, EmbeddingStrategy, ModelType, QualityThresholds,
};
pub use entity::{EntityCluster, EntityRelationship, EntityType, ExtractedEntity};
pub use knowledge::{
    ConnectionKind, ContentCluster, GraphInsights, InterResultConnection, KeyEntity,
    KeyRelationship, KnowledgeInsights, KnowledgeSegment, ResultConcepts,
};
pub use query::{
    ComprehensiveSearchQuery, DateRange, ExpansionFlags, FusionAlgorithm, GraphTraversal,
    SearchFilters, SearchMode, SearchOptions, SearchQuery, StrategyKind,
};
pub use response::{
    AdvancedResults, CacheStats, ComprehensiveSearchResponse, CrossModalCorrelation, Facets,
    MultiModalAnalysis, QualityBucket, QueryAnalysis, SearchAnalytics, StrategyScores,
    StrategyWarning,
};
pub use scoring::{Centrality, GraphContext, ScoringBreakdown};
