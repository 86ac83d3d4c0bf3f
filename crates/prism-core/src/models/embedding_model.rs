use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::content_type::ContentType;

/// What kind of signal a model's vectors carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    Semantic,
    Keyword,
    Hybrid,
}

/// Static description of an embedding model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingModel {
    pub name: String,
    /// Declared output dimension. Rewritten to the observed length when a
    /// provider disagrees.
    pub dimension: usize,
    pub model_type: ModelType,
    /// Domain this model is tuned for, matched against a caller's domain hint.
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Embeddings below this confidence are logged as low quality.
    pub min_confidence: f64,
    /// Calls slower than this count as slow embeddings.
    pub slow_embedding_ms: u64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_confidence: crate::config::defaults::DEFAULT_MIN_CONFIDENCE,
            slow_embedding_ms: crate::config::defaults::DEFAULT_SLOW_EMBEDDING_MS,
        }
    }
}

/// Model-selection policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingStrategy {
    pub primary_model: String,
    #[serde(default)]
    pub fallback_models: Vec<String>,
    #[serde(default)]
    pub content_type_overrides: BTreeMap<ContentType, String>,
    #[serde(default)]
    pub quality_thresholds: QualityThresholds,
}

/// Result of a strategy-aware embedding call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingOutcome {
    pub vector: Vec<f32>,
    /// Model that actually produced the vector.
    pub model: String,
    pub confidence: f64,
    pub cached: bool,
    pub fallback: bool,
}
