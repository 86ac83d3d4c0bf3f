use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{ContentType, EmbeddingModel, EmbeddingStrategy, ModelType, QualityThresholds};

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider backend for every configured model: "tfidf" or "ollama".
    pub provider: String,
    /// Base URL for the Ollama backend.
    pub ollama_url: Option<String>,
    pub models: Vec<EmbeddingModel>,
    pub strategy: EmbeddingStrategy,
    /// Embedding cache max entries.
    pub cache_capacity: u64,
    /// Texts per group in batch embedding.
    pub batch_size: usize,
    /// Pause between batch groups.
    pub batch_delay_ms: u64,
    /// Confidence multiplier applied when a fallback model answered.
    pub fallback_penalty: f64,
    /// L2-normalize vectors before caching and returning them.
    pub normalize: bool,
}

impl EmbeddingConfig {
    pub fn model(&self, name: &str) -> Option<&EmbeddingModel> {
        self.models.iter().find(|m| m.name == name)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_PROVIDER.to_string(),
            ollama_url: None,
            models: default_models(),
            strategy: default_strategy(),
            cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            batch_delay_ms: defaults::DEFAULT_BATCH_DELAY_MS,
            fallback_penalty: defaults::DEFAULT_FALLBACK_PENALTY,
            normalize: defaults::DEFAULT_NORMALIZE_VECTORS,
        }
    }
}

impl Default for EmbeddingStrategy {
    fn default() -> Self {
        default_strategy()
    }
}

fn default_strategy() -> EmbeddingStrategy {
    let mut content_type_overrides = BTreeMap::new();
    content_type_overrides.insert(ContentType::Code, defaults::DEFAULT_CODE_MODEL.to_string());
    EmbeddingStrategy {
        primary_model: defaults::DEFAULT_PRIMARY_MODEL.to_string(),
        fallback_models: vec![
            defaults::DEFAULT_KEYWORD_MODEL.to_string(),
            defaults::DEFAULT_OFFLINE_MODEL.to_string(),
        ],
        content_type_overrides,
        quality_thresholds: QualityThresholds {
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            slow_embedding_ms: defaults::DEFAULT_SLOW_EMBEDDING_MS,
        },
    }
}

fn default_models() -> Vec<EmbeddingModel> {
    vec![
        EmbeddingModel {
            name: defaults::DEFAULT_PRIMARY_MODEL.to_string(),
            dimension: 768,
            model_type: ModelType::Semantic,
            domain: Some("general".to_string()),
            strengths: vec!["paraphrase recall".into(), "long prose".into()],
            limitations: vec!["rare identifiers".into()],
        },
        EmbeddingModel {
            name: defaults::DEFAULT_KEYWORD_MODEL.to_string(),
            dimension: 384,
            model_type: ModelType::Keyword,
            domain: Some("reference".to_string()),
            strengths: vec!["exact terms".into(), "short queries".into()],
            limitations: vec!["synonyms".into()],
        },
        EmbeddingModel {
            name: defaults::DEFAULT_CODE_MODEL.to_string(),
            dimension: 512,
            model_type: ModelType::Hybrid,
            domain: Some("code".to_string()),
            strengths: vec!["identifiers".into(), "api names".into()],
            limitations: vec!["narrative text".into()],
        },
        EmbeddingModel {
            name: defaults::DEFAULT_OFFLINE_MODEL.to_string(),
            dimension: 256,
            model_type: ModelType::Keyword,
            domain: None,
            strengths: vec!["always available".into()],
            limitations: vec!["no semantics beyond term overlap".into()],
        },
    ]
}
