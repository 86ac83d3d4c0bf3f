//! Configuration loaded from TOML. Every section and field is optional.

mod cache_config;
pub mod defaults;
mod embedding_config;
mod fusion_config;
mod observability_config;
mod ranking_config;
mod search_config;

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use fusion_config::FusionConfig;
pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingWeights;
pub use search_config::SearchConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{PrismError, PrismResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
    pub fusion: FusionConfig,
    pub ranking: RankingWeights,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

impl PrismConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> PrismResult<Self> {
        let config: PrismConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PrismResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PrismError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> PrismResult<()> {
        let embedding = &self.embedding;
        let strategy = &embedding.strategy;

        let referenced = std::iter::once(&strategy.primary_model)
            .chain(strategy.fallback_models.iter())
            .chain(strategy.content_type_overrides.values());
        for name in referenced {
            if embedding.model(name).is_none() {
                return Err(PrismError::Config {
                    reason: format!("embedding model '{name}' is referenced but not configured"),
                });
            }
        }
        if embedding.fallback_penalty <= 0.0 || embedding.fallback_penalty > 1.0 {
            return Err(PrismError::Config {
                reason: format!(
                    "fallback_penalty must be in (0, 1], got {}",
                    embedding.fallback_penalty
                ),
            });
        }
        if embedding.batch_size == 0 {
            return Err(PrismError::Config {
                reason: "embedding batch_size must be at least 1".to_string(),
            });
        }
        if self.search.max_concurrency == 0 {
            return Err(PrismError::Config {
                reason: "search max_concurrency must be at least 1".to_string(),
            });
        }
        if self.ranking.has_negative() {
            return Err(PrismError::Config {
                reason: "ranking weights must be non-negative".to_string(),
            });
        }
        if self.fusion.weights.values().any(|w| *w < 0.0) || self.fusion.unlisted_weight < 0.0 {
            return Err(PrismError::Config {
                reason: "fusion weights must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}
