//! Provider construction.
//!
//! Priority order for a configured model:
//! 1. Ollama (local HTTP), when configured and reachable
//! 2. TF-IDF (always available)

pub mod ollama;
pub mod tfidf;

pub use ollama::OllamaProvider;
pub use tfidf::TfIdfProvider;

use std::sync::Arc;

use prism_core::config::EmbeddingConfig;
use prism_core::models::EmbeddingModel;
use prism_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Build the provider serving `model` under the configured backend.
///
/// An unreachable Ollama server degrades to TF-IDF at the model's dimension.
pub async fn create_provider(
    config: &EmbeddingConfig,
    model: &EmbeddingModel,
) -> Arc<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "ollama" => {
            let provider =
                OllamaProvider::new(model.name.clone(), model.dimension, config.ollama_url.clone());
            if provider.health_check().await {
                info!(provider = "ollama", model = %model.name, "embedding provider connected");
                Arc::new(provider)
            } else {
                warn!(model = %model.name, "Ollama unavailable, falling back to TF-IDF");
                Arc::new(TfIdfProvider::new(model.name.clone(), model.dimension))
            }
        }
        "tfidf" => {
            info!(provider = "tfidf", model = %model.name, "using TF-IDF embedding provider");
            Arc::new(TfIdfProvider::new(model.name.clone(), model.dimension))
        }
        other => {
            warn!(provider = %other, model = %model.name, "unknown provider, using TF-IDF");
            Arc::new(TfIdfProvider::new(model.name.clone(), model.dimension))
        }
    }
}
