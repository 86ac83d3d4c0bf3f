//! Ollama local embedding provider.
//!
//! Speaks the `/api/embed` protocol of a local Ollama instance.
//! Unavailable until a health check passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use prism_core::errors::{EmbeddingError, PrismResult};
use prism_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// `base_url` defaults to `http://localhost:11434`.
    pub fn new(model: String, dimensions: usize, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            dimensions,
            available: AtomicBool::new(false),
        }
    }

    /// Probe `/api/tags` and update availability.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await;

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    async fn request_embeddings(&self, texts: &[String]) -> PrismResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("Ollama returned {status}: {body}"),
            }
            .into());
        }

        let parsed: OllamaEmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "Ollama returned {} embeddings for {} inputs",
                    parsed.embeddings.len(),
                    texts.len()
                ),
            }
            .into());
        }
        // Lengths are passed through untouched; the manager owns dimension checks.
        Ok(parsed.embeddings)
    }
}

#[async_trait]
impl IEmbeddingProvider for OllamaProvider {
    async fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()]).await?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            }
            .into()
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> PrismResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
