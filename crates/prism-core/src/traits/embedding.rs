use async_trait::async_trait;

use crate::errors::PrismResult;

/// An external embedding provider bound to one model.
///
/// Providers may fail per call; the embedding manager owns the fallback chain.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> PrismResult<Vec<f32>>;

    /// Embed a batch of texts. Default: one call per text, in order.
    async fn embed_batch(&self, texts: &[String]) -> PrismResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Dimensionality this provider claims to produce.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool {
        true
    }
}
