//! EmbeddingStrategyManager: the entry point for prism-embeddings.
//!
//! Selects a model per request, serves from the per-model cache, walks the
//! fallback chain on provider failure, scores confidence, and records
//! metrics and degradation events. Implements `IEmbeddingProvider` so it
//! can stand in wherever a plain provider is expected.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::future::try_join_all;
use prism_core::config::EmbeddingConfig;
use prism_core::constants::CACHE_HIT_CONFIDENCE;
use prism_core::errors::{EmbeddingError, PrismResult};
use prism_core::models::{
    ContentType, DegradationEvent, EmbeddingModel, EmbeddingOutcome, EmbeddingStrategy,
    QualityThresholds,
};
use prism_core::traits::IEmbeddingProvider;
use prism_observability::metrics::{EmbeddingMetrics, PerformanceSnapshot};
use prism_observability::tracing_setup::events;
use tracing::{debug, info, warn, Instrument};

use crate::cache::EmbeddingCache;
use crate::confidence;
use crate::degradation::DegradationLog;
use crate::providers;
use crate::selection;

pub struct EmbeddingStrategyManager {
    models: RwLock<Vec<EmbeddingModel>>,
    strategy: RwLock<EmbeddingStrategy>,
    providers: RwLock<HashMap<String, Arc<dyn IEmbeddingProvider>>>,
    cache: EmbeddingCache,
    metrics: Mutex<EmbeddingMetrics>,
    degradation: DegradationLog,
    fallback_penalty: f64,
    normalize: bool,
    batch_size: usize,
    batch_delay: Duration,
}

impl EmbeddingStrategyManager {
    /// Create a manager with an empty provider registry.
    ///
    /// Every model without a registered provider counts as failed when
    /// selected; use [`register_provider`](Self::register_provider) or
    /// [`from_config`](Self::from_config).
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            models: RwLock::new(config.models.clone()),
            strategy: RwLock::new(config.strategy.clone()),
            providers: RwLock::new(HashMap::new()),
            cache: EmbeddingCache::new(config.cache_capacity),
            metrics: Mutex::new(EmbeddingMetrics::new()),
            degradation: DegradationLog::new(),
            fallback_penalty: config.fallback_penalty,
            normalize: config.normalize,
            batch_size: config.batch_size.max(1),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
        }
    }

    /// Create a manager with a provider for every configured model, built by
    /// the configured backend.
    pub async fn from_config(config: &EmbeddingConfig) -> Self {
        let manager = Self::new(config);
        for model in &config.models {
            let provider = providers::create_provider(config, model).await;
            manager.write_providers().insert(model.name.clone(), provider);
        }
        info!(
            models = config.models.len(),
            primary = %config.strategy.primary_model,
            provider = %config.provider,
            "EmbeddingStrategyManager initialized"
        );
        manager
    }

    /// Bind `provider` to a configured model, replacing any previous binding.
    pub fn register_provider(
        &self,
        model: &str,
        provider: Arc<dyn IEmbeddingProvider>,
    ) -> PrismResult<()> {
        if !self.read_models().iter().any(|m| m.name == model) {
            return Err(EmbeddingError::UnknownModel {
                name: model.to_string(),
            }
            .into());
        }
        self.write_providers().insert(model.to_string(), provider);
        Ok(())
    }

    /// Embed with the default selection (no content type, no domain hint).
    pub async fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        Ok(self.embed_with_strategy(text, None, None).await?.vector)
    }

    /// Embed `text`, selecting the model from the content type and domain hint.
    ///
    /// A cache hit returns confidence 1.0. A fallback model's confidence is
    /// multiplied by the fallback penalty. When every candidate fails the
    /// call returns `EmbeddingError::Exhausted`.
    pub async fn embed_with_strategy(
        &self,
        text: &str,
        content_type: Option<ContentType>,
        domain: Option<&str>,
    ) -> PrismResult<EmbeddingOutcome> {
        let start = Instant::now();
        let (selected, chain, thresholds) = {
            let strategy = self.read_strategy();
            let selected =
                selection::select_model(&strategy, &self.read_models(), content_type, domain);
            let chain = selection::candidate_chain(&strategy, &selected);
            (selected, chain, strategy.quality_thresholds)
        };
        let span = prism_observability::embedding_span!(selected);
        self.resolve(text, &selected, &chain, thresholds, start)
            .instrument(span)
            .await
    }

    /// Cache lookup and fallback walk for an already selected model.
    async fn resolve(
        &self,
        text: &str,
        selected: &str,
        chain: &[String],
        thresholds: QualityThresholds,
        start: Instant,
    ) -> PrismResult<EmbeddingOutcome> {
        if let Some(vector) = self.cache.get(selected, text) {
            self.lock_metrics().record_cache_hit();
            self.record_latency(start, thresholds.slow_embedding_ms);
            debug!(model = %selected, "embedding cache hit");
            return Ok(EmbeddingOutcome {
                vector: vector.as_ref().clone(),
                model: selected.to_string(),
                confidence: CACHE_HIT_CONFIDENCE,
                cached: true,
                fallback: false,
            });
        }
        self.lock_metrics().record_cache_miss();

        let mut attempts = 0usize;
        let mut last_failure = String::new();
        for (position, model) in chain.iter().enumerate() {
            let fallback = position > 0;

            if fallback {
                if let Some(vector) = self.cache.get(model, text) {
                    self.degradation
                        .record_fallback(selected, &last_failure, model);
                    self.lock_metrics().record_model(model, true);
                    self.record_latency(start, thresholds.slow_embedding_ms);
                    return Ok(EmbeddingOutcome {
                        vector: vector.as_ref().clone(),
                        model: model.clone(),
                        confidence: CACHE_HIT_CONFIDENCE * self.fallback_penalty,
                        cached: true,
                        fallback: true,
                    });
                }
            }

            attempts += 1;
            let Some(provider) = self.provider(model) else {
                last_failure = format!("no provider registered for {model}");
                debug!(model = %model, "no provider registered");
                continue;
            };
            if !provider.is_available() {
                last_failure = format!("{} unavailable", provider.name());
                continue;
            }

            match provider.embed(text).await {
                Ok(mut vector) => {
                    self.check_dimension(model, vector.len());
                    let mut confidence = confidence::score(&vector, text);
                    if fallback {
                        confidence *= self.fallback_penalty;
                        self.degradation
                            .record_fallback(selected, &last_failure, model);
                    }
                    if self.normalize {
                        confidence::l2_normalize(&mut vector);
                    }
                    if confidence < thresholds.min_confidence {
                        events::low_confidence_embedding(
                            model,
                            confidence,
                            thresholds.min_confidence,
                        );
                    }
                    self.cache.insert(model, text, vector.clone());
                    self.lock_metrics().record_model(model, fallback);
                    self.record_latency(start, thresholds.slow_embedding_ms);
                    return Ok(EmbeddingOutcome {
                        vector,
                        model: model.clone(),
                        confidence,
                        cached: false,
                        fallback,
                    });
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "embedding failed, trying next model");
                    last_failure = e.to_string();
                }
            }
        }

        self.lock_metrics().record_exhausted();
        self.record_latency(start, thresholds.slow_embedding_ms);
        warn!(model = %selected, attempts, last_failure = %last_failure, "all embedding models failed");
        Err(EmbeddingError::Exhausted {
            model: selected.to_string(),
            attempts,
        }
        .into())
    }

    /// Embed many texts in groups of `batch_size`, pausing `batch_delay_ms`
    /// between groups. Texts within a group are embedded concurrently;
    /// output order matches input order. The first failure aborts the batch.
    pub async fn embed_batch(
        &self,
        texts: &[String],
        content_type: Option<ContentType>,
        domain: Option<&str>,
    ) -> PrismResult<Vec<EmbeddingOutcome>> {
        let mut out = Vec::with_capacity(texts.len());
        let groups: Vec<&[String]> = texts.chunks(self.batch_size).collect();
        let group_count = groups.len();
        for (i, group) in groups.into_iter().enumerate() {
            let outcomes = try_join_all(
                group
                    .iter()
                    .map(|t| self.embed_with_strategy(t, content_type, domain)),
            )
            .await?;
            out.extend(outcomes);
            if i + 1 < group_count && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }
        Ok(out)
    }

    /// Replace the active strategy. Every model it names must be configured.
    pub fn update_strategy(&self, strategy: EmbeddingStrategy) -> PrismResult<()> {
        {
            let models = self.read_models();
            let referenced = std::iter::once(&strategy.primary_model)
                .chain(strategy.fallback_models.iter())
                .chain(strategy.content_type_overrides.values());
            for name in referenced {
                if !models.iter().any(|m| &m.name == name) {
                    return Err(EmbeddingError::UnknownModel { name: name.clone() }.into());
                }
            }
        }
        info!(primary = %strategy.primary_model, fallbacks = ?strategy.fallback_models, "embedding strategy updated");
        *self.strategy.write().unwrap_or_else(|e| e.into_inner()) = strategy;
        Ok(())
    }

    pub fn strategy(&self) -> EmbeddingStrategy {
        self.read_strategy().clone()
    }

    pub fn models(&self) -> Vec<EmbeddingModel> {
        self.read_models().clone()
    }

    pub fn model(&self, name: &str) -> Option<EmbeddingModel> {
        self.read_models().iter().find(|m| m.name == name).cloned()
    }

    pub fn performance_metrics(&self) -> PerformanceSnapshot {
        let entries = self.cache.len();
        self.lock_metrics().snapshot(entries)
    }

    /// Empty the embedding cache. Metrics are kept.
    pub fn clear_cache(&self) {
        let entries = self.cache.len();
        self.cache.clear();
        events::cache_cleared("embedding", entries as usize);
    }

    pub fn cache_len(&self) -> u64 {
        self.cache.len()
    }

    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.degradation.drain()
    }

    /// Rewrite a model's declared dimension when its provider disagrees.
    fn check_dimension(&self, model: &str, observed: usize) {
        let mut models = self.write_models();
        if let Some(entry) = models.iter_mut().find(|m| m.name == model) {
            if entry.dimension != observed {
                self.degradation
                    .record_dimension(model, entry.dimension, observed);
                entry.dimension = observed;
            }
        }
    }

    fn record_latency(&self, start: Instant, slow_ms: u64) {
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        self.lock_metrics().record_latency(ms, slow_ms);
    }

    fn provider(&self, model: &str) -> Option<Arc<dyn IEmbeddingProvider>> {
        self.providers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(model)
            .cloned()
    }

    fn read_models(&self) -> RwLockReadGuard<'_, Vec<EmbeddingModel>> {
        self.models.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_models(&self) -> RwLockWriteGuard<'_, Vec<EmbeddingModel>> {
        self.models.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_strategy(&self) -> RwLockReadGuard<'_, EmbeddingStrategy> {
        self.strategy.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_providers(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn IEmbeddingProvider>>> {
        self.providers.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_metrics(&self) -> MutexGuard<'_, EmbeddingMetrics> {
        self.metrics.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl IEmbeddingProvider for EmbeddingStrategyManager {
    async fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        EmbeddingStrategyManager::embed(self, text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> PrismResult<Vec<Vec<f32>>> {
        let outcomes = EmbeddingStrategyManager::embed_batch(self, texts, None, None).await?;
        Ok(outcomes.into_iter().map(|o| o.vector).collect())
    }

    /// Declared dimension of the primary model.
    fn dimensions(&self) -> usize {
        let primary = self.read_strategy().primary_model.clone();
        self.model(&primary).map(|m| m.dimension).unwrap_or(0)
    }

    fn name(&self) -> &str {
        "embedding-strategy-manager"
    }

    fn is_available(&self) -> bool {
        self.providers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .any(|p| p.is_available())
    }
}
