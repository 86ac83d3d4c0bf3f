//! Scripted collaborators for exercising failure and latency paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prism_core::errors::{EmbeddingError, PrismResult, SearchError};
use prism_core::models::{Chunk, SearchFilters, SearchResult, StoreStats};
use prism_core::traits::{IEmbeddingProvider, IVectorStore};

/// A provider whose every call fails.
pub struct FailingProvider {
    name: String,
    dims: usize,
}

impl FailingProvider {
    pub fn new(name: impl Into<String>, dims: usize) -> Self {
        Self {
            name: name.into(),
            dims,
        }
    }
}

#[async_trait]
impl IEmbeddingProvider for FailingProvider {
    async fn embed(&self, _text: &str) -> PrismResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: format!("{} scripted failure", self.name),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Delays every call to an inner provider.
pub struct SlowProvider {
    inner: Arc<dyn IEmbeddingProvider>,
    delay: Duration,
}

impl SlowProvider {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl IEmbeddingProvider for SlowProvider {
    async fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        tokio::time::sleep(self.delay).await;
        self.inner.embed(text).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Counts calls to an inner provider.
pub struct CountingProvider {
    inner: Arc<dyn IEmbeddingProvider>,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IEmbeddingProvider for CountingProvider {
    async fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// A store that is always unavailable.
pub struct FailingStore;

#[async_trait]
impl IVectorStore for FailingStore {
    async fn search(
        &self,
        _embedding: &[f32],
        _limit: usize,
        _filters: &SearchFilters,
    ) -> PrismResult<Vec<SearchResult>> {
        Err(SearchError::StoreUnavailable {
            reason: "scripted outage".to_string(),
        }
        .into())
    }

    async fn get_chunk_by_id(&self, _id: &str) -> PrismResult<Option<Chunk>> {
        Err(SearchError::StoreUnavailable {
            reason: "scripted outage".to_string(),
        }
        .into())
    }

    async fn get_stats(&self) -> PrismResult<StoreStats> {
        Err(SearchError::StoreUnavailable {
            reason: "scripted outage".to_string(),
        }
        .into())
    }
}

/// Forwards to an inner store, failing searches whose filters match a predicate.
pub struct SelectiveFailStore {
    inner: Arc<dyn IVectorStore>,
    fail_when: Box<dyn Fn(&SearchFilters) -> bool + Send + Sync>,
    failures: AtomicUsize,
}

impl SelectiveFailStore {
    pub fn new(
        inner: Arc<dyn IVectorStore>,
        fail_when: impl Fn(&SearchFilters) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            fail_when: Box::new(fail_when),
            failures: AtomicUsize::new(0),
        }
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IVectorStore for SelectiveFailStore {
    async fn search(
        &self,
        embedding: &[f32],
        limit: usize,
        filters: &SearchFilters,
    ) -> PrismResult<Vec<SearchResult>> {
        if (self.fail_when)(filters) {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(SearchError::StoreUnavailable {
                reason: "scripted partial outage".to_string(),
            }
            .into());
        }
        self.inner.search(embedding, limit, filters).await
    }

    async fn get_chunk_by_id(&self, id: &str) -> PrismResult<Option<Chunk>> {
        self.inner.get_chunk_by_id(id).await
    }

    async fn get_stats(&self) -> PrismResult<StoreStats> {
        self.inner.get_stats().await
    }
}

/// Delays every search on an inner store.
pub struct SlowStore {
    inner: Arc<dyn IVectorStore>,
    delay: Duration,
}

impl SlowStore {
    pub fn new(inner: Arc<dyn IVectorStore>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl IVectorStore for SlowStore {
    async fn search(
        &self,
        embedding: &[f32],
        limit: usize,
        filters: &SearchFilters,
    ) -> PrismResult<Vec<SearchResult>> {
        tokio::time::sleep(self.delay).await;
        self.inner.search(embedding, limit, filters).await
    }

    async fn get_chunk_by_id(&self, id: &str) -> PrismResult<Option<Chunk>> {
        self.inner.get_chunk_by_id(id).await
    }

    async fn get_stats(&self) -> PrismResult<StoreStats> {
        self.inner.get_stats().await
    }
}
