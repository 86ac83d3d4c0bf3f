use async_trait::async_trait;

use crate::errors::PrismResult;
use crate::models::{Chunk, SearchFilters, SearchResult, StoreStats};

/// The vector-indexed knowledge base the orchestrator searches.
#[async_trait]
pub trait IVectorStore: Send + Sync {
    /// Similarity search. Results are ordered by similarity descending and
    /// respect every filter, including `min_similarity`.
    async fn search(
        &self,
        embedding: &[f32],
        limit: usize,
        filters: &SearchFilters,
    ) -> PrismResult<Vec<SearchResult>>;

    async fn get_chunk_by_id(&self, id: &str) -> PrismResult<Option<Chunk>>;

    async fn get_stats(&self) -> PrismResult<StoreStats>;
}
