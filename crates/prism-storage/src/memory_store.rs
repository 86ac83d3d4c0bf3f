//! Brute-force vector store held in memory.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use prism_core::errors::{PrismResult, SearchError};
use prism_core::models::{Chunk, SearchFilters, SearchResult, StoreStats};
use prism_core::traits::IVectorStore;
use tracing::debug;

use crate::similarity::cosine_similarity;

struct Entry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// Chunks with their embeddings, scanned linearly on every search.
///
/// Ties in similarity keep insertion order.
#[derive(Default)]
pub struct MemoryVectorStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a chunk. A replaced chunk keeps its position.
    pub fn upsert(&self, chunk: Chunk, embedding: Vec<f32>) {
        let mut entries = self.write();
        if let Some(existing) = entries.iter_mut().find(|e| e.chunk.id == chunk.id) {
            existing.chunk = chunk;
            existing.embedding = embedding;
        } else {
            entries.push(Entry { chunk, embedding });
        }
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|e| e.chunk.id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl IVectorStore for MemoryVectorStore {
    async fn search(
        &self,
        embedding: &[f32],
        limit: usize,
        filters: &SearchFilters,
    ) -> PrismResult<Vec<SearchResult>> {
        if let Some(floor) = filters.min_similarity {
            if !(0.0..=1.0).contains(&floor) {
                return Err(SearchError::InvalidFilter {
                    reason: format!("min_similarity {floor} outside [0, 1]"),
                }
                .into());
            }
        }
        let query_norm_sq: f64 = embedding.iter().map(|x| (*x as f64) * (*x as f64)).sum();
        if query_norm_sq == 0.0 || limit == 0 {
            return Ok(Vec::new());
        }
        let floor = filters.min_similarity.unwrap_or(0.0);

        let entries = self.read();
        let mut scored: Vec<(usize, f64)> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.embedding.len() == embedding.len())
            .filter(|(_, e)| filters.matches(&e.chunk.metadata))
            .map(|(i, e)| (i, cosine_similarity(embedding, &e.embedding)))
            .filter(|(_, sim)| *sim > 0.0 && *sim >= floor)
            .collect();

        // Stable: equal similarities keep insertion order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);
        debug!(candidates = entries.len(), returned = scored.len(), "memory store search");

        Ok(scored
            .into_iter()
            .map(|(i, sim)| SearchResult::from_chunk(entries[i].chunk.clone(), sim.min(1.0)))
            .collect())
    }

    async fn get_chunk_by_id(&self, id: &str) -> PrismResult<Option<Chunk>> {
        Ok(self
            .read()
            .iter()
            .find(|e| e.chunk.id == id)
            .map(|e| e.chunk.clone()))
    }

    async fn get_stats(&self) -> PrismResult<StoreStats> {
        let entries = self.read();
        let mut by_content_type = BTreeMap::new();
        for e in entries.iter() {
            *by_content_type.entry(e.chunk.metadata.content_type).or_default() += 1;
        }
        Ok(StoreStats {
            total_chunks: entries.len(),
            by_content_type,
            dimension: entries.first().map(|e| e.embedding.len()),
        })
    }
}
