use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_type::ContentType;
use super::scoring::{GraphContext, ScoringBreakdown};

/// Metadata attached to a chunk by the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMetadata {
    pub content_type: ContentType,
    pub title: Option<String>,
    pub section: Option<String>,
    pub breadcrumbs: Vec<String>,
    pub uri: Option<String>,
    pub folder: Option<String>,
    pub tags: Vec<String>,
    pub links: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Provider-supplied quality for non-text content (OCR, transcription, captioning).
    pub quality_score: Option<f64>,
}

impl Default for ChunkMetadata {
    fn default() -> Self {
        Self {
            content_type: ContentType::Markdown,
            title: None,
            section: None,
            breadcrumbs: Vec::new(),
            uri: None,
            folder: None,
            tags: Vec::new(),
            links: Vec::new(),
            created_at: None,
            updated_at: None,
            quality_score: None,
        }
    }
}

/// A unit of indexed text, as produced by the (external) ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

/// One retrieved chunk together with everything the pipeline learned about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
    /// Raw cosine similarity reported by the store.
    pub similarity: f64,
    /// Score assigned by result fusion, if fusion scored this result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fused_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_context: Option<GraphContext>,
    /// Top concepts extracted by the knowledge-graph builder.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<String>,
}

impl SearchResult {
    pub fn from_chunk(chunk: Chunk, similarity: f64) -> Self {
        Self {
            id: chunk.id,
            text: chunk.text,
            metadata: chunk.metadata,
            similarity,
            fused_score: None,
            scoring: None,
            graph_context: None,
            concepts: Vec::new(),
        }
    }

    /// Title from metadata, or the first non-empty line of text.
    pub fn title(&self) -> &str {
        if let Some(title) = self.metadata.title.as_deref() {
            if !title.trim().is_empty() {
                return title;
            }
        }
        self.text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }

    /// The score the response is ordered by: combined, else fused, else similarity.
    pub fn rank_score(&self) -> f64 {
        self.scoring
            .as_ref()
            .map(|s| s.combined)
            .or(self.fused_score)
            .unwrap_or(self.similarity)
    }
}

/// Summary statistics reported by a vector store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_chunks: usize,
    pub by_content_type: BTreeMap<ContentType, usize>,
    pub dimension: Option<usize>,
}
