//! Five sub-scores per result, each clamped to [0, 1].
//!
//! vector: store similarity. entity: Jaccard overlap with the query entities.
//! temporal: exponential decay since the last update. quality: provider score
//! for non-text content, length and word density for text. graph: entity and
//! relationship counts.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use prism_core::config::RankingWeights;
use prism_core::constants::{NEUTRAL_SCORE, TEMPORAL_DECAY_DAYS};
use prism_core::models::{ScoringBreakdown, SearchResult};
use prism_graph::overlap::jaccard;
use prism_graph::AugmentedResult;

/// Characters at which a text result reaches full length score.
pub const FULL_LENGTH_CHARS: f64 = 1000.0;
/// Words at which a text result reaches full density score.
pub const FULL_DENSITY_WORDS: f64 = 100.0;
/// Entities at which the graph entity component saturates.
pub const GRAPH_ENTITY_SATURATION: f64 = 10.0;
/// Relationships at which the graph relationship component saturates.
pub const GRAPH_RELATIONSHIP_SATURATION: f64 = 5.0;

/// Clamp to [0, 1]; a non-finite value counts as missing and scores neutral.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        NEUTRAL_SCORE
    }
}

pub fn vector_score(result: &SearchResult) -> f64 {
    clamp_unit(result.similarity)
}

pub fn entity_score(result_keys: &HashSet<String>, query_keys: &HashSet<String>) -> f64 {
    clamp_unit(jaccard(result_keys, query_keys))
}

/// `exp(-days/365)` since `updated_at`; neutral when undated. Future
/// timestamps count as fresh.
pub fn temporal_score(result: &SearchResult, now: DateTime<Utc>) -> f64 {
    match result.metadata.updated_at {
        Some(updated) => {
            let days = (now - updated).num_seconds().max(0) as f64 / 86_400.0;
            clamp_unit((-days / TEMPORAL_DECAY_DAYS).exp())
        }
        None => NEUTRAL_SCORE,
    }
}

pub fn quality_score(result: &SearchResult) -> f64 {
    if result.metadata.content_type.is_multi_modal() {
        return clamp_unit(result.metadata.quality_score.unwrap_or(NEUTRAL_SCORE));
    }
    let length = (result.text.chars().count() as f64 / FULL_LENGTH_CHARS).min(1.0);
    let density = (result.text.split_whitespace().count() as f64 / FULL_DENSITY_WORDS).min(1.0);
    clamp_unit((length + density) / 2.0)
}

pub fn graph_score(entity_count: usize, relationship_count: usize) -> f64 {
    let entities = (entity_count as f64 / GRAPH_ENTITY_SATURATION).min(1.0);
    let relationships = (relationship_count as f64 / GRAPH_RELATIONSHIP_SATURATION).min(1.0);
    clamp_unit((entities + relationships) / 2.0)
}

/// Full breakdown for one augmented result. `combined` is the weighted sum,
/// clamped to [0, 1].
pub fn score(
    item: &AugmentedResult,
    query_keys: &HashSet<String>,
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> ScoringBreakdown {
    let vector = vector_score(&item.result);
    let entity = entity_score(&item.entity_keys(), query_keys);
    let temporal = temporal_score(&item.result, now);
    let quality = quality_score(&item.result);
    let graph = graph_score(item.entities.len(), item.relationships.len());
    let combined = weights.vector * vector
        + weights.entity * entity
        + weights.temporal * temporal
        + weights.quality * quality
        + weights.graph * graph;
    ScoringBreakdown {
        vector,
        graph,
        entity,
        temporal,
        quality,
        combined: clamp_unit(combined),
    }
}
