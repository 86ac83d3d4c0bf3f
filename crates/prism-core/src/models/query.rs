use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chunk::ChunkMetadata;
use super::content_type::ContentType;
use crate::errors::PrismError;

/// Orchestration mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Basic,
    Advanced,
    Graph,
    MultiModal,
    Comprehensive,
}

impl SearchMode {
    pub const ALL: [SearchMode; 5] = [
        SearchMode::Basic,
        SearchMode::Advanced,
        SearchMode::Graph,
        SearchMode::MultiModal,
        SearchMode::Comprehensive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Basic => "basic",
            SearchMode::Advanced => "advanced",
            SearchMode::Graph => "graph",
            SearchMode::MultiModal => "multi_modal",
            SearchMode::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = PrismError;

    /// Exact, case-sensitive names only. There is no default mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| PrismError::UnknownMode {
                mode: s.to_string(),
            })
    }
}

/// A retrieval path. `Temporal` only carries a fusion weight; no path produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Vector,
    Entity,
    Graph,
    MultiModal,
    Temporal,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Vector => "vector",
            StrategyKind::Entity => "entity",
            StrategyKind::Graph => "graph",
            StrategyKind::MultiModal => "multi_modal",
            StrategyKind::Temporal => "temporal",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FusionAlgorithm {
    /// Reciprocal Rank Fusion.
    Rrf,
    /// Rank-discounted, similarity-weighted per-strategy sum.
    Weighted,
    /// Concatenate and deduplicate; no scoring.
    Concat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| at >= s) && self.end.map_or(true, |e| at <= e)
    }
}

/// Caller filters forwarded to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub file_types: Vec<ContentType>,
    pub tags: Vec<String>,
    pub folders: Vec<String>,
    pub date_range: Option<DateRange>,
    pub min_similarity: Option<f64>,
}

impl SearchFilters {
    /// Copy of these filters with a different similarity floor.
    pub fn with_min_similarity(&self, min_similarity: f64) -> Self {
        Self {
            min_similarity: Some(min_similarity),
            ..self.clone()
        }
    }

    /// Copy restricted to a single content type.
    pub fn with_file_type(&self, content_type: ContentType) -> Self {
        Self {
            file_types: vec![content_type],
            ..self.clone()
        }
    }

    /// Metadata predicate. The similarity floor is applied by the store.
    ///
    /// Tags match case-insensitively; a folder filter matches the folder itself
    /// or any of its subfolders; the date range is checked against
    /// `updated_at`, falling back to `created_at`, and undated chunks pass.
    pub fn matches(&self, meta: &ChunkMetadata) -> bool {
        if !self.file_types.is_empty() && !self.file_types.contains(&meta.content_type) {
            return false;
        }
        if !self.tags.is_empty()
            && !self
                .tags
                .iter()
                .any(|t| meta.tags.iter().any(|mt| mt.eq_ignore_ascii_case(t)))
        {
            return false;
        }
        if !self.folders.is_empty() {
            let Some(folder) = meta.folder.as_deref() else {
                return false;
            };
            let inside = self.folders.iter().any(|f| {
                let f = f.trim_end_matches('/');
                folder == f || folder.starts_with(&format!("{f}/"))
            });
            if !inside {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if let Some(at) = meta.updated_at.or(meta.created_at) {
                if !range.contains(at) {
                    return false;
                }
            }
        }
        true
    }
}

/// Caller-facing options. Serialized into the response-cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub limit: Option<usize>,
    pub filters: SearchFilters,
    pub semantic_expansion: bool,
    pub entity_expansion: bool,
    pub use_cache: bool,
    pub fusion: Option<FusionAlgorithm>,
    pub fusion_weights: Option<BTreeMap<StrategyKind, f64>>,
}

/// Request as received from the API layer. `mode` is validated by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveSearchQuery {
    pub text: String,
    pub mode: String,
    #[serde(default)]
    pub options: SearchOptions,
}

impl ComprehensiveSearchQuery {
    pub fn new(text: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: mode.into(),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionFlags {
    pub semantic: bool,
    pub entity: bool,
    pub graph: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTraversal {
    pub max_hops: usize,
}

/// Mode-specific sub-query built by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
    pub expansion: ExpansionFlags,
    pub strategies: Vec<StrategyKind>,
    pub graph_traversal: Option<GraphTraversal>,
    pub options: SearchOptions,
}

impl SearchQuery {
    pub fn uses(&self, strategy: StrategyKind) -> bool {
        self.strategies.contains(&strategy)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "hybrid".parse::<SearchMode>().unwrap_err();
        assert!(matches!(err, PrismError::UnknownMode { ref mode } if mode == "hybrid"));
        assert!("Basic".parse::<SearchMode>().is_err());
    }

    #[test]
    fn every_mode_round_trips_through_its_name() {
        for mode in SearchMode::ALL {
            assert_eq!(mode.as_str().parse::<SearchMode>().unwrap(), mode);
        }
    }

    #[test]
    fn filters_match_file_type_tag_and_folder() {
        let meta = ChunkMetadata {
            content_type: ContentType::Pdf,
            tags: vec!["Databases".into()],
            folder: Some("notes/storage".into()),
            ..Default::default()
        };
        let filters = SearchFilters {
            file_types: vec![ContentType::Pdf, ContentType::RasterImage],
            tags: vec!["databases".into()],
            folders: vec!["notes/".into()],
            ..Default::default()
        };
        assert!(filters.matches(&meta));
        assert!(!filters.with_file_type(ContentType::Video).matches(&meta));

        let other_folder = SearchFilters {
            folders: vec!["note".into()],
            ..Default::default()
        };
        assert!(!other_folder.matches(&meta));
    }

    #[test]
    fn date_range_uses_updated_then_created() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let meta = ChunkMetadata {
            created_at: Some(jan),
            ..Default::default()
        };
        let feb_onwards = SearchFilters {
            date_range: Some(DateRange {
                start: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
                end: None,
            }),
            ..Default::default()
        };
        assert!(!feb_onwards.matches(&meta));
        assert!(feb_onwards.matches(&ChunkMetadata::default()));
    }
}
