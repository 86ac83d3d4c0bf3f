/// Prism system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence reported for an embedding served from cache.
pub const CACHE_HIT_CONFIDENCE: f64 = 1.0;

/// Lower and upper clamp for embedding confidence.
pub const MIN_EMBEDDING_CONFIDENCE: f64 = 0.1;
pub const MAX_EMBEDDING_CONFIDENCE: f64 = 1.0;

/// Components with an absolute value below this count as sparse.
pub const SPARSITY_EPSILON: f32 = 0.01;

/// Boost applied when the embedded text carries link or tag markers.
pub const LINK_MARKER_BOOST: f64 = 1.1;

/// Latency ring: compact to `LATENCY_COMPACT_TO` once `LATENCY_RING_CAPACITY` is exceeded.
pub const LATENCY_RING_CAPACITY: usize = 1000;
pub const LATENCY_COMPACT_TO: usize = 500;

/// Neutral score used when a result lacks a scoring field.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Days constant for temporal decay: `exp(-days / TEMPORAL_DECAY_DAYS)`.
pub const TEMPORAL_DECAY_DAYS: f64 = 365.0;

/// Knowledge-graph caps.
pub const MAX_CONCEPTS_PER_RESULT: usize = 5;
pub const MAX_KEY_ENTITIES: usize = 20;
pub const MAX_KEY_RELATIONSHIPS: usize = 15;
pub const MAX_CONTENT_CLUSTERS: usize = 5;

/// Two results whose similarities differ by more than this are linked as
/// `semantic_similarity` when they share no entity.
pub const SIMILARITY_GAP_THRESHOLD: f64 = 0.7;

/// Maximum new related terms searched per graph hop beyond the first.
pub const MAX_TERMS_PER_HOP: usize = 10;
