// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_PROVIDER: &str = "tfidf";
pub const DEFAULT_PRIMARY_MODEL: &str = "prism-semantic-768";
pub const DEFAULT_KEYWORD_MODEL: &str = "prism-keyword-384";
pub const DEFAULT_CODE_MODEL: &str = "prism-code-512";
pub const DEFAULT_OFFLINE_MODEL: &str = "prism-tfidf-256";
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 10;
pub const DEFAULT_BATCH_DELAY_MS: u64 = 100;
pub const DEFAULT_FALLBACK_PENALTY: f64 = 0.8;
pub const DEFAULT_NORMALIZE_VECTORS: bool = true;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_SLOW_EMBEDDING_MS: u64 = 1_000;

// --- Search ---
pub const DEFAULT_RESULT_LIMIT: usize = 20;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.3;
pub const DEFAULT_ENTITY_MIN_SIMILARITY: f64 = 0.25;
pub const DEFAULT_ENTITY_LIMIT: usize = 20;
pub const DEFAULT_GRAPH_MIN_SIMILARITY: f64 = 0.2;
pub const DEFAULT_GRAPH_LIMIT: usize = 10;
pub const DEFAULT_MULTI_MODAL_MIN_SIMILARITY: f64 = 0.1;
pub const DEFAULT_MULTI_MODAL_LIMIT: usize = 15;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_GRAPH_MODE_HOPS: usize = 3;
pub const DEFAULT_GRAPH_HOPS: usize = 1;

// --- Fusion ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_VECTOR_FUSION_WEIGHT: f64 = 0.4;
pub const DEFAULT_GRAPH_FUSION_WEIGHT: f64 = 0.2;
pub const DEFAULT_ENTITY_FUSION_WEIGHT: f64 = 0.2;
pub const DEFAULT_TEMPORAL_FUSION_WEIGHT: f64 = 0.1;
pub const DEFAULT_UNLISTED_FUSION_WEIGHT: f64 = 0.1;
pub const DEFAULT_MISSING_SIMILARITY: f64 = 0.5;

// --- Ranking ---
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.4;
pub const DEFAULT_ENTITY_WEIGHT: f64 = 0.2;
pub const DEFAULT_TEMPORAL_WEIGHT: f64 = 0.1;
pub const DEFAULT_QUALITY_WEIGHT: f64 = 0.2;
pub const DEFAULT_GRAPH_WEIGHT: f64 = 0.1;

// --- Cache ---
pub const DEFAULT_RESPONSE_CACHE_CAPACITY: usize = 1_000;
pub const DEFAULT_CACHE_ENABLED: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
