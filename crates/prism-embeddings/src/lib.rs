//! # prism-embeddings
//!
//! Strategy-driven embedding generation for the search orchestrator.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingStrategyManager
//! ├── model selection (content-type override → domain → primary)
//! ├── EmbeddingCache (moka, keyed per model)
//! ├── fallback chain (primary, then configured fallbacks)
//! │   ├── OllamaProvider (local HTTP)
//! │   └── TfIdfProvider (always available)
//! ├── confidence heuristic
//! └── DegradationLog + EmbeddingMetrics
//! ```

pub mod cache;
pub mod confidence;
pub mod degradation;
pub mod manager;
pub mod providers;
pub mod selection;

pub use cache::EmbeddingCache;
pub use degradation::DegradationLog;
pub use manager::EmbeddingStrategyManager;
pub use providers::{OllamaProvider, TfIdfProvider};
