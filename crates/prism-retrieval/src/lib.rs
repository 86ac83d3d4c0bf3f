//! # prism-retrieval
//!
//! The search orchestrator. One query runs through analysis, parallel
//! retrieval strategies, fusion, graph augmentation and re-ranking, and comes
//! back with a query-scoped knowledge graph.
//!
//! ## Architecture
//!
//! ```text
//! ComprehensiveSearchOrchestrator
//! ├── ResponseCache (mode:text:options → response, FIFO-bounded)
//! ├── QueryAnalyzer
//! │   ├── IEntityExtractor (entities, relationships, clusters)
//! │   ├── SynonymExpander (abbreviations → domain terms)
//! │   └── EmbeddingStrategyManager (query embedding)
//! ├── StrategyExecutor (strategies run concurrently)
//! │   ├── Vector (one similarity search)
//! │   ├── Entity (per-entity searches, bounded fan-out)
//! │   ├── Graph (related terms, multi-hop)
//! │   └── MultiModal (per-content-type searches)
//! ├── Fusion (RRF | weighted | concat)
//! ├── GraphAugmenter (per-result entities + graph context)
//! ├── MultiModalAnalyzer (cross-modal correlation, quality buckets)
//! ├── Reranker (5-factor combined score)
//! └── KnowledgeGraphBuilder (connections, key entities, graph insights)
//! ```

pub mod analysis;
pub mod cache;
pub mod fusion;
pub mod modes;
pub mod multimodal;
pub mod orchestrator;
pub mod ranking;
pub mod search;

pub use analysis::QueryAnalyzer;
pub use cache::ResponseCache;
pub use multimodal::MultiModalAnalyzer;
pub use orchestrator::ComprehensiveSearchOrchestrator;
pub use ranking::Reranker;
pub use search::StrategyExecutor;
