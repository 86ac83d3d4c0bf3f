//! # prism-graph
//!
//! Lightweight entity and relationship extraction behind
//! [`IEntityExtractor`](prism_core::traits::IEntityExtractor), per-result
//! graph context for reranking, and the query-scoped knowledge graph.
//! Nothing here is persisted: every graph is rebuilt per query.

pub mod augmenter;
pub mod clustering;
pub mod extraction;
pub mod knowledge;
pub mod overlap;

pub use augmenter::{AugmentedResult, GraphAugmenter};
pub use extraction::HeuristicExtractor;
pub use knowledge::KnowledgeGraphBuilder;
