//! # prism-storage
//!
//! An in-process [`IVectorStore`](prism_core::traits::IVectorStore) for
//! running the orchestrator end to end without an external database.

pub mod memory_store;
pub mod similarity;

pub use memory_store::MemoryVectorStore;
