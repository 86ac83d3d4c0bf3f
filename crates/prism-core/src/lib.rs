//! # prism-core
//!
//! Foundation crate for the Prism multi-strategy search orchestrator.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PrismConfig;
pub use errors::{PrismError, PrismResult};
pub use models::{
    Chunk, ChunkMetadata, ContentType, ExtractedEntity, EntityRelationship, SearchMode,
    SearchResult,
};
