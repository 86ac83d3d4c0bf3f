mod embedding;
mod entity_extractor;
mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use entity_extractor::IEntityExtractor;
pub use vector_store::IVectorStore;
