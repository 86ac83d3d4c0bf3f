//! Test fixture loader for Prism golden datasets and integration scenarios.
//!
//! Provides typed deserialization of the fixture JSON files and scripted
//! collaborators (failing, slow, counting) for driving the pipeline in tests.

pub mod scripted;

use std::path::PathBuf;

use prism_core::models::Chunk;
use prism_core::PrismConfig;
use serde::de::DeserializeOwned;

pub use scripted::{
    CountingProvider, FailingProvider, FailingStore, SelectiveFailStore, SlowProvider, SlowStore,
};

/// Root directory of the golden fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The knowledge-base corpus used by the scenario tests.
pub fn load_corpus() -> Vec<Chunk> {
    load_fixture("corpus/knowledge_base.json")
}

/// The golden TOML configuration.
///
/// # Panics
/// Panics if the file is missing or invalid.
pub fn load_config() -> PrismConfig {
    PrismConfig::from_file(fixture_path("config/prism.toml"))
        .unwrap_or_else(|e| panic!("Failed to load golden config: {e}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn corpus_loads_with_unique_ids() {
        let corpus = load_corpus();
        assert!(corpus.len() >= 10);
        let ids: HashSet<_> = corpus.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn corpus_contains_the_postgres_definition() {
        assert!(load_corpus()
            .iter()
            .any(|c| c.text.contains("Postgres is a database")));
    }

    #[test]
    fn golden_config_is_valid() {
        let config = load_config();
        assert_eq!(config.embedding.batch_delay_ms, 0);
        assert!(config.cache.enabled_by_default);
    }
}
