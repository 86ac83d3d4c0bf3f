//! Abbreviation → domain-term expansion for semantic query expansion.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Expansion terms added per query.
pub const MAX_SYNONYMS: usize = 5;

static SYNONYMS: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert("db", &["database", "sql", "query", "schema"]);
    m.insert("dbs", &["databases", "sql"]);
    m.insert("pg", &["postgres", "postgresql"]);
    m.insert("postgres", &["postgresql"]);
    m.insert("sqlite", &["embedded database"]);
    m.insert("kv", &["key-value", "key value store"]);
    m.insert("idx", &["index", "indexing"]);
    m.insert("ann", &["approximate nearest neighbor", "vector index"]);
    m.insert("rrf", &["reciprocal rank fusion", "rank fusion"]);
    m.insert("ml", &["machine learning", "model"]);
    m.insert("nlp", &["natural language processing", "text"]);
    m.insert("llm", &["language model", "embedding"]);
    m.insert("vec", &["vector", "embedding"]);
    m.insert("img", &["image", "picture", "diagram"]);
    m.insert("pic", &["image", "picture"]);
    m.insert("vid", &["video", "recording"]);
    m.insert("doc", &["document", "documentation"]);
    m.insert("docs", &["documents", "documentation"]);
    m.insert("pdf", &["paper", "document"]);
    m.insert("api", &["endpoint", "interface", "route"]);
    m.insert("auth", &["authentication", "authorization", "login"]);
    m.insert("config", &["configuration", "settings"]);
    m.insert("perf", &["performance", "latency", "throughput"]);
    m.insert("repl", &["replication", "replica"]);
    m
});

/// Synonyms for abbreviations in `query`, excluding words already present.
/// At most [`MAX_SYNONYMS`], in query-word order, deduplicated.
pub fn synonyms(query: &str) -> Vec<String> {
    let words: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    let mut expansions: Vec<String> = Vec::new();

    for word in &words {
        let Some(terms) = SYNONYMS.get(word.as_str()) else {
            continue;
        };
        for term in terms.iter() {
            let term = term.to_string();
            if !words.contains(&term) && !expansions.contains(&term) {
                expansions.push(term);
            }
        }
    }

    expansions.truncate(MAX_SYNONYMS);
    expansions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_expands_to_database() {
        let terms = synonyms("db indexing");
        assert_eq!(terms[0], "database");
        assert!(terms.len() <= MAX_SYNONYMS);
    }

    #[test]
    fn words_already_in_query_are_skipped() {
        assert!(!synonyms("db database").contains(&"database".to_string()));
    }

    #[test]
    fn expansion_is_capped() {
        assert_eq!(synonyms("db pg img vid auth").len(), MAX_SYNONYMS);
    }

    #[test]
    fn unknown_words_expand_to_nothing() {
        assert!(synonyms("gardening tomatoes").is_empty());
        assert!(synonyms("").is_empty());
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(synonyms("DB"), synonyms("db"));
    }
}
