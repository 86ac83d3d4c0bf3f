//! Compiled surface patterns for entity and relationship extraction.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! entity_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── [[Wiki Link]] or [[Target|alias]] ─────────────────────────────────────
entity_pattern!(RE_WIKI_LINK, r"\[\[([^\]|#]+)(?:[|#][^\]]*)?\]\]");

// ── #tag, #nested/tag ──────────────────────────────────────────────────────
entity_pattern!(RE_TAG, r"(?:^|\s)(#[A-Za-z][\w/-]*)");

// ── SQL, HTTP2, HNSW ──────────────────────────────────────────────────────
entity_pattern!(RE_ACRONYM, r"\b[A-Z]{2,}[0-9]*\b");

// ── snake_case, camelCase, Type::path ─────────────────────────────────────
entity_pattern!(
    RE_CODE_TERM,
    r"\b(?:[A-Za-z_][A-Za-z0-9_]*(?:::[A-Za-z_][A-Za-z0-9_]*)+|[a-z][a-z0-9]*(?:_[a-z0-9]+)+|[a-z]+[A-Z][A-Za-z0-9]*)\b"
);

// ── Capitalized words with at least one lowercase letter, in runs ─────────
entity_pattern!(
    RE_PROPER_NOUN,
    r"\b[A-Z][A-Z0-9]*[a-z][A-Za-z0-9]*(?:[ \t]+[A-Z][A-Z0-9]*[a-z][A-Za-z0-9]*)*\b"
);

// ── "A is B", "A has B", "A contains B", ... ─────────────────────────────
entity_pattern!(
    RE_RELATION,
    r"(?i)\b([A-Za-z][A-Za-z0-9_-]*)\s+(is|are|has|have|contains|contain|uses|use|supports|support|includes|include|requires|require)\s+(?:(?:a|an|the)\s+)?([A-Za-z][A-Za-z0-9_-]*)"
);

// ── Sentence boundaries ───────────────────────────────────────────────────
entity_pattern!(RE_SENTENCE_END, r"[.!?;]+(?:\s+|$)|\n+");

/// Words that are capitalized for grammar, not because they name something,
/// and words that never make a useful relationship operand.
pub const STOPWORDS: &[&str] = &[
    "a", "all", "also", "an", "and", "any", "are", "as", "at", "be", "both", "but", "by", "each",
    "every", "few", "for", "from", "has", "have", "he", "her", "here", "his", "how", "if", "in",
    "into", "is", "it", "its", "many", "more", "most", "much", "no", "not", "of", "on", "one",
    "only", "or", "other", "our", "several", "she", "so", "some", "such", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "to", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "why", "with", "you", "your",
];

pub fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOPWORDS.binary_search(&lower.as_str()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for re in [
            &RE_WIKI_LINK,
            &RE_TAG,
            &RE_ACRONYM,
            &RE_CODE_TERM,
            &RE_PROPER_NOUN,
            &RE_RELATION,
            &RE_SENTENCE_END,
        ] {
            assert!(re.is_some());
        }
    }

    #[test]
    fn stopwords_are_sorted_for_binary_search() {
        assert!(STOPWORDS.windows(2).all(|w| w[0] < w[1]));
        assert!(is_stopword("The"));
        assert!(!is_stopword("Postgres"));
    }
}
