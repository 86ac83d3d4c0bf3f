//! Entity spans: links, tags, acronyms, code terms, proper nouns, and the
//! operands of relational phrases.

use std::collections::HashSet;

use prism_core::models::{EntityType, ExtractedEntity};
use regex::Regex;
use std::sync::LazyLock;

use super::patterns::{
    is_stopword, RE_ACRONYM, RE_CODE_TERM, RE_PROPER_NOUN, RE_RELATION, RE_SENTENCE_END, RE_TAG,
    RE_WIKI_LINK,
};

pub const LINK_CONFIDENCE: f64 = 0.95;
pub const TAG_CONFIDENCE: f64 = 0.9;
pub const ACRONYM_CONFIDENCE: f64 = 0.8;
pub const TERM_CONFIDENCE: f64 = 0.7;
pub const PROPER_NOUN_CONFIDENCE: f64 = 0.75;
pub const MULTIWORD_PROPER_NOUN_CONFIDENCE: f64 = 0.85;
pub const CONCEPT_CONFIDENCE: f64 = 0.6;

/// Concept operands shorter than this are noise ("db", "it").
const MIN_CONCEPT_LEN: usize = 3;

/// Accepted entities, unique by key, with non-overlapping spans.
struct Accepted {
    entities: Vec<ExtractedEntity>,
    keys: HashSet<String>,
}

impl Accepted {
    fn new() -> Self {
        Self {
            entities: Vec::new(),
            keys: HashSet::new(),
        }
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.entities.iter().any(|e| start < e.end && e.start < end)
    }

    fn offer(&mut self, text: &str, entity_type: EntityType, start: usize, end: usize, confidence: f64) {
        let text = text.trim();
        if text.is_empty() || self.overlaps(start, end) {
            return;
        }
        if !self.keys.insert(text.to_lowercase()) {
            return;
        }
        self.entities.push(ExtractedEntity {
            text: text.to_string(),
            entity_type,
            start,
            end,
            confidence,
        });
    }
}

/// Extract entities in source order. Higher-precision kinds claim their
/// spans first; later kinds never overlap an accepted span.
pub fn extract(text: &str) -> Vec<ExtractedEntity> {
    let mut accepted = Accepted::new();
    if text.trim().is_empty() {
        return accepted.entities;
    }

    if let Some(re) = RE_WIKI_LINK.as_ref() {
        for caps in re.captures_iter(text) {
            if let (Some(whole), Some(target)) = (caps.get(0), caps.get(1)) {
                accepted.offer(target.as_str(), EntityType::Link, whole.start(), whole.end(), LINK_CONFIDENCE);
            }
        }
    }

    if let Some(re) = RE_TAG.as_ref() {
        for caps in re.captures_iter(text) {
            if let Some(tag) = caps.get(1) {
                let name = tag.as_str().trim_start_matches('#');
                accepted.offer(name, EntityType::Tag, tag.start(), tag.end(), TAG_CONFIDENCE);
            }
        }
    }

    offer_all(&mut accepted, &RE_ACRONYM, text, EntityType::Acronym, ACRONYM_CONFIDENCE);
    offer_all(&mut accepted, &RE_CODE_TERM, text, EntityType::Term, TERM_CONFIDENCE);
    offer_proper_nouns(&mut accepted, text);
    offer_concepts(&mut accepted, text);

    let mut entities = accepted.entities;
    entities.sort_by_key(|e| e.start);
    entities
}

fn offer_all(
    accepted: &mut Accepted,
    pattern: &LazyLock<Option<Regex>>,
    text: &str,
    entity_type: EntityType,
    confidence: f64,
) {
    let Some(re) = pattern.as_ref() else {
        return;
    };
    for m in re.find_iter(text) {
        accepted.offer(m.as_str(), entity_type, m.start(), m.end(), confidence);
    }
}

/// Byte offsets where sentences begin.
pub(crate) fn sentence_starts(text: &str) -> HashSet<usize> {
    let mut starts = HashSet::from([first_word_offset(text, 0)]);
    if let Some(re) = RE_SENTENCE_END.as_ref() {
        for m in re.find_iter(text) {
            starts.insert(first_word_offset(text, m.end()));
        }
    }
    starts
}

fn first_word_offset(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map_or(text.len(), |(i, _)| from + i)
}

/// Words that appear somewhere in the text starting with a lowercase letter.
fn lowercase_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_' && c != '-')
        .filter(|w| w.chars().next().is_some_and(char::is_lowercase))
        .map(str::to_string)
        .collect()
}

fn offer_proper_nouns(accepted: &mut Accepted, text: &str) {
    let Some(re) = RE_PROPER_NOUN.as_ref() else {
        return;
    };
    let starts = sentence_starts(text);
    let lowercase = lowercase_words(text);

    for m in re.find_iter(text) {
        // Drop leading grammar words: "The Postgres Planner" -> "Postgres Planner".
        let mut offset = m.start();
        let mut words: Vec<(usize, &str)> = Vec::new();
        for word in m.as_str().split_whitespace() {
            let at = offset + m.as_str()[offset - m.start()..].find(word).unwrap_or(0);
            offset = at + word.len();
            words.push((at, word));
        }
        let leading = words.iter().take_while(|(_, w)| is_stopword(w)).count();
        let words = &words[leading..];
        let Some(&(start, first)) = words.first() else {
            continue;
        };

        // Sentence-initial capitals of ordinary words.
        if words.len() == 1 && starts.contains(&start) && lowercase.contains(&first.to_lowercase()) {
            continue;
        }

        let confidence = if words.len() > 1 {
            MULTIWORD_PROPER_NOUN_CONFIDENCE
        } else {
            PROPER_NOUN_CONFIDENCE
        };
        accepted.offer(&text[start..m.end()], EntityType::ProperNoun, start, m.end(), confidence);
    }
}

fn offer_concepts(accepted: &mut Accepted, text: &str) {
    let Some(re) = RE_RELATION.as_ref() else {
        return;
    };
    for caps in re.captures_iter(text) {
        for group in [1, 3] {
            let Some(operand) = caps.get(group) else {
                continue;
            };
            let word = operand.as_str();
            if word.len() < MIN_CONCEPT_LEN || is_stopword(word) {
                continue;
            }
            accepted.offer(word, EntityType::Concept, operand.start(), operand.end(), CONCEPT_CONFIDENCE);
        }
    }
}
