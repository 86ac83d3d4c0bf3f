//! Subject–predicate–object triples between already extracted entities.

use std::collections::HashMap;

use prism_core::models::{EntityRelationship, ExtractedEntity};

use super::patterns::{RE_RELATION, RE_SENTENCE_END};

pub const PATTERN_STRENGTH: f64 = 0.8;
pub const CO_OCCURRENCE_STRENGTH: f64 = 0.3;
pub const CO_OCCURRENCE_PREDICATE: &str = "co_occurs_with";

/// Token (lower-cased) → entity text. Full keys win over head words.
fn token_index(entities: &[ExtractedEntity]) -> HashMap<String, &str> {
    let mut index: HashMap<String, &str> = HashMap::new();
    for entity in entities {
        index.insert(entity.key(), entity.text.as_str());
    }
    for entity in entities {
        let mut words = entity.text.split_whitespace();
        let first = words.next();
        let last = words.last();
        for word in first.into_iter().chain(last) {
            index.entry(word.to_lowercase()).or_insert(entity.text.as_str());
        }
    }
    index
}

/// Extract relationships whose endpoints are both members of `entities`.
/// Repeated triples are merged and their strength accumulates, capped at 1.0.
pub fn extract(
    text: &str,
    entities: &[ExtractedEntity],
    co_occurrence: bool,
) -> Vec<EntityRelationship> {
    let mut merged = Merged::default();
    if entities.len() < 2 {
        return merged.into_vec();
    }

    let index = token_index(entities);
    if let Some(re) = RE_RELATION.as_ref() {
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(subject), Some(verb), Some(object)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let subject = index.get(&subject.as_str().to_lowercase());
            let object = index.get(&object.as_str().to_lowercase());
            if let (Some(&subject), Some(&object)) = (subject, object) {
                if !subject.eq_ignore_ascii_case(object) {
                    merged.add(EntityRelationship {
                        subject: subject.to_string(),
                        predicate: verb.as_str().to_lowercase(),
                        object: object.to_string(),
                        strength: PATTERN_STRENGTH,
                        evidence: whole.as_str().to_string(),
                    });
                }
            }
        }
    }

    if co_occurrence {
        for (start, end) in sentence_spans(text) {
            let mut in_sentence: Vec<&ExtractedEntity> = entities
                .iter()
                .filter(|e| e.start >= start && e.end <= end)
                .collect();
            in_sentence.sort_by_key(|e| e.start);
            for pair in in_sentence.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.key() == b.key() || merged.links(&a.key(), &b.key()) {
                    continue;
                }
                merged.add(EntityRelationship {
                    subject: a.text.clone(),
                    predicate: CO_OCCURRENCE_PREDICATE.to_string(),
                    object: b.text.clone(),
                    strength: CO_OCCURRENCE_STRENGTH,
                    evidence: text[start..end].trim().to_string(),
                });
            }
        }
    }

    merged.into_vec()
}

/// `[start, end)` byte spans of each sentence.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    if let Some(re) = RE_SENTENCE_END.as_ref() {
        for m in re.find_iter(text) {
            if m.start() > start {
                spans.push((start, m.start()));
            }
            start = m.end();
        }
    }
    if start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}

#[derive(Default)]
struct Merged {
    order: Vec<(String, String, String)>,
    by_key: HashMap<(String, String, String), EntityRelationship>,
}

impl Merged {
    fn add(&mut self, relationship: EntityRelationship) {
        let key = relationship.key();
        match self.by_key.get_mut(&key) {
            Some(existing) => {
                existing.strength = (existing.strength + relationship.strength).min(1.0);
            }
            None => {
                self.order.push(key.clone());
                self.by_key.insert(key, relationship);
            }
        }
    }

    /// Whether any relationship already joins the two keys, in either direction.
    fn links(&self, a: &str, b: &str) -> bool {
        self.order
            .iter()
            .any(|(s, _, o)| (s == a && o == b) || (s == b && o == a))
    }

    fn into_vec(mut self) -> Vec<EntityRelationship> {
        self.order
            .iter()
            .filter_map(|key| self.by_key.remove(key))
            .collect()
    }
}
