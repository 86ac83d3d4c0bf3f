//! Graph traversal over extracted relationships.
//!
//! Hop 1 searches the terms related to each query entity by the query's own
//! relationships. Each later hop extracts relationships from the previous
//! hop's results and searches the endpoints newly reached from any visited
//! term, at most [`MAX_TERMS_PER_HOP`] per hop.

use std::collections::HashSet;

use prism_core::constants::MAX_TERMS_PER_HOP;
use prism_core::errors::PrismResult;
use prism_core::models::{
    EntityRelationship, ExtractedEntity, QueryAnalysis, SearchFilters, SearchResult, StrategyKind,
};
use tracing::debug;

use super::entity_search::search_term;
use super::{fan_out, SearchContext, StrategyOutcome};

/// For every entity: relationship objects where it is the subject, subjects
/// where it is the object. Case-insensitive, deduplicated, in discovery order.
pub fn related_terms(
    entities: &[ExtractedEntity],
    relationships: &[EntityRelationship],
) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for entity in entities {
        for rel in relationships {
            let related = if rel.subject.eq_ignore_ascii_case(&entity.text) {
                &rel.object
            } else if rel.object.eq_ignore_ascii_case(&entity.text) {
                &rel.subject
            } else {
                continue;
            };
            if !terms.iter().any(|t| t.eq_ignore_ascii_case(related)) {
                terms.push(related.clone());
            }
        }
    }
    terms
}

/// Endpoints of relationships in `results` that touch a visited term and
/// have not been visited yet.
fn next_frontier(
    ctx: &SearchContext,
    results: &[SearchResult],
    visited: &HashSet<String>,
) -> Vec<String> {
    let mut frontier: Vec<String> = Vec::new();
    for result in results {
        let entities = ctx.extractor.extract_entities(&result.text);
        for rel in ctx.extractor.extract_relationships(&result.text, &entities) {
            let (subject, object) = (rel.subject.to_lowercase(), rel.object.to_lowercase());
            let reached = match (visited.contains(&subject), visited.contains(&object)) {
                (true, false) => rel.object,
                (false, true) => rel.subject,
                _ => continue,
            };
            if !frontier.iter().any(|t| t.eq_ignore_ascii_case(&reached)) {
                frontier.push(reached);
            }
        }
    }
    frontier
}

pub async fn run(
    ctx: &SearchContext,
    analysis: &QueryAnalysis,
    filters: &SearchFilters,
    max_hops: usize,
) -> PrismResult<StrategyOutcome> {
    let filters = filters.with_min_similarity(ctx.config.graph_min_similarity);
    let filters = &filters;
    let limit = ctx.config.graph_limit;

    let mut outcome = StrategyOutcome::empty(StrategyKind::Graph);
    let mut visited: HashSet<String> = analysis.entities.iter().map(ExtractedEntity::key).collect();
    let mut terms = related_terms(&analysis.entities, &analysis.relationships);

    for hop in 1..=max_hops.max(1) {
        if hop > 1 {
            terms.truncate(MAX_TERMS_PER_HOP);
        }
        if terms.is_empty() {
            break;
        }
        visited.extend(terms.iter().map(|t| t.to_lowercase()));

        let searches = fan_out::run(terms, ctx.config.max_concurrency, |term| async move {
            let result = search_term(ctx, &term, limit, filters).await;
            (term, result)
        })
        .await;
        let hop_outcome = fan_out::collect(StrategyKind::Graph, searches)?;
        debug!(
            hop,
            results = hop_outcome.results.len(),
            failed = hop_outcome.failed,
            "graph hop complete"
        );

        terms = if hop < max_hops {
            next_frontier(ctx, &hop_outcome.results, &visited)
        } else {
            Vec::new()
        };
        outcome.absorb(hop_outcome);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::models::EntityType;

    fn entity(text: &str) -> ExtractedEntity {
        ExtractedEntity {
            text: text.to_string(),
            entity_type: EntityType::ProperNoun,
            start: 0,
            end: text.len(),
            confidence: 0.8,
        }
    }

    fn rel(s: &str, o: &str) -> EntityRelationship {
        EntityRelationship {
            subject: s.to_string(),
            predicate: "uses".to_string(),
            object: o.to_string(),
            strength: 0.8,
            evidence: String::new(),
        }
    }

    #[test]
    fn objects_of_subjects_and_subjects_of_objects() {
        let terms = related_terms(
            &[entity("Postgres")],
            &[rel("Postgres", "WAL"), rel("Citus", "postgres"), rel("Redis", "RDB")],
        );
        assert_eq!(terms, vec!["WAL", "Citus"]);
    }

    #[test]
    fn related_terms_are_deduplicated() {
        let terms = related_terms(
            &[entity("A1x"), entity("B1x")],
            &[rel("A1x", "Shared"), rel("B1x", "shared")],
        );
        assert_eq!(terms, vec!["Shared"]);
    }

    #[test]
    fn no_relationships_no_terms() {
        assert!(related_terms(&[entity("Postgres")], &[]).is_empty());
    }
}
