//! One similarity search per entity seed, each with its own embedding.

use prism_core::errors::PrismResult;
use prism_core::models::{SearchFilters, SearchResult, StrategyKind};

use super::{fan_out, SearchContext, StrategyOutcome};

pub async fn run(
    ctx: &SearchContext,
    seeds: &[String],
    filters: &SearchFilters,
) -> PrismResult<StrategyOutcome> {
    let filters = filters.with_min_similarity(ctx.config.entity_min_similarity);
    let limit = ctx.config.entity_limit;
    let filters = &filters;
    let searches = fan_out::run(seeds.to_vec(), ctx.config.max_concurrency, |seed| async move {
        let result = search_term(ctx, &seed, limit, filters).await;
        (seed, result)
    })
    .await;
    fan_out::collect(StrategyKind::Entity, searches)
}

/// Embed `term` with the default model selection and search with it.
pub async fn search_term(
    ctx: &SearchContext,
    term: &str,
    limit: usize,
    filters: &SearchFilters,
) -> PrismResult<Vec<SearchResult>> {
    let embedding = ctx.embeddings.embed(term).await?;
    ctx.store.search(&embedding, limit, filters).await
}
