//! One similarity search with the query embedding and the caller's filters.

use prism_core::errors::PrismResult;
use prism_core::models::{SearchFilters, StrategyKind};

use super::{fan_out, SearchContext, StrategyOutcome};

pub async fn run(
    ctx: &SearchContext,
    embedding: &[f32],
    limit: usize,
    filters: &SearchFilters,
) -> PrismResult<StrategyOutcome> {
    let floor = filters.min_similarity.unwrap_or(ctx.config.min_similarity);
    let filters = filters.with_min_similarity(floor);
    let result = ctx.store.search(embedding, limit, &filters).await;
    fan_out::collect(StrategyKind::Vector, vec![("query".to_string(), result)])
}
