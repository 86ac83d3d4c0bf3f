//! One similarity search per non-text content type, with a low floor.

use prism_core::errors::PrismResult;
use prism_core::models::{ContentType, SearchFilters, StrategyKind};

use super::{fan_out, SearchContext, StrategyOutcome};

/// Content types searched: the non-text types, narrowed to the caller's
/// `file_types` when those are set.
pub fn content_types(filters: &SearchFilters) -> Vec<ContentType> {
    ContentType::MULTI_MODAL
        .into_iter()
        .filter(|ct| filters.file_types.is_empty() || filters.file_types.contains(ct))
        .collect()
}

pub async fn run(
    ctx: &SearchContext,
    embedding: &[f32],
    filters: &SearchFilters,
) -> PrismResult<StrategyOutcome> {
    let limit = ctx.config.multi_modal_limit;
    let floor = ctx.config.multi_modal_min_similarity;
    let searches = fan_out::run(content_types(filters), ctx.config.max_concurrency, |ct| async move {
        let filters = filters.with_file_type(ct).with_min_similarity(floor);
        let result = ctx.store.search(embedding, limit, &filters).await;
        (ct.as_str().to_string(), result)
    })
    .await;
    fan_out::collect(StrategyKind::MultiModal, searches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_covers_every_non_text_type_by_default() {
        assert_eq!(content_types(&SearchFilters::default()), ContentType::MULTI_MODAL.to_vec());
    }

    #[test]
    fn caller_file_types_narrow_the_fan_out() {
        let filters = SearchFilters {
            file_types: vec![ContentType::Pdf, ContentType::RasterImage, ContentType::Markdown],
            ..Default::default()
        };
        assert_eq!(
            content_types(&filters),
            vec![ContentType::RasterImage, ContentType::Pdf]
        );
    }
}
