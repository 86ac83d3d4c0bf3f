//! Bounded, order-preserving sub-search fan-out and failure isolation.

use std::collections::HashSet;
use std::future::Future;

use futures_util::stream::{self, StreamExt};
use prism_core::errors::PrismResult;
use prism_core::models::{SearchResult, StrategyKind, StrategyWarning};
use prism_observability::tracing_setup::events;

use super::StrategyOutcome;

/// Run `search` once per item with at most `max_concurrency` in flight.
/// Each search reports its scope label; output order matches `items`.
pub async fn run<T, F, Fut>(
    items: Vec<T>,
    max_concurrency: usize,
    search: F,
) -> Vec<(String, PrismResult<Vec<SearchResult>>)>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = (String, PrismResult<Vec<SearchResult>>)>,
{
    stream::iter(items.into_iter().map(search))
        .buffered(max_concurrency.max(1))
        .collect()
        .await
}

/// Fold sub-search results into one outcome. Non-fatal failures become
/// warnings; the first fatal error is returned instead.
pub fn collect(
    strategy: StrategyKind,
    searches: Vec<(String, PrismResult<Vec<SearchResult>>)>,
) -> PrismResult<StrategyOutcome> {
    let mut outcome = StrategyOutcome::empty(strategy);
    let mut seen: HashSet<String> = HashSet::new();

    for (scope, result) in searches {
        outcome.attempted += 1;
        match result {
            Ok(results) => {
                outcome
                    .results
                    .extend(results.into_iter().filter(|r| seen.insert(r.id.clone())));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let message = e.to_string();
                events::strategy_failed(strategy.as_str(), &scope, &message);
                outcome.failed += 1;
                outcome.warnings.push(StrategyWarning {
                    strategy,
                    scope,
                    message,
                });
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::errors::{EmbeddingError, SearchError};
    use prism_core::models::{Chunk, ChunkMetadata};

    fn result(id: &str) -> SearchResult {
        SearchResult::from_chunk(
            Chunk {
                id: id.to_string(),
                text: String::new(),
                metadata: ChunkMetadata::default(),
            },
            0.5,
        )
    }

    #[tokio::test]
    async fn preserves_scope_order_under_concurrency() {
        let scopes: Vec<String> = (0..6).map(|i| format!("s{i}")).collect();
        let out = run(scopes.clone(), 3, |scope: String| async move {
            // Later scopes finish first.
            let n: u64 = scope[1..].parse().unwrap_or(0);
            tokio::time::sleep(std::time::Duration::from_millis(30 - n * 5)).await;
            let r = Ok(vec![result(&scope)]);
            (scope, r)
        })
        .await;
        let got: Vec<_> = out.iter().map(|(s, _)| s.clone()).collect();
        assert_eq!(got, scopes);
    }

    #[test]
    fn failures_become_warnings_and_results_dedup() {
        let outcome = collect(
            StrategyKind::Entity,
            vec![
                ("a".into(), Ok(vec![result("1"), result("2")])),
                (
                    "b".into(),
                    Err(SearchError::StoreUnavailable {
                        reason: "down".into(),
                    }
                    .into()),
                ),
                ("c".into(), Ok(vec![result("2"), result("3")])),
            ],
        )
        .unwrap();
        assert_eq!(
            outcome.results.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.warnings[0].scope, "b");
        assert!(!outcome.is_total_failure());
    }

    #[test]
    fn fatal_errors_propagate() {
        let err = collect(
            StrategyKind::Entity,
            vec![(
                "a".into(),
                Err(EmbeddingError::Exhausted {
                    model: "m".into(),
                    attempts: 2,
                }
                .into()),
            )],
        )
        .unwrap_err();
        assert!(err.is_fatal());
    }
}
