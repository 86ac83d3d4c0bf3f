//! Reciprocal Rank Fusion: score = Σ 1/(k + rank + 1), rank zero-based.
//!
//! Combines ranked lists without normalizing scores across strategies.

use prism_core::models::SearchResult;

use super::{RankedList, ScoreTable};

/// Contribution of the result at zero-based `rank`.
pub fn rrf_score(rank: usize, k: u32) -> f64 {
    1.0 / (k as f64 + rank as f64 + 1.0)
}

/// Fuse with RRF. Scores accumulate per id across lists; the first
/// occurrence's object is returned. Ties keep discovery order.
pub fn fuse(lists: &[RankedList], k: u32) -> Vec<SearchResult> {
    let mut table = ScoreTable::default();
    for list in lists {
        for (rank, result) in list.results.iter().enumerate() {
            table.add(result, rrf_score(rank, k));
        }
    }
    table.into_sorted()
}
