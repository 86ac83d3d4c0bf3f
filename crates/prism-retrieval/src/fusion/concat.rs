//! Concatenate every list in order and drop repeated ids. No scoring.

use std::collections::HashSet;

use prism_core::models::SearchResult;

use super::RankedList;

pub fn fuse(lists: &[RankedList]) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    lists
        .iter()
        .flat_map(|list| list.results.iter())
        .filter(|r| seen.insert(r.id.clone()))
        .cloned()
        .collect()
}

/// Drop repeated ids from one list, first occurrence wins.
pub fn dedup(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}
