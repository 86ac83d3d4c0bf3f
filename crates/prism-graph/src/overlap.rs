//! Set overlap between entity collections.

use std::collections::HashSet;
use std::hash::Hash;

/// Jaccard similarity: |A ∩ B| / |A ∪ B|. 0.0 if either set is empty.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_lowercase()).collect()
    }

    #[test]
    fn identical_sets_score_one() {
        assert_eq!(jaccard(&set(&["Postgres", "SQL"]), &set(&["postgres", "sql"])), 1.0);
    }

    #[test]
    fn disjoint_sets_score_zero() {
        assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(jaccard(&set(&[]), &set(&["b"])), 0.0);
        assert_eq!(jaccard::<String>(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn partial_overlap() {
        assert!((jaccard(&set(&["a", "b"]), &set(&["b", "c"])) - 1.0 / 3.0).abs() < 1e-12);
    }
}
