//! Embedding confidence heuristic.

use prism_core::constants::{
    LINK_MARKER_BOOST, MAX_EMBEDDING_CONFIDENCE, MIN_EMBEDDING_CONFIDENCE, SPARSITY_EPSILON,
};

/// Confidence for a raw provider vector.
///
/// Magnitude (capped at 1.0) times the fraction of non-sparse components,
/// boosted when the text carries `[[link]]` or `#tag` markers, clamped to
/// `[0.1, 1.0]`.
pub fn score(vector: &[f32], text: &str) -> f64 {
    if vector.is_empty() {
        return MIN_EMBEDDING_CONFIDENCE;
    }
    let magnitude = (vector.iter().map(|x| (*x as f64).powi(2)).sum::<f64>())
        .sqrt()
        .min(1.0);
    let sparse = vector.iter().filter(|x| x.abs() < SPARSITY_EPSILON).count();
    let sparsity = sparse as f64 / vector.len() as f64;

    let mut confidence = magnitude * (1.0 - sparsity);
    if has_markers(text) {
        confidence *= LINK_MARKER_BOOST;
    }
    confidence.clamp(MIN_EMBEDDING_CONFIDENCE, MAX_EMBEDDING_CONFIDENCE)
}

fn has_markers(text: &str) -> bool {
    text.contains("[[") || text.contains('#')
}

/// L2-normalize in place. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_unit_vector_is_fully_confident() {
        let v = vec![0.5f32; 4];
        assert!((score(&v, "plain") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sparsity_discounts() {
        let v = vec![1.0f32, 0.0, 0.0, 0.0];
        // magnitude 1.0, 3/4 sparse
        assert!((score(&v, "plain") - 0.25).abs() < 1e-9);
    }

    #[test]
    fn markers_boost() {
        let v = vec![0.5f32, 0.5, 0.0, 0.0];
        let plain = score(&v, "plain");
        let linked = score(&v, "see [[Other Note]]");
        assert!((linked - plain * 1.1).abs() < 1e-9);
    }

    #[test]
    fn clamped_to_range() {
        assert_eq!(score(&[0.0; 8], "x"), 0.1);
        assert_eq!(score(&[], "x"), 0.1);
        assert_eq!(score(&[3.0, 4.0], "#tag"), 1.0);
    }

    #[test]
    fn normalize_yields_unit_length() {
        let mut v = vec![3.0f32, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0f32; 3];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0; 3]);
    }

    proptest::proptest! {
        #[test]
        fn confidence_always_in_range(
            v in proptest::collection::vec(-10.0f32..10.0, 0..64),
            text in "\\PC{0,40}",
        ) {
            let c = score(&v, &text);
            proptest::prop_assert!((MIN_EMBEDDING_CONFIDENCE..=MAX_EMBEDDING_CONFIDENCE).contains(&c));
        }

        #[test]
        fn normalized_vectors_are_unit_or_zero(v in proptest::collection::vec(-10.0f32..10.0, 1..64)) {
            let mut n = v.clone();
            l2_normalize(&mut n);
            let norm = n.iter().map(|x| x * x).sum::<f32>().sqrt();
            proptest::prop_assert!((norm - 1.0).abs() < 1e-3 || n == v);
        }
    }
}
