//! Cross-modal signals over a ranked result set.

use std::collections::BTreeMap;

use prism_core::models::{
    ContentType, CrossModalCorrelation, MultiModalAnalysis, QualityBucket, SearchResult,
};
use tracing::debug;

use crate::ranking::scorer;

/// Pairs examined per analysis. Results beyond this rank still count toward
/// the per-type and quality tallies.
pub const MAX_CORRELATED_RESULTS: usize = 50;

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiModalAnalyzer;

impl MultiModalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Tally content types and quality buckets, correlate results of
    /// different modalities, and weight each modality's relevance.
    ///
    /// Two results of different types correlate at `1 - |sim_a - sim_b|`,
    /// scaled by the smaller of their cross-modal weights. Consistency is the
    /// mean correlation, or 1.0 when fewer than two modalities are present.
    pub fn analyze(&self, results: &[SearchResult]) -> MultiModalAnalysis {
        let mut analysis = MultiModalAnalysis::default();
        let mut similarity_sums: BTreeMap<ContentType, (f64, usize)> = BTreeMap::new();

        for result in results {
            let content_type = result.metadata.content_type;
            *analysis.content_type_counts.entry(content_type).or_default() += 1;
            let bucket = QualityBucket::from_score(scorer::quality_score(result));
            *analysis.quality_distribution.entry(bucket).or_default() += 1;
            let entry = similarity_sums.entry(content_type).or_default();
            entry.0 += scorer::clamp_unit(result.similarity);
            entry.1 += 1;
        }

        for (content_type, (sum, count)) in similarity_sums {
            let weight = content_type.cross_modal_weight();
            analysis.modality_weights.insert(content_type, weight);
            analysis
                .modality_relevance
                .insert(content_type, sum / count as f64 * weight);
        }

        analysis.cross_modal_correlations = correlate(results);
        analysis.consistency = if analysis.content_type_counts.len() < 2
            || analysis.cross_modal_correlations.is_empty()
        {
            1.0
        } else {
            let total: f64 = analysis
                .cross_modal_correlations
                .iter()
                .map(|c| c.correlation)
                .sum();
            total / analysis.cross_modal_correlations.len() as f64
        };

        debug!(
            modalities = analysis.content_type_counts.len(),
            correlations = analysis.cross_modal_correlations.len(),
            consistency = analysis.consistency,
            "multi-modal analysis complete"
        );
        analysis
    }
}

fn correlate(results: &[SearchResult]) -> Vec<CrossModalCorrelation> {
    let head = &results[..results.len().min(MAX_CORRELATED_RESULTS)];
    let mut correlations = Vec::new();
    for (i, a) in head.iter().enumerate() {
        for b in &head[i + 1..] {
            let (ta, tb) = (a.metadata.content_type, b.metadata.content_type);
            if ta == tb {
                continue;
            }
            let gap = (scorer::clamp_unit(a.similarity) - scorer::clamp_unit(b.similarity)).abs();
            let weight = ta.cross_modal_weight().min(tb.cross_modal_weight());
            correlations.push(CrossModalCorrelation {
                source_id: a.id.clone(),
                target_id: b.id.clone(),
                source_type: ta,
                target_type: tb,
                correlation: (1.0 - gap) * weight,
            });
        }
    }
    correlations
}
