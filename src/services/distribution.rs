//! Threshold exceedance probabilities and histogram construction.

use crate::error::AnalysisError;
use crate::models::{HistogramData, ProbabilityResult, Sample};

use super::statistics::{exceedance_percent, percentile};

/// Number of histogram bins.
const BIN_COUNT: usize = 20;

/// Compute the exceedance split and value distribution for one sample.
///
/// When no threshold is supplied the sample's own 75th percentile stands in,
/// so the result always carries a concrete `threshold_used`. The complement
/// probability is computed as exactly `100 - exceed_probability`, never
/// re-derived from counts.
pub fn compute_probabilities(
    sample: &Sample,
    threshold: Option<f64>,
) -> Result<ProbabilityResult, AnalysisError> {
    let values = sample.values();
    if values.is_empty() {
        return Err(AnalysisError::EmptySample);
    }

    let threshold_used = match threshold {
        Some(t) => t,
        None => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            percentile(&sorted, 75.0)
        }
    };

    let exceed_count = values.iter().filter(|v| **v > threshold_used).count();
    let exceed_probability = exceedance_percent(values, threshold_used);

    Ok(ProbabilityResult {
        threshold_used,
        exceed_count,
        total_count: values.len(),
        exceed_probability,
        normal_probability: 100.0 - exceed_probability,
        distribution: histogram(values),
    })
}

/// Build a fixed-width histogram over the sample's value range.
///
/// A zero-width range (all observations equal) widens to one unit centered
/// on the value so every bin keeps a positive width.
fn histogram(values: &[f64]) -> HistogramData {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / BIN_COUNT as f64;

    let bin_edges: Vec<f64> = (0..=BIN_COUNT).map(|i| min + width * i as f64).collect();

    let mut counts = vec![0usize; BIN_COUNT];
    for v in values {
        // The maximum lands exactly on the last edge; fold it into the
        // final bin.
        let idx = (((v - min) / width) as usize).min(BIN_COUNT - 1);
        counts[idx] += 1;
    }

    HistogramData { counts, bin_edges }
}
