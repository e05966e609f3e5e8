//! Summary statistics over a historical sample.

use crate::error::AnalysisError;
use crate::models::{PercentileTable, Sample, VariableStatistics};

use super::trend::fit_trend;

/// Percentile with linear interpolation between order statistics.
///
/// The rank is `p / 100 * (n - 1)`; fractional ranks interpolate between the
/// two neighboring sorted values. `p` must be within [0, 100] and `sorted`
/// non-empty and ascending.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=100.0).contains(&p));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Percent of observations strictly greater than the threshold.
pub(crate) fn exceedance_percent(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let exceed = values.iter().filter(|v| **v > threshold).count();
    exceed as f64 / values.len() as f64 * 100.0
}

/// Compute the full statistics block for one variable's sample.
///
/// `threshold` is the caller-supplied exceedance threshold; when absent the
/// reported probability is 0.0 and the `threshold` field stays `None` so
/// consumers can tell "no threshold" from "0% exceedance".
///
/// The standard deviation is the population form (divide by N). A
/// single-observation sample yields std 0.0 and a flat percentile table.
pub fn compute_statistics(
    sample: &Sample,
    units: impl Into<String>,
    data_source: impl Into<String>,
    threshold: Option<f64>,
) -> Result<VariableStatistics, AnalysisError> {
    let values = sample.values();
    if values.is_empty() {
        return Err(AnalysisError::EmptySample);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let percentiles = PercentileTable {
        p10: percentile(&sorted, 10.0),
        p25: percentile(&sorted, 25.0),
        p50: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        p90: percentile(&sorted, 90.0),
    };

    let probability = match threshold {
        Some(t) => exceedance_percent(values, t),
        None => 0.0,
    };

    let trend = fit_trend(values);

    Ok(VariableStatistics {
        mean,
        median: percentiles.p50,
        std,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        percentiles,
        units: units.into(),
        data_source: data_source.into(),
        threshold,
        probability,
        // Per-year slope scaled to display units per decade.
        trend: trend.slope * 10.0,
    })
}
