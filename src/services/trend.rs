//! Ordinary least squares trend fit against the year index.

use crate::models::{TrendDirection, TrendResult, TrendSignificance};

/// Fit a first-order linear trend to a sample indexed 0..n.
///
/// Fewer than two observations cannot define a line: the fit degrades to a
/// zero slope with the sample echoed back as its own trend line.
///
/// A zero-variance sample yields R² = 0 rather than the 0/0 the naive
/// formula produces. Direction is `Increasing` only for a strictly positive
/// slope, so a perfectly flat fit reports `Decreasing`.
pub fn fit_trend(values: &[f64]) -> TrendResult {
    let n = values.len();
    if n <= 1 {
        return TrendResult {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            trend_line: values.to_vec(),
            r_squared: 0.0,
            direction: TrendDirection::Decreasing,
            significance: TrendSignificance::Weak,
        };
    }

    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n_f;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    // sxx > 0 whenever n >= 2
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let trend_line: Vec<f64> = (0..n).map(|i| intercept + slope * i as f64).collect();

    let ss_res: f64 = values
        .iter()
        .zip(&trend_line)
        .map(|(y, fit)| (y - fit).powi(2))
        .sum();
    let ss_tot: f64 = values.iter().map(|y| (y - y_mean).powi(2)).sum();
    let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

    let direction = if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };
    let significance = if r_squared > 0.7 {
        TrendSignificance::Strong
    } else if r_squared > 0.4 {
        TrendSignificance::Moderate
    } else {
        TrendSignificance::Weak
    };

    TrendResult {
        slope,
        intercept,
        trend_line,
        r_squared,
        direction,
        significance,
    }
}
