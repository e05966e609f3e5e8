//! Analysis result types.
//!
//! Results are created fresh per analysis invocation, never mutated after
//! assembly, and are serializable for the HTTP layer and export renderings.

use serde::{Deserialize, Serialize};

use super::request::Sample;
use super::variable::WeatherVariable;

/// Fixed percentile table at the 10/25/50/75/90 marks.
///
/// Keys are always present; computed with linear interpolation between
/// order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    #[serde(rename = "10th")]
    pub p10: f64,
    #[serde(rename = "25th")]
    pub p25: f64,
    #[serde(rename = "50th")]
    pub p50: f64,
    #[serde(rename = "75th")]
    pub p75: f64,
    #[serde(rename = "90th")]
    pub p90: f64,
}

/// Summary statistics for one variable's historical sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableStatistics {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divide by N, not N-1).
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: PercentileTable,
    /// Display unit label (e.g. "°F", "mph")
    pub units: String,
    /// Upstream data source label (e.g. "MERRA-2")
    pub data_source: String,
    /// Threshold the probability was computed against. `None` means no
    /// threshold was supplied; `probability` is then 0.0 and must not be
    /// interpreted without checking this field.
    pub threshold: Option<f64>,
    /// Exceedance probability in percent (0-100).
    pub probability: f64,
    /// Linear trend scaled to display units per decade.
    pub trend: f64,
}

/// Qualitative trend direction derived from the sign of the fitted slope.
///
/// `Increasing` requires a strictly positive slope; an exactly zero slope
/// classifies as `Decreasing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

/// Qualitative goodness-of-fit bucket derived from R².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignificance {
    /// R² > 0.7
    Strong,
    /// R² > 0.4
    Moderate,
    Weak,
}

/// First-order linear fit of a sample against its year index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Slope in display units per year.
    pub slope: f64,
    pub intercept: f64,
    /// Fitted line evaluated at each year index; equals the input sample
    /// when fewer than two observations exist.
    pub trend_line: Vec<f64>,
    /// Coefficient of determination, clamped to 0 for zero-variance samples.
    pub r_squared: f64,
    pub direction: TrendDirection,
    pub significance: TrendSignificance,
}

/// Histogram over a sample's value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramData {
    /// Per-bin observation counts; always sums to the sample length.
    pub counts: Vec<usize>,
    /// Bin edges; one more entry than `counts`.
    pub bin_edges: Vec<f64>,
}

/// Threshold-exceedance split and discretized distribution for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    /// The threshold actually used: caller-supplied, or the sample's 75th
    /// percentile when none was given.
    pub threshold_used: f64,
    /// Observations strictly greater than the threshold.
    pub exceed_count: usize,
    pub total_count: usize,
    /// Percent of observations above the threshold.
    pub exceed_probability: f64,
    /// Always exactly `100 - exceed_probability`.
    pub normal_probability: f64,
    pub distribution: HistogramData,
}

/// One yearly observation positioned on the calendar for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Complete per-variable analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAnalysis {
    pub variable: WeatherVariable,
    pub statistics: VariableStatistics,
    /// Sample values assigned synthetic calendar years ending at the current
    /// year; a derived display convenience, not new data.
    pub time_series: Vec<TimeSeriesPoint>,
    /// The raw historical sample the analysis ran on.
    pub sample: Sample,
    pub trend: TrendResult,
    pub probabilities: ProbabilityResult,
}

/// Generation metadata attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Timestamp in "YYYY-MM-DD HH:MM:SS" form.
    pub analysis_date: String,
}

/// Aggregated result of a multi-variable analysis request.
///
/// Variables appear in the caller-specified order so presentation layers can
/// rely on stable iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Location display name echoed from the request.
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Date window label ("MM-DD to MM-DD").
    pub date: String,
    pub years_analyzed: u32,
    pub variables: Vec<VariableAnalysis>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Look up the analysis for a specific variable.
    pub fn variable(&self, variable: WeatherVariable) -> Option<&VariableAnalysis> {
        self.variables.iter().find(|v| v.variable == variable)
    }

    /// Distinct data source labels across all analyzed variables, in
    /// first-seen order.
    pub fn data_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for analysis in &self.variables {
            let source = analysis.statistics.data_source.as_str();
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        sources
    }
}
