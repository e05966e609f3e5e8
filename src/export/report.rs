//! Plain-text summary report.

use std::fmt::Write;

use crate::models::{AnalysisResult, TrendDirection, TrendSignificance};

const RULE: &str = "============================================================";

/// Render a human-readable summary of one analysis.
pub fn to_text_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "WEATHER PROBABILITY ANALYSIS REPORT");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Location:       {}", result.location);
    let _ = writeln!(
        out,
        "Coordinates:    {:.4}, {:.4}",
        result.latitude, result.longitude
    );
    let _ = writeln!(out, "Date Window:    {}", result.date);
    let _ = writeln!(out, "Years Analyzed: {}", result.years_analyzed);
    let _ = writeln!(out, "Generated:      {}", result.metadata.analysis_date);
    let _ = writeln!(out, "Data Sources:   {}", result.data_sources().join(", "));

    for analysis in &result.variables {
        let stats = &analysis.statistics;
        let trend = &analysis.trend;
        let prob = &analysis.probabilities;

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "--- {} ({}) ---",
            analysis.variable.display_name(),
            stats.units
        );
        let _ = writeln!(out, "  Mean:     {:.2}", stats.mean);
        let _ = writeln!(out, "  Median:   {:.2}", stats.median);
        let _ = writeln!(out, "  Std Dev:  {:.2}", stats.std);
        let _ = writeln!(out, "  Range:    {:.2} to {:.2}", stats.min, stats.max);
        let _ = writeln!(
            out,
            "  Percentiles: 10th {:.2} | 25th {:.2} | 50th {:.2} | 75th {:.2} | 90th {:.2}",
            stats.percentiles.p10,
            stats.percentiles.p25,
            stats.percentiles.p50,
            stats.percentiles.p75,
            stats.percentiles.p90,
        );
        match stats.threshold {
            Some(threshold) => {
                let _ = writeln!(
                    out,
                    "  Probability above {:.2}: {:.1}%",
                    threshold, stats.probability
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "  Probability above {:.2} (75th percentile): {:.1}%",
                    prob.threshold_used, prob.exceed_probability
                );
            }
        }
        let _ = writeln!(
            out,
            "  Trend: {:.2} {} per decade ({}, {} fit, R² = {:.2})",
            stats.trend,
            stats.units,
            direction_word(trend.direction),
            significance_word(trend.significance),
            trend.r_squared,
        );
        let _ = writeln!(out, "  Source: {}", stats.data_source);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    out
}

fn direction_word(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Increasing => "increasing",
        TrendDirection::Decreasing => "decreasing",
    }
}

fn significance_word(significance: TrendSignificance) -> &'static str {
    match significance {
        TrendSignificance::Strong => "strong",
        TrendSignificance::Moderate => "moderate",
        TrendSignificance::Weak => "weak",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{
        AnalysisRequest, DateWindow, Location, ThresholdMap, WeatherVariable,
    };
    use crate::provider::SyntheticProvider;
    use crate::services::analyze;
    use chrono::NaiveDate;

    async fn result() -> AnalysisResult {
        let provider = SyntheticProvider::new();
        let config = AppConfig::default();
        let request = AnalysisRequest {
            location: Location::new(30.27, -97.74, "Austin, TX"),
            window: DateWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            ),
            variables: vec![
                WeatherVariable::Temperature,
                WeatherVariable::AirQuality,
            ],
            thresholds: ThresholdMap::new().with(WeatherVariable::Temperature, 90.0),
            years: 20,
        };
        analyze(&provider, &config, &request).await.unwrap()
    }

    #[tokio::test]
    async fn test_report_header() {
        let report = to_text_report(&result().await);
        assert!(report.contains("WEATHER PROBABILITY ANALYSIS REPORT"));
        assert!(report.contains("Location:       Austin, TX"));
        assert!(report.contains("Years Analyzed: 20"));
        assert!(report.contains("Data Sources:   MERRA-2, MODIS"));
    }

    #[tokio::test]
    async fn test_report_variable_sections() {
        let report = to_text_report(&result().await);
        assert!(report.contains("--- Temperature (°F) ---"));
        assert!(report.contains("--- Air Quality (AQI) ---"));
        // Explicit threshold line for temperature
        assert!(report.contains("Probability above 90.00:"));
        // Fallback line names the default percentile for air quality
        assert!(report.contains("(75th percentile)"));
    }

    #[tokio::test]
    async fn test_report_trend_line() {
        let report = to_text_report(&result().await);
        assert!(report.contains("per decade"));
        assert!(report.contains("R² ="));
    }
}
