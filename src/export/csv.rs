//! CSV renderings: one summary row per variable, and a long-format time
//! series table.

use std::fmt::Write;

use crate::models::AnalysisResult;

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render the summary CSV: comment metadata lines, a header row, then one
/// row per analyzed variable.
pub fn to_csv(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Weather Probability Analysis Export");
    let _ = writeln!(out, "# Generated: {}", result.metadata.analysis_date);
    let _ = writeln!(out, "# Location: {}", result.location);
    let _ = writeln!(
        out,
        "# Coordinates: {:.4}, {:.4}",
        result.latitude, result.longitude
    );
    let _ = writeln!(out, "# Date Window: {}", result.date);
    let _ = writeln!(out, "# Years Analyzed: {}", result.years_analyzed);
    let _ = writeln!(
        out,
        "Location,Latitude,Longitude,Date,Variable,Mean,Median,Std_Dev,Min,Max,\
         Threshold,Probability,Trend,Data_Source,Units,P10,P25,P50,P75,P90"
    );

    for analysis in &result.variables {
        let stats = &analysis.statistics;
        let threshold = match stats.threshold {
            Some(t) => format!("{:.2}", t),
            None => "N/A".to_string(),
        };
        let _ = writeln!(
            out,
            "{},{:.4},{:.4},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{},{:.2}%,{:.2},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            field(&result.location),
            result.latitude,
            result.longitude,
            field(&result.date),
            field(analysis.variable.display_name()),
            stats.mean,
            stats.median,
            stats.std,
            stats.min,
            stats.max,
            threshold,
            stats.probability,
            stats.trend,
            field(&stats.data_source),
            field(&stats.units),
            stats.percentiles.p10,
            stats.percentiles.p25,
            stats.percentiles.p50,
            stats.percentiles.p75,
            stats.percentiles.p90,
        );
    }

    out
}

/// Render the yearly observations as a long-format CSV with one row per
/// (variable, year) pair.
pub fn to_timeseries_csv(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Location,Variable,Year,Value,Units");

    for analysis in &result.variables {
        for point in &analysis.time_series {
            let _ = writeln!(
                out,
                "{},{},{},{:.4},{}",
                field(&result.location),
                field(analysis.variable.display_name()),
                point.year,
                point.value,
                field(&analysis.statistics.units),
            );
        }
    }

    out
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
            variables: vec![WeatherVariable::Temperature, WeatherVariable::WindSpeed],
            thresholds: ThresholdMap::new().with(WeatherVariable::Temperature, 90.0),
            years: 20,
        };
        analyze(&provider, &config, &request).await.unwrap()
    }

    #[tokio::test]
    async fn test_csv_layout() {
        let csv = to_csv(&result().await);
        let lines: Vec<&str> = csv.lines().collect();

        assert!(lines[0].starts_with("# Weather Probability Analysis Export"));
        assert!(lines[2].contains("Austin, TX"));
        assert!(lines[4].contains("06-01 to 06-15"));

        let header = lines
            .iter()
            .find(|l| l.starts_with("Location,"))
            .expect("header row");
        assert!(header.contains("Threshold"));
        assert!(header.contains("P90"));

        // One data row per variable
        let data_rows: Vec<&str> = lines
            .iter()
            .filter(|l| l.starts_with("\"Austin, TX\""))
            .copied()
            .collect();
        assert_eq!(data_rows.len(), 2);
        assert!(data_rows[0].contains("Temperature"));
        assert!(data_rows[0].contains("90.00"));
        assert!(data_rows[0].contains("°F"));
        assert!(data_rows[1].contains("Wind Speed"));
        // Wind speed got no threshold
        assert!(data_rows[1].contains("N/A"));
    }

    #[tokio::test]
    async fn test_field_quoting() {
        assert_eq!(field("plain"), "plain");
        assert_eq!(field("Austin, TX"), "\"Austin, TX\"");
        assert_eq!(field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[tokio::test]
    async fn test_timeseries_csv_row_count() {
        let csv = to_timeseries_csv(&result().await);
        let lines: Vec<&str> = csv.lines().collect();
        // Header plus 20 years for each of 2 variables
        assert_eq!(lines.len(), 1 + 40);
        assert_eq!(lines[0], "Location,Variable,Year,Value,Units");
        assert!(lines[1].contains("Temperature"));
    }

    #[tokio::test]
    async fn test_probability_formatted_as_percent() {
        let csv = to_csv(&result().await);
        let temp_row = csv
            .lines()
            .find(|l| l.contains("Temperature"))
            .expect("temperature row");
        assert!(temp_row.contains('%'));
    }
}
