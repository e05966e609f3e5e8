//! Nested JSON export document.
//!
//! Unlike the raw serde representation of [`AnalysisResult`], the export
//! document rounds every statistic to two decimals and groups fields the way
//! downstream dashboards consume them.

use serde_json::{json, Map, Value};

use crate::models::{AnalysisResult, TrendDirection, TrendSignificance};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn direction_label(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Increasing => "increasing",
        TrendDirection::Decreasing => "decreasing",
    }
}

fn significance_label(significance: TrendSignificance) -> &'static str {
    match significance {
        TrendSignificance::Strong => "strong",
        TrendSignificance::Moderate => "moderate",
        TrendSignificance::Weak => "weak",
    }
}

/// Build the export document for one analysis result.
pub fn to_json_document(result: &AnalysisResult) -> Value {
    let mut variables = Map::new();
    for analysis in &result.variables {
        let stats = &analysis.statistics;
        let trend = &analysis.trend;
        let prob = &analysis.probabilities;

        variables.insert(
            analysis.variable.display_name().to_string(),
            json!({
                "statistics": {
                    "mean": round2(stats.mean),
                    "median": round2(stats.median),
                    "std": round2(stats.std),
                    "min": round2(stats.min),
                    "max": round2(stats.max),
                    "percentiles": {
                        "10th": round2(stats.percentiles.p10),
                        "25th": round2(stats.percentiles.p25),
                        "50th": round2(stats.percentiles.p50),
                        "75th": round2(stats.percentiles.p75),
                        "90th": round2(stats.percentiles.p90),
                    },
                    "units": stats.units,
                    "data_source": stats.data_source,
                },
                "threshold": stats.threshold,
                "probability": round2(stats.probability),
                "trend": {
                    "slope_per_decade": round2(stats.trend),
                    "r_squared": round2(trend.r_squared),
                    "direction": direction_label(trend.direction),
                    "significance": significance_label(trend.significance),
                },
                "probabilities": {
                    "threshold_used": round2(prob.threshold_used),
                    "exceed_count": prob.exceed_count,
                    "total_count": prob.total_count,
                    "exceed_probability": round2(prob.exceed_probability),
                    "normal_probability": round2(prob.normal_probability),
                },
                "time_series": analysis
                    .time_series
                    .iter()
                    .map(|p| json!({"year": p.year, "value": round2(p.value)}))
                    .collect::<Vec<_>>(),
            }),
        );
    }

    json!({
        "location": {
            "name": result.location,
            "latitude": result.latitude,
            "longitude": result.longitude,
        },
        "date": result.date,
        "years_analyzed": result.years_analyzed,
        "variables": Value::Object(variables),
        "metadata": {
            "analysis_date": result.metadata.analysis_date,
        },
    })
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
            variables: vec![WeatherVariable::Temperature],
            thresholds: ThresholdMap::new().with(WeatherVariable::Temperature, 90.0),
            years: 20,
        };
        analyze(&provider, &config, &request).await.unwrap()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235), 1.24);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round2(2.0), 2.0);
    }

    #[tokio::test]
    async fn test_document_shape() {
        let doc = to_json_document(&result().await);
        assert_eq!(doc["location"]["name"], "Austin, TX");
        assert_eq!(doc["years_analyzed"], 20);

        let temp = &doc["variables"]["Temperature"];
        assert!(temp["statistics"]["mean"].is_number());
        assert_eq!(temp["statistics"]["units"], "°F");
        assert_eq!(temp["statistics"]["data_source"], "MERRA-2");
        assert_eq!(temp["threshold"], 90.0);
        assert_eq!(temp["time_series"].as_array().unwrap().len(), 20);

        let direction = temp["trend"]["direction"].as_str().unwrap();
        assert!(direction == "increasing" || direction == "decreasing");
    }

    #[tokio::test]
    async fn test_values_rounded() {
        let doc = to_json_document(&result().await);
        let mean = doc["variables"]["Temperature"]["statistics"]["mean"]
            .as_f64()
            .unwrap();
        assert_eq!(mean, round2(mean));
    }

    #[tokio::test]
    async fn test_probabilities_complement_in_document() {
        let doc = to_json_document(&result().await);
        let probs = &doc["variables"]["Temperature"]["probabilities"];
        let exceed = probs["exceed_probability"].as_f64().unwrap();
        let normal = probs["normal_probability"].as_f64().unwrap();
        assert!((exceed + normal - 100.0).abs() < 0.02);
    }
}
