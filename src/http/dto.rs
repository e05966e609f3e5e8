//! Data Transfer Objects for the HTTP API.
//!
//! Wire-level request shapes are looser than the domain types: variables and
//! threshold keys arrive as strings, the date window may be given either as
//! explicit start/end dates or as a single center date, and the years count
//! is optional. Conversion into [`AnalysisRequest`] resolves all of that
//! against the application configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::AppError;
use crate::config::AppConfig;
use crate::models::{AnalysisRequest, DateWindow, Location, ThresholdMap, WeatherVariable};

/// Request body for running an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Display name; defaults to the formatted coordinates.
    #[serde(default)]
    pub location_name: Option<String>,
    /// Explicit window start (used together with `end_date`).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Explicit window end.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Center date; expanded by the configured window on each side. Ignored
    /// when an explicit window is given.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Variable names, e.g. "Temperature" or "wind_speed".
    pub variables: Vec<String>,
    /// Per-variable exceedance thresholds keyed by variable name.
    #[serde(default)]
    pub thresholds: HashMap<String, f64>,
    /// Historical years; defaults from configuration.
    #[serde(default)]
    pub years: Option<u32>,
}

impl AnalyzeRequest {
    /// Resolve the wire request into a validated-shape domain request.
    /// Full validation happens in [`AnalysisRequest::validate`]; this only
    /// parses names and fills defaults.
    pub fn into_request(self, config: &AppConfig) -> Result<AnalysisRequest, AppError> {
        let name = self
            .location_name
            .unwrap_or_else(|| format!("{:.4}, {:.4}", self.latitude, self.longitude));

        let window = match (self.start_date, self.end_date, self.date) {
            (Some(start), Some(end), _) => DateWindow::new(start, end),
            (None, None, Some(center)) => {
                DateWindow::around(center, config.analysis.window_days)
            }
            _ => {
                return Err(AppError::BadRequest(
                    "Provide either start_date and end_date, or a center date".to_string(),
                ))
            }
        };

        let variables = self
            .variables
            .iter()
            .map(|name| name.parse::<WeatherVariable>().map_err(AppError::BadRequest))
            .collect::<Result<Vec<_>, _>>()?;

        let mut thresholds = ThresholdMap::new();
        for (name, value) in self.thresholds {
            let variable = name.parse::<WeatherVariable>().map_err(AppError::BadRequest)?;
            thresholds.set(variable, value);
        }

        Ok(AnalysisRequest {
            location: Location::new(self.latitude, self.longitude, name),
            window,
            variables,
            thresholds,
            years: self.years.unwrap_or(config.analysis.default_years),
        })
    }
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportQuery {
    /// Export format: "csv", "timeseries-csv", "json", or "report".
    /// Defaults to "json".
    #[serde(default)]
    pub format: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Metadata for one supported variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableInfo {
    pub name: String,
    pub units: String,
    pub data_source: String,
    pub default_threshold: f64,
}

/// Response for the variable listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableListResponse {
    pub variables: Vec<VariableInfo>,
    pub total: usize,
}
