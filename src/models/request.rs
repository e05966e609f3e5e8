//! Analysis request types: location, date window, thresholds, and samples.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;

use super::variable::WeatherVariable;
use crate::error::AnalysisError;

/// Minimum supported historical-years count.
pub const MIN_YEARS: u32 = 10;
/// Maximum supported historical-years count.
pub const MAX_YEARS: u32 = 30;

/// A geographic point with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees, must be within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, must be within [-180, 180]
    pub longitude: f64,
    /// Display name (e.g. "Austin, TX")
    pub name: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
        }
    }

    /// Validate coordinate ranges. Out-of-range values are rejected,
    /// never clamped.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AnalysisError::invalid_input(format!(
                "Latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AnalysisError::invalid_input(format!(
                "Longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// An inclusive calendar date window. Same-day windows are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Construct a symmetric window of `window_days` on each side of a
    /// center date.
    pub fn around(center: NaiveDate, window_days: i64) -> Self {
        Self {
            start: center - Duration::days(window_days),
            end: center + Duration::days(window_days),
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.start > self.end {
            return Err(AnalysisError::invalid_input(format!(
                "Start date {} is after end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Display label in the "MM-DD to MM-DD" form used by reports.
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%m-%d"),
            self.end.format("%m-%d")
        )
    }
}

/// Per-variable threshold lookup keyed by the variable enum.
///
/// Keying by [`WeatherVariable`] makes a missing threshold an explicit
/// `None`; there is no string-key convention a caller could silently get
/// wrong.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMap {
    thresholds: HashMap<WeatherVariable, f64>,
}

impl ThresholdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, variable: WeatherVariable, threshold: f64) -> Self {
        self.thresholds.insert(variable, threshold);
        self
    }

    pub fn set(&mut self, variable: WeatherVariable, threshold: f64) {
        self.thresholds.insert(variable, threshold);
    }

    pub fn get(&self, variable: WeatherVariable) -> Option<f64> {
        self.thresholds.get(&variable).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl FromIterator<(WeatherVariable, f64)> for ThresholdMap {
    fn from_iter<T: IntoIterator<Item = (WeatherVariable, f64)>>(iter: T) -> Self {
        Self {
            thresholds: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of yearly observations for one (variable, location,
/// window) combination, in display units. Element 0 is the oldest year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Create a sample, rejecting non-finite observations.
    pub fn new(values: Vec<f64>) -> Result<Self, AnalysisError> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(AnalysisError::invalid_input(format!(
                "Sample contains a non-finite observation: {}",
                bad
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A request for a multi-variable historical probability analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub location: Location,
    pub window: DateWindow,
    /// Requested variables in presentation order; duplicates are rejected.
    pub variables: Vec<WeatherVariable>,
    /// Optional per-variable exceedance thresholds.
    #[serde(default)]
    pub thresholds: ThresholdMap,
    /// Historical-years count, within [10, 30].
    pub years: u32,
}

impl AnalysisRequest {
    /// Validate the whole request. Runs before any sample retrieval.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.location.validate()?;
        self.window.validate()?;
        if self.variables.is_empty() {
            return Err(AnalysisError::invalid_input(
                "At least one weather variable must be requested",
            ));
        }
        let mut seen = HashSet::new();
        for variable in &self.variables {
            if !seen.insert(variable) {
                return Err(AnalysisError::invalid_input(format!(
                    "Duplicate variable in request: {}",
                    variable
                )));
            }
        }
        if !(MIN_YEARS..=MAX_YEARS).contains(&self.years) {
            return Err(AnalysisError::InvalidYearsRange {
                years: self.years,
                min: MIN_YEARS,
                max: MAX_YEARS,
            });
        }
        Ok(())
    }
}
