//! Configuration surface for the analysis engine.
//!
//! Per-variable unit labels, source labels, default thresholds, and unit
//! conversions, plus analysis-wide settings. Consumed, not owned, by the
//! core: statistics operate on already-converted values, and conversion is
//! the sample provider's responsibility.
//!
//! Configuration can be loaded from a TOML file; every field has an in-code
//! default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::AnalysisError;
use crate::models::WeatherVariable;

/// Conversion from a provider's raw unit to the variable's display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitConversion {
    /// Kelvin to degrees Fahrenheit
    KelvinToFahrenheit,
    /// Millimeters to inches
    MillimetersToInches,
    /// Meters per second to miles per hour
    MetersPerSecondToMph,
    /// Dimensionless fraction to percent
    FractionToPercent,
    /// Aerosol optical depth to a simplified AQI scale
    AodToAqi,
    Identity,
}

impl UnitConversion {
    /// Apply the conversion to one raw value.
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            UnitConversion::KelvinToFahrenheit => (raw - 273.15) * 9.0 / 5.0 + 32.0,
            UnitConversion::MillimetersToInches => raw / 25.4,
            UnitConversion::MetersPerSecondToMph => raw * 2.23694,
            UnitConversion::FractionToPercent => raw * 100.0,
            UnitConversion::AodToAqi => raw * 100.0,
            UnitConversion::Identity => raw,
        }
    }
}

/// Configuration for one weather variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    /// Display unit label
    pub units: String,
    /// Upstream data source label
    pub data_source: String,
    /// Default exceedance threshold in display units
    pub default_threshold: f64,
    /// Conversion from the provider's raw unit to the display unit
    pub conversion: UnitConversion,
}

/// Analysis-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_years")]
    pub default_years: u32,
    /// Days on each side of a center date when building a window.
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    /// Cache time-to-live in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_years() -> u32 {
    20
}

fn default_window_days() -> i64 {
    7
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_years: default_years(),
            window_days: default_window_days(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default = "default_temperature")]
    pub temperature: VariableConfig,
    #[serde(default = "default_precipitation")]
    pub precipitation: VariableConfig,
    #[serde(default = "default_wind_speed")]
    pub wind_speed: VariableConfig,
    #[serde(default = "default_humidity")]
    pub humidity: VariableConfig,
    #[serde(default = "default_air_quality")]
    pub air_quality: VariableConfig,
}

fn default_temperature() -> VariableConfig {
    VariableConfig {
        units: "°F".to_string(),
        data_source: "MERRA-2".to_string(),
        default_threshold: 90.0,
        conversion: UnitConversion::KelvinToFahrenheit,
    }
}

fn default_precipitation() -> VariableConfig {
    VariableConfig {
        units: "inches".to_string(),
        data_source: "GPM IMERG".to_string(),
        default_threshold: 2.0,
        conversion: UnitConversion::MillimetersToInches,
    }
}

fn default_wind_speed() -> VariableConfig {
    VariableConfig {
        units: "mph".to_string(),
        data_source: "MERRA-2".to_string(),
        default_threshold: 25.0,
        conversion: UnitConversion::MetersPerSecondToMph,
    }
}

fn default_humidity() -> VariableConfig {
    VariableConfig {
        units: "%".to_string(),
        data_source: "MERRA-2".to_string(),
        default_threshold: 80.0,
        conversion: UnitConversion::FractionToPercent,
    }
}

fn default_air_quality() -> VariableConfig {
    VariableConfig {
        units: "AQI".to_string(),
        data_source: "MODIS".to_string(),
        default_threshold: 100.0,
        conversion: UnitConversion::AodToAqi,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisSettings::default(),
            temperature: default_temperature(),
            precipitation: default_precipitation(),
            wind_speed: default_wind_speed(),
            humidity: default_humidity(),
            air_quality: default_air_quality(),
        }
    }
}

impl AppConfig {
    /// Look up the configuration for one variable.
    pub fn variable(&self, variable: WeatherVariable) -> &VariableConfig {
        match variable {
            WeatherVariable::Temperature => &self.temperature,
            WeatherVariable::Precipitation => &self.precipitation,
            WeatherVariable::WindSpeed => &self.wind_speed,
            WeatherVariable::Humidity => &self.humidity,
            WeatherVariable::AirQuality => &self.air_quality,
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, AnalysisError> {
        toml::from_str(content)
            .map_err(|e| AnalysisError::invalid_input(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalysisError::invalid_input(format!(
                "Cannot read configuration file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}
