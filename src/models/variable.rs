//! Weather variable enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weather variable supported by the analysis engine.
///
/// Serialized names match the display names used in reports and exports
/// ("Wind Speed", not "wind_speed"), so results round-trip through JSON
/// without a separate mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherVariable {
    Temperature,
    Precipitation,
    #[serde(rename = "Wind Speed")]
    WindSpeed,
    Humidity,
    #[serde(rename = "Air Quality")]
    AirQuality,
}

impl WeatherVariable {
    /// All supported variables, in canonical presentation order.
    pub const ALL: [WeatherVariable; 5] = [
        WeatherVariable::Temperature,
        WeatherVariable::Precipitation,
        WeatherVariable::WindSpeed,
        WeatherVariable::Humidity,
        WeatherVariable::AirQuality,
    ];

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "Temperature",
            WeatherVariable::Precipitation => "Precipitation",
            WeatherVariable::WindSpeed => "Wind Speed",
            WeatherVariable::Humidity => "Humidity",
            WeatherVariable::AirQuality => "Air Quality",
        }
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WeatherVariable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "temperature" => Ok(WeatherVariable::Temperature),
            "precipitation" => Ok(WeatherVariable::Precipitation),
            "windspeed" | "wind" => Ok(WeatherVariable::WindSpeed),
            "humidity" => Ok(WeatherVariable::Humidity),
            "airquality" | "aqi" => Ok(WeatherVariable::AirQuality),
            other => Err(format!("Unknown weather variable: {}", other)),
        }
    }
}
