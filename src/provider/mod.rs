//! Sample acquisition behind a swappable trait.
//!
//! The analysis core depends on [`SampleProvider`] but does not implement
//! real data acquisition; production deployments plug in a provider backed
//! by an upstream observation archive, while development and tests use the
//! deterministic [`SyntheticProvider`].
//!
//! Providers own unit conversion: every sample handed to the core is already
//! in the variable's display unit (°F, inches, mph, %, AQI).

pub mod synthetic;

use async_trait::async_trait;

use crate::models::{DateWindow, Location, Sample, WeatherVariable};
use crate::models::request::{MAX_YEARS, MIN_YEARS};

pub use synthetic::SyntheticProvider;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error type for sample retrieval.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No data exists for the location/variable combination.
    #[error("No data available for {variable} at ({latitude:.4}, {longitude:.4})")]
    DataUnavailable {
        variable: WeatherVariable,
        latitude: f64,
        longitude: f64,
    },

    /// Requested historical-years count outside the supported range.
    #[error("Historical years must be within [{min}, {max}], got {years}")]
    InvalidRange { years: u32, min: u32, max: u32 },
}

impl ProviderError {
    /// Create an invalid-range error with the supported bounds filled in.
    pub fn invalid_range(years: u32) -> Self {
        Self::InvalidRange {
            years,
            min: MIN_YEARS,
            max: MAX_YEARS,
        }
    }
}

/// Provider of fixed-length yearly observation samples.
///
/// One value per historical year for a (location, variable, window)
/// combination. Implementations must be `Send + Sync` to work with async
/// Rust; retrieval is expected to complete or fail within a bounded timeout
/// when backed by a network source.
#[async_trait]
pub trait SampleProvider: Send + Sync {
    /// Fetch `years` yearly observations for one variable at one location.
    ///
    /// # Errors
    /// * [`ProviderError::DataUnavailable`] when no data exists for the
    ///   location/variable combination
    /// * [`ProviderError::InvalidRange`] when `years` is outside [10, 30]
    async fn fetch_sample(
        &self,
        location: &Location,
        variable: WeatherVariable,
        window: &DateWindow,
        years: u32,
    ) -> ProviderResult<Sample>;
}
