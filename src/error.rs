//! Error types for the analysis engine.
//!
//! The taxonomy separates caller mistakes (`InvalidInput`), upstream data
//! problems (`DataUnavailable`, `InvalidYearsRange`), and internal invariant
//! violations (`EmptySample`). Numerical degeneracies such as zero-variance
//! samples are not errors; they have defined fallback values in the services
//! that encounter them.

use crate::provider::ProviderError;

/// Result type for analysis operations.
pub type AnalysisResultExt<T> = Result<T, AnalysisError>;

/// Error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Malformed request (coordinates out of range, bad date window, empty
    /// variable list). Detected before any sample retrieval and surfaced
    /// immediately to the caller, never retried.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The sample provider cannot produce a sample for the requested
    /// location/variable combination. Propagated as-is; no defaults are
    /// substituted and no retry is attempted here.
    #[error("No data available: {message}")]
    DataUnavailable { message: String },

    /// Historical-years count outside the supported range.
    #[error("Historical years must be within [{min}, {max}], got {years}")]
    InvalidYearsRange { years: u32, min: u32, max: u32 },

    /// A zero-length sample reached the statistics engine. This is a
    /// programming/integration fault, not a user error; it cannot occur when
    /// the sample provider contract is honored.
    #[error("Cannot compute statistics for an empty sample")]
    EmptySample,
}

impl AnalysisError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a data-unavailable error.
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }
}

impl From<ProviderError> for AnalysisError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::DataUnavailable { .. } => AnalysisError::DataUnavailable {
                message: err.to_string(),
            },
            ProviderError::InvalidRange { years, min, max } => {
                AnalysisError::InvalidYearsRange { years, min, max }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_conversion() {
        let err = ProviderError::InvalidRange {
            years: 5,
            min: 10,
            max: 30,
        };
        let analysis_err: AnalysisError = err.into();
        assert!(matches!(
            analysis_err,
            AnalysisError::InvalidYearsRange { years: 5, .. }
        ));
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::invalid_input("Latitude must be between -90 and 90");
        assert!(err.to_string().contains("Latitude"));
    }
}
