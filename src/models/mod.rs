//! Domain types for analysis requests, samples, and results.
//!
//! All types derive Serialize/Deserialize so they can flow unchanged through
//! the HTTP layer and the export renderings.

pub mod request;
pub mod result;
pub mod variable;

pub use request::{AnalysisRequest, DateWindow, Location, Sample, ThresholdMap};
pub use result::{
    AnalysisMetadata, AnalysisResult, HistogramData, PercentileTable, ProbabilityResult,
    TimeSeriesPoint, TrendDirection, TrendResult, TrendSignificance, VariableAnalysis,
    VariableStatistics,
};
pub use variable::WeatherVariable;
