//! Result export renderings.
//!
//! Three presentation formats over [`AnalysisResult`](crate::models::AnalysisResult):
//! flat CSV for spreadsheets, a nested JSON document for programmatic
//! consumers, and a plain-text summary report. All renderings are pure
//! string builders; writing to disk or the network is the caller's concern.

pub mod csv;
pub mod json;
pub mod report;

pub use csv::{to_csv, to_timeseries_csv};
pub use json::to_json_document;
pub use report::to_text_report;
