//! JSON serialization for run reports.

use crate::report::RunReport;

/// Serialize a RunReport to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RunReport).
pub fn to_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a RunReport to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RunReport).
pub fn to_json_pretty(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
