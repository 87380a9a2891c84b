//! Error types for report generation

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a weekly report
#[derive(Debug, Error)]
pub enum ReportError {
    /// The completion provider failed or is unavailable
    #[error("Completion failed: {0}")]
    Completion(String),

    /// The completion did not match the report schema
    #[error("Schema violation: {0}")]
    Schema(String),

    /// Configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Date range is invalid
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// Entries for the range could not be read
    #[error("Store error: {0}")]
    Store(String),

    /// No check-ins exist in the range
    #[error("No check-ins between {start} and {end}")]
    NoEntries {
        /// First day of the range
        start: NaiveDate,
        /// Last day of the range
        end: NaiveDate,
    },
}
