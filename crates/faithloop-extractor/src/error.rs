//! Error types for the Extractor

use thiserror::Error;

/// Errors raised while building an extractor
///
/// Extraction itself is total; only configuration can fail.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Project pattern failed to compile
    #[error("Invalid project pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
