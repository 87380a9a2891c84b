//! Error types for corpus operations

use thiserror::Error;

/// Errors that stop a corpus operation before it starts
///
/// Per-item failures inside a batch are never surfaced here; they are
/// collected into the outcome's `errors` list instead.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The persistence capability did not answer its health check
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A single write the caller depends on failed
    #[error("Store error: {0}")]
    Store(String),

    /// The caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
