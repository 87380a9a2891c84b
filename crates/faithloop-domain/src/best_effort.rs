//! Best-effort results
//!
//! Some derived-data operations (chunk cleanup in particular) are allowed to
//! fail without affecting the caller. `BestEffort` makes that tolerance visible
//! at the call site instead of burying it in a silently discarded `Result`.

use std::fmt;

/// Outcome of an operation whose failure is tolerated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort<T> {
    /// The operation succeeded
    Done(T),
    /// The operation failed; the message is kept for logging only
    Failed(String),
}

impl<T> BestEffort<T> {
    /// Convert a fallible result, rendering the error with `Display`
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => BestEffort::Done(value),
            Err(e) => BestEffort::Failed(e.to_string()),
        }
    }

    /// The successful value, if any
    pub fn ok(self) -> Option<T> {
        match self {
            BestEffort::Done(value) => Some(value),
            BestEffort::Failed(_) => None,
        }
    }

    /// Whether the operation failed
    pub fn is_failed(&self) -> bool {
        matches!(self, BestEffort::Failed(_))
    }

    /// Explicitly discard the outcome, logging a failure at debug level
    pub fn ignore(self, what: &str) {
        if let BestEffort::Failed(message) = self {
            tracing::debug!("Ignoring best-effort failure ({}): {}", what, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let done: BestEffort<u32> = BestEffort::from_result(Ok::<_, String>(3));
        assert_eq!(done, BestEffort::Done(3));

        let failed: BestEffort<u32> = BestEffort::from_result(Err("boom"));
        assert!(failed.is_failed());
        assert_eq!(failed.ok(), None);
    }

    #[test]
    fn test_ignore_does_not_panic() {
        BestEffort::<()>::Failed("gone".to_string()).ignore("chunks");
        BestEffort::Done(1).ignore("chunks");
    }
}
