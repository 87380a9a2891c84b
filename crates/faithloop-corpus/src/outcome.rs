//! Outcome records for seed and purge runs
//!
//! Both records are append-only tallies: counters only go up and `errors`
//! only grows, so a partially failed run still reports what it did.

use serde::{Deserialize, Serialize};

/// Result of a seed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOutcome {
    /// Demo entries removed by the overwrite purge
    pub deleted_demo_checkins: usize,

    /// Entries persisted
    pub inserted_checkins: usize,

    /// Extractions persisted
    pub inserted_extractions: usize,

    /// Entries whose text was indexed
    pub indexed: usize,

    /// Recorded per-item failures
    pub errors: Vec<String>,
}

impl SeedOutcome {
    /// Create an empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the result of the overwrite purge
    pub fn record_purge(&mut self, purge: PurgeOutcome) {
        self.deleted_demo_checkins += purge.deleted_checkins;
        self.errors.extend(purge.errors);
    }

    /// Record a failure without stopping the batch
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.errors.push(message);
    }

    /// Whether nothing went wrong
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Demo Seed Summary".to_string(),
            "=================".to_string(),
            format!("Deleted demo check-ins: {}", self.deleted_demo_checkins),
            format!("Inserted check-ins: {}", self.inserted_checkins),
            format!("Inserted extractions: {}", self.inserted_extractions),
            format!("Indexed: {}", self.indexed),
        ];
        push_errors(&mut lines, &self.errors);
        lines.join("\n")
    }
}

/// Result of a purge run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeOutcome {
    /// Demo entries removed
    pub deleted_checkins: usize,

    /// Extraction rows removed
    pub deleted_extractions: usize,

    /// Embedding rows removed
    pub deleted_embeddings: usize,

    /// Chunk rows removed (failures here are not recorded)
    pub deleted_chunks: usize,

    /// Recorded failures
    pub errors: Vec<String>,
}

impl PurgeOutcome {
    /// Create an empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure without stopping the purge
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.errors.push(message);
    }

    /// Total rows removed across all tables
    pub fn total_deleted(&self) -> usize {
        self.deleted_checkins + self.deleted_extractions + self.deleted_embeddings + self.deleted_chunks
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Demo Purge Summary".to_string(),
            "==================".to_string(),
            format!("Check-ins: {}", self.deleted_checkins),
            format!("Extractions: {}", self.deleted_extractions),
            format!("Embeddings: {}", self.deleted_embeddings),
            format!("Chunks: {}", self.deleted_chunks),
            format!("Total: {}", self.total_deleted()),
        ];
        push_errors(&mut lines, &self.errors);
        lines.join("\n")
    }
}

fn push_errors(lines: &mut Vec<String>, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("Errors ({}):", errors.len()));
    for error in errors {
        lines.push(format!("  {}", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_purge_folds_counts_and_errors() {
        let mut seed = SeedOutcome::new();
        seed.record_error("first");
        let purge = PurgeOutcome {
            deleted_checkins: 4,
            deleted_extractions: 4,
            errors: vec!["embedding delete failed".to_string()],
            ..Default::default()
        };
        seed.record_purge(purge);
        assert_eq!(seed.deleted_demo_checkins, 4);
        assert_eq!(seed.errors, vec!["first", "embedding delete failed"]);
        assert!(!seed.is_clean());
    }

    #[test]
    fn test_total_deleted() {
        let purge = PurgeOutcome {
            deleted_checkins: 2,
            deleted_extractions: 2,
            deleted_embeddings: 4,
            deleted_chunks: 3,
            errors: Vec::new(),
        };
        assert_eq!(purge.total_deleted(), 11);
    }

    #[test]
    fn test_summary_lists_errors() {
        let mut seed = SeedOutcome::new();
        seed.inserted_checkins = 3;
        assert!(!seed.summary().contains("Errors"));
        seed.record_error("entry 2 failed");
        let summary = seed.summary();
        assert!(summary.contains("Inserted check-ins: 3"));
        assert!(summary.contains("Errors (1):"));
        assert!(summary.contains("  entry 2 failed"));
    }
}
