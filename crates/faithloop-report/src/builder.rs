//! Weekly report builder
//!
//! Merges deterministic statistics with a schema-constrained narrative from
//! the completion provider.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::prompt::build_messages;
use crate::schema::{report_schema, Narrative};
use crate::stats::{MoodAnalysis, ReportStats};
use faithloop_domain::{CompletionProvider, Entry, Extraction};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// A generated weekly report
///
/// Never persisted. `stats` and `mood_analysis` are computed locally; the
/// remaining fields come from the completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Core theme of the week
    pub summary: String,
    /// Gratitude highlights
    pub wins: Vec<String>,
    /// Recurring hindrances
    pub issues: Vec<String>,
    /// Progress on resolutions and applications
    pub patterns: Vec<String>,
    /// Small practices for next week
    pub next_experiments: Vec<String>,
    /// Average mood; absent when the window has no entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_analysis: Option<MoodAnalysis>,
    /// Deterministic counts
    pub stats: ReportStats,
}

impl WeeklyReport {
    fn assemble(narrative: Narrative, stats: ReportStats) -> Self {
        Self {
            summary: narrative.summary,
            wins: narrative.wins,
            issues: narrative.issues,
            patterns: narrative.patterns,
            next_experiments: narrative.next_experiments,
            mood_analysis: stats.mood_distribution.analysis(),
            stats,
        }
    }
}

/// Builds weekly reports through a completion provider
pub struct ReportBuilder<P> {
    provider: P,
    config: ReportConfig,
}

impl<P> ReportBuilder<P>
where
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create a builder with a validated configuration
    pub fn new(provider: P, config: ReportConfig) -> Result<Self, ReportError> {
        config.validate().map_err(ReportError::InvalidConfig)?;
        Ok(Self { provider, config })
    }

    /// Create a builder with default settings
    pub fn with_defaults(provider: P) -> Self {
        Self {
            provider,
            config: ReportConfig::default(),
        }
    }

    /// Builder configuration
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build a report, or `None` when the narrative is unavailable
    ///
    /// `None` means "report unavailable", not an empty report.
    pub fn build_weekly_report(
        &self,
        entries: &[Entry],
        extractions: &[Extraction],
    ) -> Option<WeeklyReport> {
        match self.try_build(entries, extractions) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Weekly report unavailable: {}", e);
                None
            }
        }
    }

    /// Build a report, reporting why it failed
    pub fn try_build(
        &self,
        entries: &[Entry],
        extractions: &[Extraction],
    ) -> Result<WeeklyReport, ReportError> {
        let stats = ReportStats::compute(entries, extractions);

        let tasks: Vec<&str> = extractions
            .iter()
            .flat_map(|e| e.fields.tasks.iter().map(String::as_str))
            .collect();
        let obstacles: Vec<&str> = extractions
            .iter()
            .flat_map(|e| e.fields.obstacles.iter().map(String::as_str))
            .collect();

        let messages = build_messages(entries, &tasks, &obstacles, &self.config);
        debug!(
            "Requesting weekly narrative for {} entries ({} tasks, {} obstacles)",
            entries.len(),
            tasks.len(),
            obstacles.len()
        );

        let value = self
            .provider
            .complete_structured(&messages, &report_schema(), self.config.temperature)
            .map_err(|e| ReportError::Completion(e.to_string()))?;

        let narrative =
            Narrative::from_value(value).map_err(|e| ReportError::Schema(e.to_string()))?;

        info!("Weekly report built from {} entries", stats.total_checkins);
        Ok(WeeklyReport::assemble(narrative, stats))
    }
}
