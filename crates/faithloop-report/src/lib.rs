//! FaithLoop Report
//!
//! Weekly aggregation of check-ins into a structured growth report.
//!
//! # Architecture
//!
//! ```text
//! JournalStore → entries + extractions → stats (local)
//!                                     ↘ prompt → CompletionProvider → narrative
//!                                       stats + narrative → WeeklyReport
//! ```
//!
//! The deterministic part (`stats`, `mood_analysis`) is always computed
//! locally. If the narrative cannot be produced the report is unavailable
//! rather than empty.
//!
//! # Example Usage
//!
//! ```
//! use faithloop_report::{ReportBuilder, ReportConfig};
//! use faithloop_llm::MockProvider;
//! use serde_json::json;
//!
//! let provider = MockProvider::new(json!({
//!     "summary": "평안한 한 주",
//!     "wins": [], "issues": [], "patterns": [], "next_experiments": []
//! }));
//! let builder = ReportBuilder::new(provider, ReportConfig::default()).unwrap();
//! let report = builder.build_weekly_report(&[], &[]).unwrap();
//! assert!(report.mood_analysis.is_none());
//! ```

#![warn(missing_docs)]

mod builder;
mod cache;
mod config;
mod error;
mod loader;
pub mod prompt;
mod range;
pub mod schema;
mod stats;

pub use builder::{ReportBuilder, WeeklyReport};
pub use cache::{CachedReport, ReportCache};
pub use config::ReportConfig;
pub use error::ReportError;
pub use loader::{load_inputs, ReportInputs};
pub use range::{ReportRange, WeekPreset};
pub use schema::Narrative;
pub use stats::{MoodAnalysis, MoodDistribution, ReportStats};

use faithloop_domain::{CompletionProvider, JournalStore, RequestContext};
use std::fmt::Display;
use tracing::info;

/// Session-level report generation over a store, with a one-report cache
pub struct WeeklyReporter<S, P> {
    store: S,
    builder: ReportBuilder<P>,
    cache: ReportCache,
}

impl<S, P> WeeklyReporter<S, P>
where
    S: JournalStore,
    S::Error: Display,
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create a reporter
    pub fn new(store: S, builder: ReportBuilder<P>) -> Self {
        Self {
            store,
            builder,
            cache: ReportCache::new(),
        }
    }

    /// Report for `range` using the configured demo setting
    pub fn report(
        &mut self,
        ctx: &RequestContext,
        range: ReportRange,
    ) -> Result<CachedReport, ReportError> {
        let exclude_demo = self.builder.config().exclude_demo;
        self.report_with(ctx, range, exclude_demo)
    }

    /// Report for `range`, reusing the cached report when it matches
    ///
    /// # Errors
    ///
    /// - `NoEntries` when the window holds no (non-excluded) check-ins
    /// - `Store` when entries cannot be read
    /// - `Completion` / `Schema` when the narrative is unavailable
    pub fn report_with(
        &mut self,
        ctx: &RequestContext,
        range: ReportRange,
        exclude_demo: bool,
    ) -> Result<CachedReport, ReportError> {
        if let Some(hit) = self.cache.get(&range, exclude_demo) {
            info!("Using cached report for {}", range);
            return Ok(hit.clone());
        }

        let inputs = load_inputs(&self.store, ctx, &range, exclude_demo)?;
        if inputs.entries.is_empty() {
            return Err(ReportError::NoEntries {
                start: range.start,
                end: range.end,
            });
        }

        let report = self.builder.try_build(&inputs.entries, &inputs.extractions)?;
        let cached = CachedReport {
            range,
            exclude_demo,
            report,
            entries: inputs.entries,
        };
        self.cache.replace(cached.clone());
        Ok(cached)
    }

    /// The report currently cached, if any
    pub fn cached(&self) -> Option<&CachedReport> {
        self.cache.current()
    }
}
