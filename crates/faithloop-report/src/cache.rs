//! Session-scoped report cache
//!
//! Holds at most one report. Requesting a different range (or a different
//! demo setting) replaces it.

use crate::builder::WeeklyReport;
use crate::range::ReportRange;
use faithloop_domain::Entry;

/// A report together with what it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct CachedReport {
    /// Window the report covers
    pub range: ReportRange,
    /// Whether demo entries were excluded
    pub exclude_demo: bool,
    /// The report
    pub report: WeeklyReport,
    /// Entries the report cites
    pub entries: Vec<Entry>,
}

/// Single-slot report cache
#[derive(Debug, Default)]
pub struct ReportCache {
    slot: Option<CachedReport>,
}

impl ReportCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached report for `range`, if it is the one held
    pub fn get(&self, range: &ReportRange, exclude_demo: bool) -> Option<&CachedReport> {
        self.slot
            .as_ref()
            .filter(|c| c.range == *range && c.exclude_demo == exclude_demo)
    }

    /// Replace whatever is held
    pub fn replace(&mut self, cached: CachedReport) {
        self.slot = Some(cached);
    }

    /// The report currently held
    pub fn current(&self) -> Option<&CachedReport> {
        self.slot.as_ref()
    }

    /// Drop the held report
    pub fn clear(&mut self) {
        self.slot = None;
    }
}
