//! Loading report inputs from the journal store

use crate::error::ReportError;
use crate::range::ReportRange;
use faithloop_domain::{Entry, Extraction, JournalStore, RequestContext, SourceType};
use std::fmt::Display;
use tracing::{debug, warn};

/// Entries and extractions for one report window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInputs {
    /// Entries in the window, oldest first
    pub entries: Vec<Entry>,
    /// Extractions of those entries
    pub extractions: Vec<Extraction>,
    /// Entries whose extraction lookup failed and were reported without one
    pub skipped_lookups: usize,
}

/// Fetch entries in `range`, then every check-in extraction per entry
///
/// A failed entry query is an error. A failed extraction lookup for one entry
/// is logged and skipped.
pub fn load_inputs<S>(
    store: &S,
    ctx: &RequestContext,
    range: &ReportRange,
    exclude_demo: bool,
) -> Result<ReportInputs, ReportError>
where
    S: JournalStore,
    S::Error: Display,
{
    let (start, end) = range.bounds();
    let mut entries = store
        .entries_in_range(ctx, start, end)
        .map_err(|e| ReportError::Store(e.to_string()))?;

    if exclude_demo {
        entries.retain(|e| !e.is_demo());
    }

    let mut inputs = ReportInputs::default();
    for entry in &entries {
        match store.extractions_for_source(ctx, SourceType::Checkin, entry.id) {
            Ok(found) => inputs.extractions.extend(found),
            Err(e) => {
                warn!("Skipping extractions for entry {}: {}", entry.id, e);
                inputs.skipped_lookups += 1;
            }
        }
    }
    inputs.entries = entries;

    debug!(
        "Loaded {} entries and {} extractions for {}",
        inputs.entries.len(),
        inputs.extractions.len(),
        range
    );
    Ok(inputs)
}
