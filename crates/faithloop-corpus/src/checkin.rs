//! Recording a user-authored check-in

use crate::error::CorpusError;
use crate::lifecycle::{index_pair, CorpusManager};
use faithloop_domain::{
    Entry, Extraction, ExtractionType, Extractor, Indexer, JournalStore, NewEntry, NewExtraction,
    RequestContext,
};
use serde::Serialize;
use std::fmt::Display;
use tracing::{info, warn};

/// Result of recording one check-in
#[derive(Debug, Clone, Serialize)]
pub struct CheckinOutcome {
    /// The persisted entry
    pub entry: Entry,

    /// The `rule_based` extraction, when it was persisted
    pub extraction: Option<Extraction>,

    /// Whether the entry text was indexed
    pub indexed: bool,

    /// Recorded failures of the derived writes
    pub errors: Vec<String>,
}

impl<S, I, E> CorpusManager<S, I, E>
where
    S: JournalStore,
    I: Indexer,
    E: Extractor,
    S::Error: Display,
    I::Error: Display,
{
    /// Persist a check-in, extract it, and index both
    ///
    /// Only the entry write is fatal. The extraction and the index writes are
    /// derived data and their failures are returned in
    /// [`CheckinOutcome::errors`].
    pub fn record_checkin(
        &self,
        ctx: &RequestContext,
        entry: NewEntry,
        also_index: bool,
    ) -> Result<CheckinOutcome, CorpusError> {
        if entry.content.trim().is_empty() {
            return Err(CorpusError::InvalidInput(
                "check-in content is empty".to_string(),
            ));
        }

        let entry = self
            .store
            .insert_entry(ctx, entry)
            .map_err(|e| CorpusError::Store(e.to_string()))?;
        info!("Recorded check-in {} ({})", entry.id, entry.mood);

        let fields = self.extractor.extract(&entry.content);
        let mut errors = Vec::new();

        let new_extraction =
            NewExtraction::for_checkin(entry.id, ExtractionType::RuleBased, fields.clone());
        let extraction = match self.store.insert_extraction(ctx, new_extraction) {
            Ok(extraction) => Some(extraction),
            Err(e) => {
                let message = format!("Extraction insert failed for {}: {}", entry.id, e);
                warn!("{}", message);
                errors.push(message);
                None
            }
        };

        let indexed = also_index
            && index_pair(
                &self.indexer,
                ctx,
                &entry,
                ExtractionType::RuleBased,
                &fields,
                &mut errors,
            );

        Ok(CheckinOutcome {
            entry,
            extraction,
            indexed,
            errors,
        })
    }
}
