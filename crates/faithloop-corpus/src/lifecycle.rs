//! Seed and purge of the tagged demo corpus
//!
//! Both operations run strictly sequentially. A failing item is recorded in
//! the outcome and the loop moves on; only an unreachable store aborts a run.

use crate::config::SeedConfig;
use crate::demo_content::build_demo_items;
use crate::error::CorpusError;
use crate::outcome::{PurgeOutcome, SeedOutcome};
use faithloop_domain::{
    BestEffort, DeleteFilter, Entry, ExtractionFields, ExtractionType, Extractor, Indexer,
    JournalStore, NewEntry, NewExtraction, RequestContext, Table, DEMO_TAG,
};
use faithloop_extractor::RuleExtractor;
use std::fmt::Display;
use tracing::{debug, info};

/// Drives the extract → persist → index pipeline over a store and an indexer
///
/// The store and the indexer are usually the same object; pass a reference
/// twice (`CorpusManager::new(&store, &store)`).
pub struct CorpusManager<S, I, E = RuleExtractor> {
    pub(crate) store: S,
    pub(crate) indexer: I,
    pub(crate) extractor: E,
}

impl<S, I> CorpusManager<S, I, RuleExtractor>
where
    S: JournalStore,
    I: Indexer,
    S::Error: Display,
    I::Error: Display,
{
    /// Create a manager using the default rule extractor
    pub fn new(store: S, indexer: I) -> Self {
        Self::with_extractor(store, indexer, RuleExtractor::default())
    }
}

impl<S, I, E> CorpusManager<S, I, E>
where
    S: JournalStore,
    I: Indexer,
    E: Extractor,
    S::Error: Display,
    I::Error: Display,
{
    /// Create a manager with a custom extractor
    pub fn with_extractor(store: S, indexer: I, extractor: E) -> Self {
        Self {
            store,
            indexer,
            extractor,
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seed the demo corpus for `ctx.user_id`
    ///
    /// Returns `Err` only when the store fails its health check. Everything
    /// else lands in [`SeedOutcome::errors`]. A zero day count still runs the
    /// overwrite purge and then seeds nothing.
    pub fn seed(
        &self,
        ctx: &RequestContext,
        config: &SeedConfig,
    ) -> Result<SeedOutcome, CorpusError> {
        self.store
            .health_check()
            .map_err(|e| CorpusError::StoreUnavailable(e.to_string()))?;

        let mut outcome = SeedOutcome::new();

        if config.overwrite {
            outcome.record_purge(self.purge(ctx));
        }

        let items = build_demo_items(ctx, config.days);
        info!("Seeding {} demo check-ins for {}", items.len(), ctx.user_id);

        for (day_index, item) in items.into_iter().enumerate() {
            self.seed_item(ctx, day_index, item, config.also_index, &mut outcome);
        }

        info!(
            "Seed complete: {} check-ins, {} extractions, {} indexed, {} errors",
            outcome.inserted_checkins,
            outcome.inserted_extractions,
            outcome.indexed,
            outcome.errors.len()
        );
        Ok(outcome)
    }

    fn seed_item(
        &self,
        ctx: &RequestContext,
        day_index: usize,
        item: NewEntry,
        also_index: bool,
        outcome: &mut SeedOutcome,
    ) {
        let entry = match self.store.insert_entry(ctx, item) {
            Ok(entry) => entry,
            Err(e) => {
                outcome.record_error(format!(
                    "Check-in insert failed (day_index={}): {}",
                    day_index, e
                ));
                return;
            }
        };
        outcome.inserted_checkins += 1;
        debug!("Seeded demo check-in {} (day_index={})", entry.id, day_index);

        let fields = self.extractor.extract(&entry.content);

        // Derived rows carry the item's own timestamp, not the request clock
        let item_ctx = RequestContext::at(ctx.user_id, entry.created_at);
        let extraction =
            NewExtraction::for_checkin(entry.id, ExtractionType::DemoRule, fields.clone());
        match self.store.insert_extraction(&item_ctx, extraction) {
            Ok(_) => outcome.inserted_extractions += 1,
            Err(e) => outcome.record_error(format!("Extraction insert failed for {}: {}", entry.id, e)),
        }

        if also_index {
            let indexed = index_pair(
                &self.indexer,
                &item_ctx,
                &entry,
                ExtractionType::DemoRule,
                &fields,
                &mut outcome.errors,
            );
            if indexed {
                outcome.indexed += 1;
            }
        }
    }

    /// Remove every demo-tagged entry of `ctx.user_id` and its derived rows
    ///
    /// Never fails: listing and per-entry delete failures are recorded in
    /// the outcome. Chunk deletion is best-effort and not recorded.
    pub fn purge(&self, ctx: &RequestContext) -> PurgeOutcome {
        let mut outcome = PurgeOutcome::new();

        let demo_entries = match self.store.entries_with_tag(ctx, DEMO_TAG) {
            Ok(entries) => entries,
            Err(e) => {
                outcome.record_error(format!("Listing demo check-ins failed: {}", e));
                return outcome;
            }
        };
        if demo_entries.is_empty() {
            debug!("No demo check-ins to purge for {}", ctx.user_id);
            return outcome;
        }

        info!("Purging {} demo check-ins for {}", demo_entries.len(), ctx.user_id);

        for entry in &demo_entries {
            let extractions = DeleteFilter::for_user(ctx).checkin_source(entry.id);
            match self.store.delete_by_filter(Table::Extractions, &extractions) {
                Ok(count) => outcome.deleted_extractions += count,
                Err(e) => outcome.record_error(format!("Extraction delete failed for {}: {}", entry.id, e)),
            }

            let derived = DeleteFilter::for_user(ctx).source(entry.id);
            match self.store.delete_by_filter(Table::MemoryEmbeddings, &derived) {
                Ok(count) => outcome.deleted_embeddings += count,
                Err(e) => outcome.record_error(format!("Embedding delete failed for {}: {}", entry.id, e)),
            }

            match BestEffort::from_result(self.store.delete_by_filter(Table::MemoryChunks, &derived)) {
                BestEffort::Done(count) => outcome.deleted_chunks += count,
                failed => failed.ignore("memory_chunks"),
            }
        }

        let tagged = DeleteFilter::for_user(ctx).tagged(DEMO_TAG);
        match self.store.delete_by_filter(Table::Entries, &tagged) {
            Ok(count) => outcome.deleted_checkins = count,
            Err(e) => outcome.record_error(format!("Demo check-in delete failed: {}", e)),
        }

        info!(
            "Purge complete: {} check-ins, {} extractions, {} embeddings, {} chunks",
            outcome.deleted_checkins,
            outcome.deleted_extractions,
            outcome.deleted_embeddings,
            outcome.deleted_chunks
        );
        outcome
    }
}

/// Index an entry and its extraction, recording failures into `errors`
///
/// Returns whether the entry text itself was indexed.
pub(crate) fn index_pair<I>(
    indexer: &I,
    ctx: &RequestContext,
    entry: &Entry,
    extraction_type: ExtractionType,
    fields: &ExtractionFields,
    errors: &mut Vec<String>,
) -> bool
where
    I: Indexer,
    I::Error: Display,
{
    let indexed = match indexer.index_entry(ctx, entry.id, &entry.content, fields) {
        Ok(written) => written,
        Err(e) => {
            let message = format!("Indexing check-in {} failed: {}", entry.id, e);
            tracing::warn!("{}", message);
            errors.push(message);
            false
        }
    };

    if let Err(e) = indexer.index_extraction(ctx, entry.id, extraction_type, fields) {
        let message = format!("Indexing extraction for {} failed: {}", entry.id, e);
        tracing::warn!("{}", message);
        errors.push(message);
    }

    indexed
}
