//! Checkin command implementation.

use crate::cli::CheckinArgs;
use crate::commands::read_text;
use crate::error::Result;
use crate::output::Formatter;
use faithloop_corpus::CorpusManager;
use faithloop_domain::{NewEntry, RequestContext};
use faithloop_store::SqliteStore;

/// Execute the checkin command.
pub fn execute_checkin(
    args: CheckinArgs,
    store: &SqliteStore,
    ctx: &RequestContext,
    formatter: &Formatter,
) -> Result<()> {
    let content = read_text(args.text.as_deref(), args.file.as_deref())?;
    let entry = NewEntry::new(content, args.mood.into()).with_tags(args.tags);

    let manager = CorpusManager::new(store, store);
    let outcome = manager.record_checkin(ctx, entry, !args.no_index)?;

    println!("{}", formatter.format_checkin(&outcome)?);
    Ok(())
}
