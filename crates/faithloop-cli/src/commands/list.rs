//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use faithloop_domain::{Entry, JournalStore, RequestContext, DEMO_TAG};
use faithloop_store::SqliteStore;

/// Execute the list command.
pub fn execute_list(
    args: ListArgs,
    store: &SqliteStore,
    ctx: &RequestContext,
    formatter: &Formatter,
) -> Result<()> {
    let entries = list_entries(&args, store, ctx)?;
    println!("{}", formatter.format_entries(&entries)?);
    Ok(())
}

/// Page through check-ins, newest first.
fn list_entries(args: &ListArgs, store: &SqliteStore, ctx: &RequestContext) -> Result<Vec<Entry>> {
    let entries = if args.exclude_demo {
        store.list_entries_without_tag(ctx, DEMO_TAG, args.limit, args.offset)?
    } else {
        store.list_entries(ctx, args.limit, args.offset)?
    };
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use faithloop_domain::{Mood, NewEntry, UserId};

    #[test]
    fn test_exclude_demo() {
        let store = SqliteStore::in_memory().unwrap();
        let ctx = RequestContext::new(UserId::new());
        store
            .insert_entry(&ctx, NewEntry::new("mine", Mood::Good))
            .unwrap();
        store
            .insert_entry(
                &ctx,
                NewEntry::new("synthetic", Mood::Good).with_tags([DEMO_TAG]),
            )
            .unwrap();

        let all = ListArgs {
            limit: 10,
            offset: 0,
            exclude_demo: false,
        };
        assert_eq!(list_entries(&all, &store, &ctx).unwrap().len(), 2);

        let own = ListArgs {
            exclude_demo: true,
            ..all
        };
        let entries = list_entries(&own, &store, &ctx).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "mine");
    }

    #[test]
    fn test_exclude_demo_fills_page() {
        let store = SqliteStore::in_memory().unwrap();
        let ctx = RequestContext::new(UserId::new());
        store
            .insert_entry(
                &ctx,
                NewEntry::new("mine", Mood::Good).with_created_at(ctx.now - Duration::days(3)),
            )
            .unwrap();
        for day in 0..2 {
            store
                .insert_entry(
                    &ctx,
                    NewEntry::new("synthetic", Mood::Good)
                        .with_tags([DEMO_TAG])
                        .with_created_at(ctx.now - Duration::days(day)),
                )
                .unwrap();
        }

        let args = ListArgs {
            limit: 1,
            offset: 0,
            exclude_demo: true,
        };
        let entries = list_entries(&args, &store, &ctx).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "mine");
    }
}
