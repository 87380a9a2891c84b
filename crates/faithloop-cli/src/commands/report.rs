//! Report command implementation.

use crate::cli::ReportArgs;
use crate::error::Result;
use crate::output::Formatter;
use faithloop_domain::{CompletionProvider, RequestContext};
use faithloop_llm::OllamaProvider;
use faithloop_report::{ReportBuilder, ReportConfig, ReportError, ReportRange, WeeklyReporter};
use faithloop_store::SqliteStore;
use std::fmt::Display;

/// Execute the report command against the configured Ollama endpoint.
pub fn execute_report(
    args: ReportArgs,
    store: &SqliteStore,
    ctx: &RequestContext,
    provider: OllamaProvider,
    config: &ReportConfig,
    formatter: &Formatter,
) -> Result<()> {
    run_report(args, store, ctx, provider, config, formatter)
}

/// Resolve the range, build the report, and print it.
///
/// An empty range is reported as a warning, not an error.
pub fn run_report<P>(
    args: ReportArgs,
    store: &SqliteStore,
    ctx: &RequestContext,
    provider: P,
    config: &ReportConfig,
    formatter: &Formatter,
) -> Result<()>
where
    P: CompletionProvider,
    P::Error: Display,
{
    let range = resolve_range(&args, ctx)?;
    let exclude_demo = config.exclude_demo && !args.include_demo;

    let builder = ReportBuilder::new(provider, config.clone())?;
    let mut reporter = WeeklyReporter::new(store, builder);

    match reporter.report_with(ctx, range, exclude_demo) {
        Ok(cached) => {
            println!("{}", formatter.format_report(&cached)?);
            Ok(())
        }
        Err(ReportError::NoEntries { start, end }) => {
            println!(
                "{}",
                formatter.warning(&format!("No check-ins between {} and {}", start, end))
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Explicit dates win over the week preset.
fn resolve_range(args: &ReportArgs, ctx: &RequestContext) -> Result<ReportRange> {
    match (args.start, args.end) {
        (Some(start), Some(end)) => Ok(ReportRange::new(start, end)?),
        _ => Ok(ReportRange::preset(args.week.into(), ctx.today())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::WeekArg;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use chrono::{NaiveDate, TimeZone, Utc};
    use faithloop_domain::{JournalStore, Mood, NewEntry, UserId};
    use faithloop_llm::MockProvider;
    use serde_json::json;

    fn ctx() -> RequestContext {
        RequestContext::at(UserId::new(), Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap())
    }

    fn args(week: WeekArg) -> ReportArgs {
        ReportArgs {
            week,
            start: None,
            end: None,
            include_demo: false,
        }
    }

    fn narrative() -> serde_json::Value {
        json!({
            "summary": "감사가 이어진 한 주",
            "wins": ["새벽기도"],
            "issues": [],
            "patterns": [],
            "next_experiments": ["취침 시간 앞당기기"]
        })
    }

    #[test]
    fn test_resolve_range_preset() {
        let range = resolve_range(&args(WeekArg::This), &ctx()).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn test_resolve_range_rejects_reversed_dates() {
        let mut reversed = args(WeekArg::This);
        reversed.start = NaiveDate::from_ymd_opt(2026, 10, 18);
        reversed.end = NaiveDate::from_ymd_opt(2026, 10, 12);
        assert!(matches!(
            resolve_range(&reversed, &ctx()),
            Err(CliError::Report(ReportError::InvalidRange(_)))
        ));
    }

    #[test]
    fn test_empty_range_is_not_an_error() {
        let store = SqliteStore::in_memory().unwrap();
        let provider = MockProvider::new(narrative());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = run_report(
            args(WeekArg::Last),
            &store,
            &ctx(),
            provider.clone(),
            &ReportConfig::default(),
            &formatter,
        );
        assert!(result.is_ok());
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_report_over_stored_entries() {
        let store = SqliteStore::in_memory().unwrap();
        let ctx = ctx();
        store
            .insert_entry(&ctx, NewEntry::new("- 새벽기도", Mood::Great))
            .unwrap();
        let provider = MockProvider::new(narrative());
        let formatter = Formatter::new(OutputFormat::Json, false);

        run_report(
            args(WeekArg::This),
            &store,
            &ctx,
            provider.clone(),
            &ReportConfig::default(),
            &formatter,
        )
        .unwrap();
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_unavailable_provider_is_an_error() {
        let store = SqliteStore::in_memory().unwrap();
        let ctx = ctx();
        store
            .insert_entry(&ctx, NewEntry::new("평범한 하루", Mood::Neutral))
            .unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = run_report(
            args(WeekArg::This),
            &store,
            &ctx,
            MockProvider::unavailable(),
            &ReportConfig::default(),
            &formatter,
        );
        assert!(matches!(result, Err(CliError::Report(ReportError::Completion(_)))));
    }
}
