//! Demo data command implementation.

use crate::cli::{DemoAction, DemoArgs};
use crate::error::Result;
use crate::output::Formatter;
use faithloop_corpus::{CorpusManager, SeedConfig};
use faithloop_domain::RequestContext;
use faithloop_store::SqliteStore;
use std::io::{self, Write};

/// Execute a demo subcommand.
pub fn execute_demo(
    args: DemoArgs,
    store: &SqliteStore,
    ctx: &RequestContext,
    defaults: &SeedConfig,
    formatter: &Formatter,
) -> Result<()> {
    let manager = CorpusManager::new(store, store);

    match args.action {
        DemoAction::Seed {
            days,
            overwrite,
            no_index,
        } => {
            let config = seed_config(defaults, days, overwrite, no_index);
            let outcome = manager.seed(ctx, &config)?;
            println!("{}", formatter.format_seed(&outcome)?);
        }
        DemoAction::Purge { yes } => {
            if !yes && !confirm("Delete all demo check-ins and their derived data?")? {
                println!("{}", formatter.info("Operation cancelled"));
                return Ok(());
            }
            let outcome = manager.purge(ctx);
            println!("{}", formatter.format_purge(&outcome)?);
        }
    }

    Ok(())
}

/// Command-line flags layered over the `[seed]` config section.
fn seed_config(
    defaults: &SeedConfig,
    days: Option<usize>,
    overwrite: bool,
    no_index: bool,
) -> SeedConfig {
    SeedConfig {
        days: days.unwrap_or(defaults.days),
        overwrite: overwrite || defaults.overwrite,
        also_index: defaults.also_index && !no_index,
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
