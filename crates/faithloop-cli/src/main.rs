//! FaithLoop CLI - record check-ins and generate weekly reports.

use clap::Parser;
use faithloop_cli::commands;
use faithloop_cli::{logging, Cli, Command, Config, Formatter};
use faithloop_domain::RequestContext;
use faithloop_llm::OllamaProvider;
use faithloop_store::SqliteStore;
use std::fs;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> faithloop_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Load or create config
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_or_create(&config_path)?;

    // Determine output format and color
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &formatter),
        Command::Checkin(args) => {
            let (store, ctx) = open_store(&config)?;
            commands::execute_checkin(args, &store, &ctx, &formatter)
        }
        Command::List(args) => {
            let (store, ctx) = open_store(&config)?;
            commands::execute_list(args, &store, &ctx, &formatter)
        }
        Command::Report(args) => {
            let (store, ctx) = open_store(&config)?;
            let provider = OllamaProvider::from_config(&config.llm);
            commands::execute_report(args, &store, &ctx, provider, &config.report, &formatter)
        }
        Command::Demo(args) => {
            let (store, ctx) = open_store(&config)?;
            commands::execute_demo(args, &store, &ctx, &config.seed, &formatter)
        }
    }
}

/// Open the configured database and build the request context.
fn open_store(config: &Config) -> faithloop_cli::Result<(SqliteStore, RequestContext)> {
    let db_path = config.store_path()?;
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::new(&db_path)?;
    let ctx = RequestContext::new(config.user_id()?);
    Ok((store, ctx))
}
