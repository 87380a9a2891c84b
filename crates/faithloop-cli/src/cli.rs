//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use faithloop_domain::Mood;
use faithloop_report::WeekPreset;
use std::path::PathBuf;

/// FaithLoop - record check-ins and reflect on them weekly.
#[derive(Debug, Parser)]
#[command(name = "faithloop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FAITHLOOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a check-in
    Checkin(CheckinArgs),

    /// List recent check-ins
    List(ListArgs),

    /// Run the rule extractor on text without saving anything
    Extract(ExtractArgs),

    /// Generate a weekly report
    Report(ReportArgs),

    /// Seed or purge demo data
    Demo(DemoArgs),
}

/// Arguments for the checkin command.
#[derive(Debug, Parser)]
pub struct CheckinArgs {
    /// Check-in text
    #[arg(required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the check-in text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Mood of the day
    #[arg(short, long, value_enum, default_value = "neutral")]
    pub mood: MoodArg,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Skip writing chunks and embeddings
    #[arg(long)]
    pub no_index: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Maximum number of check-ins
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Number of newest check-ins to skip
    #[arg(short, long, default_value = "0")]
    pub offset: usize,

    /// Hide demo check-ins
    #[arg(long)]
    pub exclude_demo: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text to extract from
    #[arg(required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Week to report on
    #[arg(short, long, value_enum, default_value = "this")]
    pub week: WeekArg,

    /// First day of an explicit range (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of an explicit range (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Include demo check-ins
    #[arg(long)]
    pub include_demo: bool,
}

/// Arguments for demo data management.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    #[command(subcommand)]
    pub action: DemoAction,
}

/// Demo data actions.
#[derive(Debug, Subcommand)]
pub enum DemoAction {
    /// Insert a week of demo check-ins
    Seed {
        /// Number of days (at most 7)
        #[arg(short, long)]
        days: Option<usize>,

        /// Purge existing demo data first
        #[arg(long)]
        overwrite: bool,

        /// Skip writing chunks and embeddings
        #[arg(long)]
        no_index: bool,
    },

    /// Delete all demo check-ins and their derived data
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Mood argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MoodArg {
    /// Peaceful, grateful day
    Great,
    /// A good day
    Good,
    /// Ordinary day
    Neutral,
    /// Busy or discouraged day
    Bad,
    /// A hard day
    Terrible,
}

/// Week argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum WeekArg {
    /// This week (Monday to Sunday)
    This,
    /// Last week
    Last,
    /// The two weeks before this one
    LastTwo,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<MoodArg> for Mood {
    fn from(mood: MoodArg) -> Self {
        match mood {
            MoodArg::Great => Mood::Great,
            MoodArg::Good => Mood::Good,
            MoodArg::Neutral => Mood::Neutral,
            MoodArg::Bad => Mood::Bad,
            MoodArg::Terrible => Mood::Terrible,
        }
    }
}

impl From<WeekArg> for WeekPreset {
    fn from(week: WeekArg) -> Self {
        match week {
            WeekArg::This => WeekPreset::This,
            WeekArg::Last => WeekPreset::Last,
            WeekArg::LastTwo => WeekPreset::LastTwo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkin_command() {
        let cli = Cli::parse_from([
            "faithloop",
            "checkin",
            "--mood",
            "great",
            "--tag",
            "감사",
            "-t",
            "기도",
            "- 새벽기도",
        ]);
        match cli.command {
            Command::Checkin(args) => {
                assert_eq!(args.text.as_deref(), Some("- 새벽기도"));
                assert_eq!(args.tags, vec!["감사", "기도"]);
                assert_eq!(Mood::from(args.mood), Mood::Great);
            }
            _ => panic!("Expected Checkin command"),
        }
    }

    #[test]
    fn test_checkin_requires_text_or_file() {
        assert!(Cli::try_parse_from(["faithloop", "checkin"]).is_err());
        assert!(Cli::try_parse_from(["faithloop", "checkin", "--file", "day.md"]).is_ok());
    }

    #[test]
    fn test_report_week_values() {
        let cli = Cli::parse_from(["faithloop", "report", "--week", "last-two"]);
        match cli.command {
            Command::Report(args) => {
                assert!(matches!(WeekPreset::from(args.week), WeekPreset::LastTwo));
                assert!(!args.include_demo);
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_report_explicit_range_needs_both_ends() {
        assert!(Cli::try_parse_from(["faithloop", "report", "--start", "2026-10-12"]).is_err());
        let cli = Cli::parse_from([
            "faithloop",
            "report",
            "--start",
            "2026-10-12",
            "--end",
            "2026-10-18",
        ]);
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2026, 10, 12));
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_demo_seed_flags() {
        let cli = Cli::parse_from(["faithloop", "-vv", "demo", "seed", "--days", "3", "--overwrite"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Demo(DemoArgs {
                action: DemoAction::Seed {
                    days,
                    overwrite,
                    no_index,
                },
            }) => {
                assert_eq!(days, Some(3));
                assert!(overwrite);
                assert!(!no_index);
            }
            _ => panic!("Expected demo seed"),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["faithloop", "list", "--format", "json", "--exclude-demo"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
