//! Configuration management for the CLI.
//!
//! One TOML file (`~/.faithloop/config.toml` unless `--config` says
//! otherwise) holds a section per library crate plus the CLI's own
//! display settings. The file is written with defaults on first run so the
//! generated user id stays stable across invocations.

use crate::error::{CliError, Result};
use faithloop_corpus::SeedConfig;
use faithloop_domain::UserId;
use faithloop_llm::OllamaConfig;
use faithloop_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".faithloop";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "faithloop.db";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database location
    #[serde(default)]
    pub store: StoreSection,

    /// Who check-ins belong to
    #[serde(default)]
    pub user: UserSection,

    /// Completion provider
    #[serde(default)]
    pub llm: OllamaConfig,

    /// Weekly report generation
    #[serde(default)]
    pub report: ReportConfig,

    /// Demo seeding defaults
    #[serde(default)]
    pub seed: SeedConfig,

    /// Display settings
    #[serde(default)]
    pub settings: Settings,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// SQLite file; defaults to `~/.faithloop/faithloop.db`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `[user]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSection {
    /// User id (UUID)
    pub id: String,
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            id: UserId::new().to_string(),
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(app_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from `path`, writing defaults there on first run.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let config = Self::load_from(path)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default configuration at {}", path.display());
            Ok(config)
        }
    }

    /// Load configuration from an existing file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.user_id()?;
        self.llm
            .validate()
            .map_err(|e| CliError::Config(format!("[llm] {}", e)))?;
        self.report
            .validate()
            .map_err(|e| CliError::Config(format!("[report] {}", e)))?;
        self.seed
            .validate()
            .map_err(|e| CliError::Config(format!("[seed] {}", e)))?;
        Ok(())
    }

    /// The configured user.
    pub fn user_id(&self) -> Result<UserId> {
        UserId::from_string(&self.user.id).map_err(|e| CliError::Config(format!("[user] {}", e)))
    }

    /// Database file, resolving the default location.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir()?.join(DATABASE_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            user: UserSection::default(),
            llm: OllamaConfig::default(),
            report: ReportConfig::default(),
            seed: SeedConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(APP_DIR))
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
