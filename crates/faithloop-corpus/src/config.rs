//! Configuration for demo seeding

use crate::demo_content::DEMO_DAYS;
use serde::{Deserialize, Serialize};

/// Options for [`CorpusManager::seed`](crate::CorpusManager::seed)
///
/// # Examples
///
/// ```
/// use faithloop_corpus::SeedConfig;
///
/// let config = SeedConfig::default();
/// assert_eq!(config.days, 7);
/// assert!(config.also_index);
///
/// let quick = SeedConfig::with_days(3).overwriting();
/// assert!(quick.overwrite);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of days to generate (at most one per canned item)
    pub days: usize,

    /// Purge existing demo data before seeding
    pub overwrite: bool,

    /// Write chunks and embeddings for each seeded item
    pub also_index: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            days: DEMO_DAYS,
            overwrite: false,
            also_index: true,
        }
    }
}

impl SeedConfig {
    /// Default options with a custom day count
    pub fn with_days(days: usize) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    /// Purge before seeding
    pub fn overwriting(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Skip indexing
    pub fn without_index(mut self) -> Self {
        self.also_index = false;
        self
    }

    /// Number of items a seed with this config produces
    pub fn item_count(&self) -> usize {
        self.days.min(DEMO_DAYS)
    }

    /// Validate the configuration
    ///
    /// Every day count is usable: zero seeds nothing and counts past the
    /// canned table are clamped by [`item_count`](Self::item_count).
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SeedConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_days_is_valid() {
        let config = SeedConfig::with_days(0);
        assert!(config.validate().is_ok());
        assert_eq!(config.item_count(), 0);
    }

    #[test]
    fn test_item_count_clamped() {
        assert_eq!(SeedConfig::with_days(3).item_count(), 3);
        assert_eq!(SeedConfig::with_days(30).item_count(), DEMO_DAYS);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SeedConfig::from_toml("days = 4").unwrap();
        assert_eq!(config.days, 4);
        assert!(!config.overwrite);
        assert!(config.also_index);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SeedConfig::with_days(5).overwriting().without_index();
        let parsed = SeedConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
