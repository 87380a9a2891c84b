//! Configuration for weekly report generation

use serde::{Deserialize, Serialize};

/// Configuration for the report builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum entry summaries included in the prompt
    pub max_entries: usize,

    /// Characters of each entry's content quoted in the prompt
    pub content_preview_chars: usize,

    /// Tasks listed in the prompt (the count in stats is not capped)
    pub task_prompt_limit: usize,

    /// Obstacles listed in the prompt
    pub obstacle_prompt_limit: usize,

    /// Sampling temperature for the completion
    pub temperature: f32,

    /// Leave demo-tagged entries out of reports
    pub exclude_demo: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_entries: 50,
            content_preview_chars: 300,
            task_prompt_limit: 10,
            obstacle_prompt_limit: 5,
            temperature: 0.7,
            exclude_demo: true,
        }
    }
}

impl ReportConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("max_entries must be greater than 0".to_string());
        }
        if self.content_preview_chars == 0 {
            return Err("content_preview_chars must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be within [0.0, 2.0], got {}",
                self.temperature
            ));
        }
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
