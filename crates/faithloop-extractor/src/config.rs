//! Configuration for the rule extractor

use crate::rules::{INSIGHT_KEYWORDS, OBSTACLE_KEYWORDS};
use serde::{Deserialize, Serialize};

/// Keyword and marker tables driving the rules
///
/// The defaults are heuristics: they are knowingly incomplete and are kept
/// as-is rather than tuned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Characters that mark a task line when they lead it
    pub bullet_markers: Vec<char>,

    /// Substrings marking a line as an obstacle (matched lower-cased)
    pub obstacle_keywords: Vec<String>,

    /// Substrings marking a line as an insight
    pub insight_keywords: Vec<String>,

    /// Pattern whose first capture group is a project name
    pub project_pattern: String,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            bullet_markers: vec!['-', '•', '*'],
            obstacle_keywords: OBSTACLE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            insight_keywords: INSIGHT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            project_pattern: r"#(\w+)".to_string(),
        }
    }
}

impl RuleConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.bullet_markers.is_empty() {
            return Err("bullet_markers must not be empty".to_string());
        }
        if self.bullet_markers.iter().any(|c| c.is_whitespace()) {
            return Err("bullet_markers must not contain whitespace".to_string());
        }
        if self.obstacle_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("obstacle_keywords must not contain blank entries".to_string());
        }
        if self.insight_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("insight_keywords must not contain blank entries".to_string());
        }
        if self.project_pattern.is_empty() {
            return Err("project_pattern must not be empty".to_string());
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
