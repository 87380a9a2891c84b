//! Line rules and the rule extractor

use crate::config::RuleConfig;
use crate::error::ExtractorError;
use faithloop_domain::{ExtractionFields, Extractor};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default obstacle keywords (Korean first, then English)
pub const OBSTACLE_KEYWORDS: &[&str] = &[
    "문제",
    "어려움",
    "힘들",
    "막혀",
    "안됨",
    "실패",
    "오류",
    "버그",
    "problem",
    "difficulty",
    "hard",
    "struggling",
    "blocked",
    "failed",
    "error",
    "bug",
];

/// Default insight keywords
pub const INSIGHT_KEYWORDS: &[&str] = &[
    "💡",
    "인사이트",
    "배움",
    "깨달음",
    "발견",
    "아이디어",
    "insight",
    "learning",
    "realization",
    "discovery",
    "idea",
];

/// Default project pattern: `#` followed by Unicode word characters
static PROJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

static DEFAULT_EXTRACTOR: LazyLock<RuleExtractor> = LazyLock::new(RuleExtractor::default);

/// Extract fields from `content` with the default rules
///
/// Pure and total: the same input always yields the same output and no input
/// panics.
pub fn extract(content: &str) -> ExtractionFields {
    DEFAULT_EXTRACTOR.extract(content)
}

/// Keyword/prefix based extractor
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    bullet_markers: Vec<char>,
    obstacle_keywords: Vec<String>,
    insight_keywords: Vec<String>,
    project_pattern: Regex,
}

impl RuleExtractor {
    /// Build an extractor from a validated configuration
    pub fn new(config: RuleConfig) -> Result<Self, ExtractorError> {
        if let Err(e) = config.validate() {
            warn!("Rejected rule config: {}", e);
            return Err(ExtractorError::InvalidConfig(e));
        }
        let project_pattern = Regex::new(&config.project_pattern)?;
        if project_pattern.captures_len() < 2 {
            warn!("Rejected project pattern without a capture group");
            return Err(ExtractorError::InvalidConfig(
                "project_pattern needs a capture group".to_string(),
            ));
        }
        debug!(
            "Rule extractor ready: {} obstacle keywords, {} insight keywords",
            config.obstacle_keywords.len(),
            config.insight_keywords.len()
        );

        Ok(Self {
            bullet_markers: config.bullet_markers,
            obstacle_keywords: config
                .obstacle_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            insight_keywords: config
                .insight_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            project_pattern,
        })
    }

    /// Run every rule over every non-blank line
    pub fn extract(&self, content: &str) -> ExtractionFields {
        let mut fields = ExtractionFields::default();

        for raw in content.split('\n') {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let lowered = line.to_lowercase();

            if let Some(task) = self.task_text(line) {
                fields.tasks.push(task.to_string());
            }

            if let Some(obstacle) = self.obstacle_text(line, &lowered) {
                push_unique(&mut fields.obstacles, obstacle);
            }

            for caps in self.project_pattern.captures_iter(line) {
                if let Some(name) = caps.get(1) {
                    push_unique(&mut fields.projects, name.as_str());
                }
            }

            if self.is_insight(&lowered) {
                push_unique(&mut fields.insights, line);
            }
        }

        fields
    }

    fn task_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        let first = line.chars().next()?;
        if !self.bullet_markers.contains(&first) {
            return None;
        }
        let text = line
            .trim_start_matches(|c: char| c == ' ' || self.bullet_markers.contains(&c))
            .trim();
        (!text.is_empty()).then_some(text)
    }

    fn obstacle_text<'a>(&self, line: &'a str, lowered: &str) -> Option<&'a str> {
        let flagged = line.starts_with('!')
            || self
                .obstacle_keywords
                .iter()
                .any(|k| lowered.contains(k.as_str()));
        if !flagged {
            return None;
        }
        let text = line.trim_start_matches(['!', ' ']).trim();
        (!text.is_empty()).then_some(text)
    }

    fn is_insight(&self, lowered: &str) -> bool {
        self.insight_keywords
            .iter()
            .any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for RuleExtractor {
    fn default() -> Self {
        let config = RuleConfig::default();
        Self {
            bullet_markers: config.bullet_markers,
            obstacle_keywords: config.obstacle_keywords,
            insight_keywords: config.insight_keywords,
            project_pattern: PROJECT_PATTERN.clone(),
        }
    }
}

impl Extractor for RuleExtractor {
    fn extract(&self, text: &str) -> ExtractionFields {
        RuleExtractor::extract(self, text)
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
