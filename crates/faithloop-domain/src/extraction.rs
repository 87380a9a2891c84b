//! Extraction module - structured fields derived from an entry's text

use crate::context::UserId;
use crate::entry::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of record an extraction was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// A journal check-in
    Checkin,
    /// An uploaded artifact
    Artifact,
    /// A calendar event
    Calendar,
}

impl SourceType {
    /// Get the source type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Checkin => "checkin",
            SourceType::Artifact => "artifact",
            SourceType::Calendar => "calendar",
        }
    }

    /// Parse a source type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "checkin" => Some(SourceType::Checkin),
            "artifact" => Some(SourceType::Artifact),
            "calendar" => Some(SourceType::Calendar),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which extractor produced the fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionType {
    /// Rule extractor run on a user-authored entry
    RuleBased,
    /// Rule extractor run on a synthetic demo entry
    DemoRule,
    /// Model-backed extractor
    LlmExtractor,
}

impl ExtractionType {
    /// Get the extraction type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionType::RuleBased => "rule_based",
            ExtractionType::DemoRule => "demo_rule",
            ExtractionType::LlmExtractor => "llm_extractor",
        }
    }

    /// Parse an extraction type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rule_based" => Some(ExtractionType::RuleBased),
            "demo_rule" => Some(ExtractionType::DemoRule),
            "llm_extractor" => Some(ExtractionType::LlmExtractor),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed extraction payload
///
/// Serializes to an object with exactly six keys. Every field is an ordered
/// sequence in order of first occurrence in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionFields {
    /// Bulleted action lines
    pub tasks: Vec<String>,
    /// Lines describing problems or blockers
    pub obstacles: Vec<String>,
    /// `#hashtag` references
    pub projects: Vec<String>,
    /// Lines recording a learning or idea
    pub insights: Vec<String>,
    /// Reserved, always empty for rule extraction
    pub people: Vec<String>,
    /// Reserved, always empty for rule extraction
    pub emotions: Vec<String>,
}

impl ExtractionFields {
    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
            && self.obstacles.is_empty()
            && self.projects.is_empty()
            && self.insights.is_empty()
            && self.people.is_empty()
            && self.emotions.is_empty()
    }

    /// One-line human summary, used as indexable text for the extraction
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.tasks.is_empty() {
            parts.push(format!("tasks: {}", self.tasks.join("; ")));
        }
        if !self.obstacles.is_empty() {
            parts.push(format!("obstacles: {}", self.obstacles.join("; ")));
        }
        if !self.projects.is_empty() {
            parts.push(format!("projects: {}", self.projects.join(", ")));
        }
        if !self.insights.is_empty() {
            parts.push(format!("insights: {}", self.insights.join("; ")));
        }
        parts.join(" | ")
    }
}

/// A persisted extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Row identifier
    pub id: uuid::Uuid,
    /// Owning user
    pub user_id: UserId,
    /// Kind of the source record
    pub source_type: SourceType,
    /// Identifier of the source record
    pub source_id: EntryId,
    /// Producing extractor
    pub extraction_type: ExtractionType,
    /// Extracted payload
    pub fields: ExtractionFields,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// An extraction that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewExtraction {
    /// Kind of the source record
    pub source_type: SourceType,
    /// Identifier of the source record
    pub source_id: EntryId,
    /// Producing extractor
    pub extraction_type: ExtractionType,
    /// Extracted payload
    pub fields: ExtractionFields,
}

impl NewExtraction {
    /// Extraction derived from a check-in
    pub fn for_checkin(
        source_id: EntryId,
        extraction_type: ExtractionType,
        fields: ExtractionFields,
    ) -> Self {
        Self {
            source_type: SourceType::Checkin,
            source_id,
            extraction_type,
            fields,
        }
    }
}
