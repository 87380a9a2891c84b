//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use faithloop_corpus::{CheckinOutcome, PurgeOutcome, SeedOutcome};
use faithloop_domain::{Entry, ExtractionFields, Mood};
use faithloop_report::CachedReport;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const PREVIEW_CHARS: usize = 40;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of check-ins.
    pub fn format_entries(&self, entries: &[Entry]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(&entries);
        }
        if entries.is_empty() {
            return Ok(self.colorize("No check-ins found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Date", "Mood", "Tags", "Content"]);

        for entry in entries {
            let id = entry.id.to_string();
            builder.push_record([
                id[..8].to_string(), // Truncate ID for readability
                entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
                mood_label(entry.mood).to_string(),
                entry.tags.join(", "),
                preview(&entry.content, PREVIEW_CHARS),
            ]);
        }

        Ok(table(builder))
    }

    /// Format extracted fields.
    pub fn format_fields(&self, fields: &ExtractionFields) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(fields);
        }
        if fields.is_empty() {
            return Ok(self.colorize("Nothing extracted.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Values"]);
        for (name, values) in [
            ("tasks", &fields.tasks),
            ("obstacles", &fields.obstacles),
            ("projects", &fields.projects),
            ("insights", &fields.insights),
        ] {
            if !values.is_empty() {
                builder.push_record([name.to_string(), values.join("\n")]);
            }
        }
        Ok(table(builder))
    }

    /// Format the result of recording a check-in.
    pub fn format_checkin(&self, outcome: &CheckinOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(outcome);
        }

        let mut lines = vec![self.success(&format!(
            "Check-in saved: {} ({})",
            outcome.entry.id,
            mood_label(outcome.entry.mood)
        ))];
        if let Some(extraction) = &outcome.extraction {
            let summary = extraction.fields.summary();
            if !summary.is_empty() {
                lines.push(self.info(&summary));
            }
        }
        for error in &outcome.errors {
            lines.push(self.warning(error));
        }
        Ok(lines.join("\n"))
    }

    /// Format a weekly report.
    pub fn format_report(&self, cached: &CachedReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(&cached.report);
        }

        let report = &cached.report;
        let stats = &report.stats;
        let mut out = vec![
            self.colorize(&format!("주간 리포트 ({})", cached.range), "cyan"),
            String::new(),
            report.summary.clone(),
            String::new(),
            format!(
                "체크인 {}회 · 할 일 {}개 · 방해요인 {}개",
                stats.total_checkins, stats.total_tasks, stats.total_obstacles
            ),
        ];
        if let Some(analysis) = &report.mood_analysis {
            out.push(format!(
                "평균 컨디션: {} ({:.2})",
                mood_label(analysis.average),
                analysis.average_score
            ));
        }

        let mut moods = Builder::default();
        moods.push_record(Mood::ALL.iter().map(|m| mood_label(*m).to_string()));
        moods.push_record(
            Mood::ALL
                .iter()
                .map(|m| stats.mood_distribution.count(*m).to_string()),
        );
        out.push(table(moods));

        for (title, items) in [
            ("감사 하이라이트", &report.wins),
            ("방해요인", &report.issues),
            ("적용/결단", &report.patterns),
            ("다음 주 실천", &report.next_experiments),
        ] {
            out.push(String::new());
            out.push(self.colorize(title, "magenta"));
            if items.is_empty() {
                out.push("  -".to_string());
            }
            for item in items {
                out.push(format!("  • {}", item));
            }
        }

        Ok(out.join("\n"))
    }

    /// Format a seed outcome.
    pub fn format_seed(&self, outcome: &SeedOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(outcome);
        }
        let headline = format!(
            "Seeded {} demo check-in(s), {} extraction(s), {} indexed",
            outcome.inserted_checkins, outcome.inserted_extractions, outcome.indexed
        );
        let mut lines = vec![self.success(&headline)];
        if outcome.deleted_demo_checkins > 0 {
            lines.push(self.info(&format!(
                "Replaced {} existing demo check-in(s)",
                outcome.deleted_demo_checkins
            )));
        }
        for error in &outcome.errors {
            lines.push(self.warning(error));
        }
        Ok(lines.join("\n"))
    }

    /// Format a purge outcome.
    pub fn format_purge(&self, outcome: &PurgeOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(outcome);
        }
        if outcome.total_deleted() == 0 && outcome.errors.is_empty() {
            return Ok(self.info("No demo data to delete"));
        }
        let mut lines = vec![self.success(&format!(
            "Deleted {} demo check-in(s), {} extraction(s), {} embedding(s), {} chunk(s)",
            outcome.deleted_checkins,
            outcome.deleted_extractions,
            outcome.deleted_embeddings,
            outcome.deleted_chunks
        ))];
        for error in &outcome.errors {
            lines.push(self.warning(error));
        }
        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Korean display label for a mood.
pub fn mood_label(mood: Mood) -> &'static str {
    match mood {
        Mood::Great => "🙏 평안/감사",
        Mood::Good => "✨ 은혜로움",
        Mood::Neutral => "📖 보통",
        Mood::Bad => "🌧️ 분주/낙심",
        Mood::Terrible => "😢 힘든 하루",
    }
}

/// First line of `content`, cut to `max_chars` characters.
fn preview(content: &str, max_chars: usize) -> String {
    let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    let mut out: String = first_line.chars().take(max_chars).collect();
    if first_line.chars().count() > max_chars || content.trim().lines().count() > 1 {
        out.push('…');
    }
    out
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
