//! Prompt construction for weekly reports

use crate::config::ReportConfig;
use faithloop_domain::{ChatMessage, Entry};

/// System prompt framing the model as a faith-growth coach
pub const SYSTEM_PROMPT: &str = "당신은 신앙 성장 코치입니다.
한 주간의 신앙 기록(감사/기도/말씀/적용/방해요인)을 분석하여 의미 있는 성장 리포트를 생성합니다.

분석 원칙:
1. 감사 기록에서 하이라이트를 찾아 wins에 기록
2. 반복되는 방해요인(분주함/유혹/감정)을 issues에 기록
3. 결단/적용이 실제로 지켜졌는지를 patterns에 기록
4. 다음 주 작은 실천(말씀묵상/기도/공동체)을 next_experiments에 제안

말투: 따뜻하고 격려하며, 기록 근거를 제시";

/// Marker used when a list is empty
pub const NONE_MARKER: &str = "없음";

/// `[YYYY-MM-DD] 기분:<mood>` header plus a content preview
pub fn entry_summary(entry: &Entry, preview_chars: usize) -> String {
    let preview: String = entry.content.chars().take(preview_chars).collect();
    format!(
        "[{}] 기분:{}\n{}",
        entry.created_at.format("%Y-%m-%d"),
        entry.mood,
        preview
    )
}

fn capped_list(items: &[&str], limit: usize) -> String {
    if items.is_empty() {
        NONE_MARKER.to_string()
    } else {
        items
            .iter()
            .take(limit)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build the system and user messages for one report
pub fn build_messages(
    entries: &[Entry],
    tasks: &[&str],
    obstacles: &[&str],
    config: &ReportConfig,
) -> Vec<ChatMessage> {
    let combined = entries
        .iter()
        .take(config.max_entries)
        .map(|e| entry_summary(e, config.content_preview_chars))
        .collect::<Vec<_>>()
        .join("\n---\n");

    let user = format!(
        "이번 주 체크인 기록을 분석해주세요:\n\n{}\n\n추출된 할 일: {}\n추출된 어려움: {}\n",
        combined,
        capped_list(tasks, config.task_prompt_limit),
        capped_list(obstacles, config.obstacle_prompt_limit),
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use faithloop_domain::{EntryId, Mood, Role, UserId};

    fn entry(content: &str) -> Entry {
        Entry {
            id: EntryId::new(),
            user_id: UserId::new(),
            content: content.to_string(),
            mood: Mood::Good,
            tags: vec![],
            metadata: serde_json::json!({}),
            created_at: Utc.with_ymd_and_hms(2026, 10, 13, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_entry_summary_header() {
        let summary = entry_summary(&entry("감사"), 300);
        assert_eq!(summary, "[2026-10-13] 기분:good\n감사");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let long = "가".repeat(400);
        let summary = entry_summary(&entry(&long), 300);
        let body = summary.split('\n').nth(1).unwrap();
        assert_eq!(body.chars().count(), 300);
    }

    #[test]
    fn test_lists_capped_and_none_marker() {
        let tasks: Vec<String> = (0..12).map(|i| format!("t{}", i)).collect();
        let task_refs: Vec<&str> = tasks.iter().map(String::as_str).collect();
        let messages = build_messages(&[entry("x")], &task_refs, &[], &ReportConfig::default());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        let user = &messages[1].content;
        assert!(user.contains("추출된 할 일: t0, t1, t2, t3, t4, t5, t6, t7, t8, t9\n"));
        assert!(user.contains("추출된 어려움: 없음"));
    }

    #[test]
    fn test_max_entries_respected() {
        let config = ReportConfig {
            max_entries: 2,
            ..Default::default()
        };
        let entries = vec![entry("a"), entry("b"), entry("c")];
        let messages = build_messages(&entries, &[], &[], &config);
        assert_eq!(messages[1].content.matches("기분:").count(), 2);
    }
}
