//! Report schema and the narrative payload it constrains

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Keys the completion must return, in schema order
pub const REQUIRED_KEYS: [&str; 5] = ["summary", "wins", "issues", "patterns", "next_experiments"];

/// The model-generated part of a weekly report
///
/// Conventional caps (5 wins, 5 issues, 3 patterns, 3 experiments) are asked
/// for in the schema descriptions but not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Narrative {
    /// Core theme of the week
    pub summary: String,
    /// Gratitude highlights
    pub wins: Vec<String>,
    /// Recurring hindrances
    pub issues: Vec<String>,
    /// Progress on resolutions and applications
    pub patterns: Vec<String>,
    /// Small practices suggested for next week
    pub next_experiments: Vec<String>,
}

impl Narrative {
    /// Validate a completion against the schema
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// JSON schema sent with the completion request
pub fn report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "이번 주 핵심 주제"
            },
            "wins": {
                "type": "array",
                "items": {"type": "string"},
                "description": "감사 하이라이트 (최대 5개)"
            },
            "issues": {
                "type": "array",
                "items": {"type": "string"},
                "description": "반복 방해요인(패턴) (최대 5개)"
            },
            "patterns": {
                "type": "array",
                "items": {"type": "string"},
                "description": "결단/적용 진행 상황 (최대 3개)"
            },
            "next_experiments": {
                "type": "array",
                "items": {"type": "string"},
                "description": "다음 주 작은 실천 3가지"
            }
        },
        "required": REQUIRED_KEYS,
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Value {
        json!({
            "summary": "평안을 회복한 한 주",
            "wins": ["주일 예배"],
            "issues": [],
            "patterns": ["저녁 묵상"],
            "next_experiments": ["감사 1가지 기록"]
        })
    }

    #[test]
    fn test_schema_shape() {
        let schema = report_schema();
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
        for key in REQUIRED_KEYS {
            assert!(schema["properties"].get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_valid_narrative() {
        let narrative = Narrative::from_value(valid()).unwrap();
        assert_eq!(narrative.wins, vec!["주일 예배"]);
    }

    #[test]
    fn test_extra_key_rejected() {
        let mut value = valid();
        value["mood"] = json!("great");
        assert!(Narrative::from_value(value).is_err());
    }

    #[test]
    fn test_missing_key_rejected() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("patterns");
        assert!(Narrative::from_value(value).is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut value = valid();
        value["wins"] = json!("just one");
        assert!(Narrative::from_value(value).is_err());
    }
}
