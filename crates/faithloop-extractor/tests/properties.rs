//! Property tests for the rule extractor

use faithloop_extractor::{extract, RuleExtractor};
use proptest::prelude::*;

fn journal_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[-•* ]{0,3}[a-z가-힣 ]{0,20}",
        "!{0,2} ?(문제|bug|blocked|힘들)[a-z ]{0,10}",
        "#[a-z가-힣_]{1,8}( #[a-z]{1,5})?",
        "💡?[a-z ]{0,10}(idea|배움)?",
        "\\PC{0,30}",
    ]
}

proptest! {
    #[test]
    fn extraction_is_deterministic(text in "\\PC{0,200}") {
        prop_assert_eq!(extract(&text), extract(&text));
    }

    #[test]
    fn fresh_extractor_agrees_with_shared(lines in prop::collection::vec(journal_line(), 0..12)) {
        let text = lines.join("\n");
        prop_assert_eq!(RuleExtractor::default().extract(&text), extract(&text));
    }

    #[test]
    fn deduplicated_fields_have_no_repeats(lines in prop::collection::vec(journal_line(), 0..12)) {
        let fields = extract(&lines.join("\n"));
        for list in [&fields.obstacles, &fields.projects, &fields.insights] {
            let mut seen = std::collections::HashSet::new();
            for item in list {
                prop_assert!(seen.insert(item.clone()), "duplicate {:?}", item);
            }
        }
        prop_assert!(fields.people.is_empty());
        prop_assert!(fields.emotions.is_empty());
    }

    #[test]
    fn extracted_items_are_trimmed_and_non_empty(lines in prop::collection::vec(journal_line(), 0..12)) {
        let fields = extract(&lines.join("\n"));
        for item in fields.tasks.iter().chain(&fields.obstacles).chain(&fields.insights) {
            prop_assert!(!item.is_empty());
            prop_assert_eq!(item.trim(), item.as_str());
        }
    }

    #[test]
    fn payload_serializes_to_six_keys(text in "\\PC{0,120}") {
        let value = serde_json::to_value(extract(&text)).unwrap();
        prop_assert_eq!(value.as_object().unwrap().len(), 6);
    }
}

#[test]
fn duplicate_obstacle_lines_collapse() {
    let fields = extract("! 오류가 났다\n\n  ! 오류가 났다  \n- keep going");
    assert_eq!(fields.obstacles, vec!["오류가 났다"]);
    assert_eq!(fields.tasks, vec!["keep going"]);
}
