//! FaithLoop Extractor
//!
//! Deterministic, rule-based extraction of structured fields from check-in
//! text.
//!
//! # Overview
//!
//! Each non-blank line of an entry is tested against four independent rules:
//!
//! - **Task**: the line starts with a bullet marker (`-`, `•`, `*`)
//! - **Obstacle**: the line starts with `!` or contains a problem keyword
//! - **Project**: every `#word` hashtag on the line
//! - **Insight**: the line contains an insight keyword (💡, 배움, idea, ...)
//!
//! A single line may fire several rules. `people` and `emotions` are part of
//! the payload contract but the rule extractor never fills them.
//!
//! # Example Usage
//!
//! ```
//! use faithloop_extractor::extract;
//!
//! let fields = extract("- buy milk\n#faith #faith\n💡 got an idea");
//! assert_eq!(fields.tasks, vec!["buy milk"]);
//! assert_eq!(fields.projects, vec!["faith"]);
//! assert_eq!(fields.insights, vec!["💡 got an idea"]);
//! assert!(fields.obstacles.is_empty());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod rules;

pub use config::RuleConfig;
pub use error::ExtractorError;
pub use rules::{extract, RuleExtractor, INSIGHT_KEYWORDS, OBSTACLE_KEYWORDS};
