//! Demo tag - sentinel marking synthetic entries
//!
//! The tag is the only thing that identifies demo data. There is no separate
//! demo table: extractions, embeddings and chunks are demo-scoped because
//! their `source_id` points at a tagged entry.

/// Sentinel tag carried by every synthetic entry
///
/// The surrounding double underscores keep it out of the space of tags a user
/// would type by hand.
pub const DEMO_TAG: &str = "__demo__";

/// Whether a tag list contains the demo sentinel
pub fn is_demo_tagged<S: AsRef<str>>(tags: &[S]) -> bool {
    tags.iter().any(|t| t.as_ref() == DEMO_TAG)
}
