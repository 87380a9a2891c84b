//! FaithLoop Domain Layer
//!
//! Core types and capability traits for the FaithLoop journal pipeline.
//! Every other crate in the workspace depends on this one; it performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Entry**: one user-authored check-in (free text + mood + tags)
//! - **Extraction**: structured fields mechanically derived from an entry's text
//! - **Demo tag**: sentinel marking synthetic, safely purgeable entries
//! - **RequestContext**: the user and clock a single request runs under
//! - **BestEffort**: explicit wrapper for operations whose failure is tolerated
//!
//! ## Architecture
//!
//! - Pure data types and small, total helper functions only
//! - Persistence, indexing and completion are reached through the traits in
//!   [`traits`]; implementations live in `faithloop-store` and `faithloop-llm`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod best_effort;
pub mod context;
pub mod demo;
pub mod entry;
pub mod extraction;
pub mod mood;
pub mod traits;

// Re-exports for convenience
pub use best_effort::BestEffort;
pub use context::{RequestContext, UserId};
pub use demo::{is_demo_tagged, DEMO_TAG};
pub use entry::{Entry, EntryId, NewEntry};
pub use extraction::{Extraction, ExtractionFields, ExtractionType, NewExtraction, SourceType};
pub use mood::Mood;
pub use traits::{
    ChatMessage, CompletionProvider, DeleteFilter, Extractor, Indexer, JournalStore, Role, Table,
};
