//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and infrastructure.
//! Implementations live in `faithloop-store` and `faithloop-llm`; tests wrap
//! them to inject failures.

use crate::{
    Entry, EntryId, Extraction, ExtractionFields, ExtractionType, NewEntry, NewExtraction,
    RequestContext, SourceType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trait for persisting and reading journal data
///
/// Implemented by the infrastructure layer (faithloop-store). All reads are
/// scoped to `ctx.user_id`.
pub trait JournalStore {
    /// Error type for store operations
    type Error;

    /// Verify the backing store is reachable
    fn health_check(&self) -> Result<(), Self::Error>;

    /// Persist a new entry for `ctx.user_id`
    fn insert_entry(&self, ctx: &RequestContext, entry: NewEntry) -> Result<Entry, Self::Error>;

    /// Persist a new extraction for `ctx.user_id`
    fn insert_extraction(
        &self,
        ctx: &RequestContext,
        extraction: NewExtraction,
    ) -> Result<Extraction, Self::Error>;

    /// Entries created within `[start, end]` (inclusive), oldest first
    fn entries_in_range(
        &self,
        ctx: &RequestContext,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Entry>, Self::Error>;

    /// Entries carrying `tag`, oldest first
    fn entries_with_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Entry>, Self::Error>;

    /// Extractions derived from one source record
    fn extractions_for_source(
        &self,
        ctx: &RequestContext,
        source_type: SourceType,
        source_id: EntryId,
    ) -> Result<Vec<Extraction>, Self::Error>;

    /// Entries newest first, paged
    fn list_entries(
        &self,
        ctx: &RequestContext,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Entry>, Self::Error>;

    /// Delete rows of `table` matching `filter`, returning the number removed
    ///
    /// Implementations must refuse a filter without a user scope.
    fn delete_by_filter(&self, table: Table, filter: &DeleteFilter) -> Result<usize, Self::Error>;
}

/// Tables reachable through [`JournalStore::delete_by_filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Check-ins
    Entries,
    /// Extraction records
    Extractions,
    /// Embedding vectors derived from entries and extractions
    MemoryEmbeddings,
    /// Text chunks derived from entries
    MemoryChunks,
}

impl Table {
    /// Table name
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Entries => "entries",
            Table::Extractions => "extractions",
            Table::MemoryEmbeddings => "memory_embeddings",
            Table::MemoryChunks => "memory_chunks",
        }
    }
}

/// Conjunctive row filter for deletes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteFilter {
    /// Owning user (required by every implementation)
    pub user_id: Option<crate::UserId>,

    /// Match on `source_type`
    pub source_type: Option<SourceType>,

    /// Match on `source_id`
    pub source_id: Option<EntryId>,

    /// Match rows whose tag set contains this tag
    pub tag: Option<String>,
}

impl DeleteFilter {
    /// Filter scoped to the request's user
    pub fn for_user(ctx: &RequestContext) -> Self {
        Self {
            user_id: Some(ctx.user_id),
            ..Default::default()
        }
    }

    /// Restrict to rows derived from a check-in
    pub fn checkin_source(mut self, source_id: EntryId) -> Self {
        self.source_type = Some(SourceType::Checkin);
        self.source_id = Some(source_id);
        self
    }

    /// Restrict to rows derived from any source with this id
    pub fn source(mut self, source_id: EntryId) -> Self {
        self.source_id = Some(source_id);
        self
    }

    /// Restrict to rows carrying `tag`
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Trait for indexing journal data for later retrieval
///
/// Indexing is best-effort; callers record failures and move on.
pub trait Indexer {
    /// Error type for indexing operations
    type Error;

    /// Index an entry's text, returning whether anything was written
    fn index_entry(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        content: &str,
        fields: &ExtractionFields,
    ) -> Result<bool, Self::Error>;

    /// Index an extraction derived from `id`
    fn index_extraction(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        extraction_type: ExtractionType,
        fields: &ExtractionFields,
    ) -> Result<bool, Self::Error>;
}

/// Chat role for completion messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions
    System,
    /// User turn
    User,
    /// Model turn
    Assistant,
}

/// One message of a chat-style completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for schema-constrained completions
///
/// Implemented by the infrastructure layer (faithloop-llm). An `Err` means the
/// capability is unavailable for this request.
pub trait CompletionProvider {
    /// Error type for completion operations
    type Error;

    /// Request a JSON object conforming to `schema`
    fn complete_structured(
        &self,
        messages: &[ChatMessage],
        schema: &serde_json::Value,
        temperature: f32,
    ) -> Result<serde_json::Value, Self::Error>;
}

/// Trait for turning entry text into structured fields
///
/// Implemented by the application layer (faithloop-extractor)
pub trait Extractor {
    /// Extract fields from free text
    fn extract(&self, text: &str) -> ExtractionFields;
}

impl<T: JournalStore + ?Sized> JournalStore for &T {
    type Error = T::Error;

    fn health_check(&self) -> Result<(), Self::Error> {
        (**self).health_check()
    }

    fn insert_entry(&self, ctx: &RequestContext, entry: NewEntry) -> Result<Entry, Self::Error> {
        (**self).insert_entry(ctx, entry)
    }

    fn insert_extraction(
        &self,
        ctx: &RequestContext,
        extraction: NewExtraction,
    ) -> Result<Extraction, Self::Error> {
        (**self).insert_extraction(ctx, extraction)
    }

    fn entries_in_range(
        &self,
        ctx: &RequestContext,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Entry>, Self::Error> {
        (**self).entries_in_range(ctx, start, end)
    }

    fn entries_with_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Entry>, Self::Error> {
        (**self).entries_with_tag(ctx, tag)
    }

    fn extractions_for_source(
        &self,
        ctx: &RequestContext,
        source_type: SourceType,
        source_id: EntryId,
    ) -> Result<Vec<Extraction>, Self::Error> {
        (**self).extractions_for_source(ctx, source_type, source_id)
    }

    fn list_entries(
        &self,
        ctx: &RequestContext,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Entry>, Self::Error> {
        (**self).list_entries(ctx, limit, offset)
    }

    fn delete_by_filter(&self, table: Table, filter: &DeleteFilter) -> Result<usize, Self::Error> {
        (**self).delete_by_filter(table, filter)
    }
}

impl<T: Indexer + ?Sized> Indexer for &T {
    type Error = T::Error;

    fn index_entry(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        content: &str,
        fields: &ExtractionFields,
    ) -> Result<bool, Self::Error> {
        (**self).index_entry(ctx, id, content, fields)
    }

    fn index_extraction(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        extraction_type: ExtractionType,
        fields: &ExtractionFields,
    ) -> Result<bool, Self::Error> {
        (**self).index_extraction(ctx, id, extraction_type, fields)
    }
}

impl<T: Extractor + ?Sized> Extractor for &T {
    fn extract(&self, text: &str) -> ExtractionFields {
        (**self).extract(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;

    #[test]
    fn test_delete_filter_builders() {
        let ctx = RequestContext::new(UserId::new());
        let id = EntryId::new();
        let filter = DeleteFilter::for_user(&ctx).checkin_source(id);
        assert_eq!(filter.user_id, Some(ctx.user_id));
        assert_eq!(filter.source_type, Some(SourceType::Checkin));
        assert_eq!(filter.source_id, Some(id));
        assert!(filter.tag.is_none());
    }

    #[test]
    fn test_chat_message_roles() {
        let msg = ChatMessage::system("be brief");
        assert_eq!(msg.role, Role::System);
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
    }
}
