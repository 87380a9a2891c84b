//! FaithLoop Storage Layer
//!
//! Implements `JournalStore` and `Indexer` from `faithloop-domain` on SQLite.
//!
//! # Architecture
//!
//! - `entries` and `extractions` hold the journal and its derived fields
//! - `memory_chunks` and `memory_embeddings` are the indexing side: paragraph
//!   chunks of each entry and hash-based vectors for entry and extraction text
//! - Tags and metadata are JSON columns; tag queries go through `json_each`
//!
//! # Examples
//!
//! ```
//! use faithloop_domain::{JournalStore, Mood, NewEntry, RequestContext, UserId};
//! use faithloop_store::SqliteStore;
//!
//! let store = SqliteStore::in_memory().unwrap();
//! let ctx = RequestContext::new(UserId::new());
//! let entry = store
//!     .insert_entry(&ctx, NewEntry::new("감사한 하루", Mood::Good))
//!     .unwrap();
//! assert_eq!(store.list_entries(&ctx, 10, 0).unwrap()[0].id, entry.id);
//! ```

#![warn(missing_docs)]

pub mod chunking;
pub mod embedding;

use chrono::{DateTime, SecondsFormat, Utc};
use chunking::TextChunker;
use embedding::{EmbeddingError, EmbeddingModel, HashEmbeddingModel};
use faithloop_domain::{
    DeleteFilter, Entry, EntryId, Extraction, ExtractionFields, ExtractionType, Indexer,
    JournalStore, Mood, NewEntry, NewExtraction, RequestContext, SourceType, Table, UserId,
};
use rusqlite::{params, Connection, Params, ToSql};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A delete without a user scope was refused
    #[error("Refusing unscoped delete on {0}")]
    UnscopedDelete(&'static str),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// An embedding row as stored
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEmbedding {
    /// `entry` or `extraction`
    pub kind: String,
    /// Producing extractor for extraction rows
    pub extraction_type: Option<ExtractionType>,
    /// Embedded text
    pub content: String,
    /// Vector
    pub vector: Vec<f32>,
}

/// SQLite-based implementation of `JournalStore` and `Indexer`
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
    embedder: HashEmbeddingModel,
    chunker: TextChunker,
}

const ENTRY_COLUMNS: &str = "id, user_id, content, mood, tags, metadata, created_at";
const EXTRACTION_COLUMNS: &str =
    "id, user_id, source_type, source_id, extraction_type, payload, created_at";

impl SqliteStore {
    /// Open (or create) a store at `path`
    ///
    /// Use `:memory:` for an in-memory database.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            embedder: HashEmbeddingModel::default(),
            chunker: TextChunker::default(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    /// Replace the embedding model
    pub fn with_embedding_model(mut self, embedder: HashEmbeddingModel) -> Self {
        self.embedder = embedder;
        self
    }

    /// Replace the chunker
    pub fn with_chunker(mut self, chunker: TextChunker) -> Self {
        self.chunker = chunker;
        self
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of rows `user_id` owns in `table`
    pub fn count_rows(&self, table: Table, user_id: UserId) -> Result<usize, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?1", table.as_str());
        let count: i64 = self
            .conn
            .query_row(&sql, params![user_id.to_string()], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Chunks indexed for one entry, in order
    pub fn chunks_for_source(
        &self,
        ctx: &RequestContext,
        source_id: EntryId,
    ) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT content FROM memory_chunks
             WHERE user_id = ?1 AND source_id = ?2 ORDER BY chunk_index",
        )?;
        let chunks = stmt
            .query_map(
                params![ctx.user_id.to_string(), source_id.to_string()],
                |row| row.get(0),
            )?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(chunks)
    }

    /// Embeddings indexed for one entry, oldest first
    pub fn embeddings_for_source(
        &self,
        ctx: &RequestContext,
        source_id: EntryId,
    ) -> Result<Vec<StoredEmbedding>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT kind, extraction_type, content, embedding FROM memory_embeddings
             WHERE user_id = ?1 AND source_id = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(
                params![ctx.user_id.to_string(), source_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Vec<u8>>(3)?,
                    ))
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(kind, extraction_type, content, bytes)| {
                let extraction_type = extraction_type
                    .map(|t| {
                        ExtractionType::parse(&t).ok_or_else(|| {
                            StoreError::InvalidData(format!("Unknown extraction type: {}", t))
                        })
                    })
                    .transpose()?;
                Ok(StoredEmbedding {
                    kind,
                    extraction_type,
                    content,
                    vector: embedding::from_bytes(&bytes)?,
                })
            })
            .collect()
    }

    /// Entries newest first, paged, skipping any entry that carries `tag`
    ///
    /// The exclusion runs inside the query, so pages stay full while matching
    /// rows remain.
    pub fn list_entries_without_tag(
        &self,
        ctx: &RequestContext,
        tag: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Entry>, StoreError> {
        let sql = format!(
            "SELECT {} FROM entries WHERE user_id = ?1
               AND NOT EXISTS (SELECT 1 FROM json_each(entries.tags) WHERE json_each.value = ?2)
             ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4",
            ENTRY_COLUMNS
        );
        self.query_entries(
            &sql,
            params![ctx.user_id.to_string(), tag, limit as i64, offset as i64],
        )
    }

    fn query_entries<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Entry>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok(EntryRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    content: row.get(2)?,
                    mood: row.get(3)?,
                    tags: row.get(4)?,
                    metadata: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    fn insert_embedding(
        &self,
        ctx: &RequestContext,
        source_id: EntryId,
        kind: &str,
        extraction_type: Option<ExtractionType>,
        content: &str,
        metadata: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let vector = self.embedder.embed(content)?;
        self.conn.execute(
            "INSERT INTO memory_embeddings
             (user_id, source_type, source_id, kind, extraction_type, content, embedding, dimension, metadata, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                ctx.user_id.to_string(),
                SourceType::Checkin.as_str(),
                source_id.to_string(),
                kind,
                extraction_type.map(|t| t.as_str()),
                content,
                embedding::to_bytes(&vector),
                vector.len() as i64,
                serde_json::to_string(metadata)?,
                timestamp(ctx.now),
            ],
        )?;
        Ok(())
    }
}

/// Raw entry row before decoding JSON and enum columns
struct EntryRow {
    id: String,
    user_id: String,
    content: String,
    mood: String,
    tags: String,
    metadata: String,
    created_at: String,
}

impl EntryRow {
    fn into_entry(self) -> Result<Entry, StoreError> {
        Ok(Entry {
            id: EntryId::from_string(&self.id).map_err(StoreError::InvalidData)?,
            user_id: UserId::from_string(&self.user_id).map_err(StoreError::InvalidData)?,
            content: self.content,
            mood: Mood::parse(&self.mood)
                .ok_or_else(|| StoreError::InvalidData(format!("Unknown mood: {}", self.mood)))?,
            tags: serde_json::from_str(&self.tags)?,
            metadata: serde_json::from_str(&self.metadata)?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Raw extraction row
struct ExtractionRow {
    id: String,
    user_id: String,
    source_type: String,
    source_id: String,
    extraction_type: String,
    payload: String,
    created_at: String,
}

impl ExtractionRow {
    fn into_extraction(self) -> Result<Extraction, StoreError> {
        Ok(Extraction {
            id: uuid::Uuid::parse_str(&self.id)
                .map_err(|e| StoreError::InvalidData(format!("Invalid extraction id: {}", e)))?,
            user_id: UserId::from_string(&self.user_id).map_err(StoreError::InvalidData)?,
            source_type: SourceType::parse(&self.source_type).ok_or_else(|| {
                StoreError::InvalidData(format!("Unknown source type: {}", self.source_type))
            })?,
            source_id: EntryId::from_string(&self.source_id).map_err(StoreError::InvalidData)?,
            extraction_type: ExtractionType::parse(&self.extraction_type).ok_or_else(|| {
                StoreError::InvalidData(format!(
                    "Unknown extraction type: {}",
                    self.extraction_type
                ))
            })?,
            fields: serde_json::from_str(&self.payload)?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Format a timestamp so that string order matches time order
fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData(format!("Invalid timestamp {}: {}", s, e)))
}

impl JournalStore for SqliteStore {
    type Error = StoreError;

    fn health_check(&self) -> Result<(), Self::Error> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    fn insert_entry(&self, ctx: &RequestContext, entry: NewEntry) -> Result<Entry, Self::Error> {
        let stored = Entry {
            id: EntryId::new(),
            user_id: ctx.user_id,
            content: entry.content,
            mood: entry.mood,
            tags: entry.tags,
            metadata: entry.metadata,
            created_at: entry.created_at.unwrap_or(ctx.now),
        };

        self.conn.execute(
            &format!("INSERT INTO entries ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)", ENTRY_COLUMNS),
            params![
                stored.id.to_string(),
                stored.user_id.to_string(),
                &stored.content,
                stored.mood.as_str(),
                serde_json::to_string(&stored.tags)?,
                serde_json::to_string(&stored.metadata)?,
                timestamp(stored.created_at),
            ],
        )?;
        debug!("Inserted entry {}", stored.id);

        Ok(stored)
    }

    fn insert_extraction(
        &self,
        ctx: &RequestContext,
        extraction: NewExtraction,
    ) -> Result<Extraction, Self::Error> {
        let stored = Extraction {
            id: uuid::Uuid::now_v7(),
            user_id: ctx.user_id,
            source_type: extraction.source_type,
            source_id: extraction.source_id,
            extraction_type: extraction.extraction_type,
            fields: extraction.fields,
            created_at: ctx.now,
        };

        self.conn.execute(
            &format!(
                "INSERT INTO extractions ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                EXTRACTION_COLUMNS
            ),
            params![
                stored.id.to_string(),
                stored.user_id.to_string(),
                stored.source_type.as_str(),
                stored.source_id.to_string(),
                stored.extraction_type.as_str(),
                serde_json::to_string(&stored.fields)?,
                timestamp(stored.created_at),
            ],
        )?;
        debug!(
            "Inserted {} extraction for {}",
            stored.extraction_type, stored.source_id
        );

        Ok(stored)
    }

    fn entries_in_range(
        &self,
        ctx: &RequestContext,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Entry>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM entries
             WHERE user_id = ?1 AND created_at >= ?2 AND created_at <= ?3
             ORDER BY created_at, id",
            ENTRY_COLUMNS
        );
        self.query_entries(
            &sql,
            params![ctx.user_id.to_string(), timestamp(start), timestamp(end)],
        )
    }

    fn entries_with_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Entry>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM entries
             WHERE user_id = ?1
               AND EXISTS (SELECT 1 FROM json_each(entries.tags) WHERE json_each.value = ?2)
             ORDER BY created_at, id",
            ENTRY_COLUMNS
        );
        self.query_entries(&sql, params![ctx.user_id.to_string(), tag])
    }

    fn extractions_for_source(
        &self,
        ctx: &RequestContext,
        source_type: SourceType,
        source_id: EntryId,
    ) -> Result<Vec<Extraction>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM extractions
             WHERE user_id = ?1 AND source_type = ?2 AND source_id = ?3
             ORDER BY created_at, id",
            EXTRACTION_COLUMNS
        ))?;
        let rows = stmt
            .query_map(
                params![
                    ctx.user_id.to_string(),
                    source_type.as_str(),
                    source_id.to_string()
                ],
                |row| {
                    Ok(ExtractionRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        source_type: row.get(2)?,
                        source_id: row.get(3)?,
                        extraction_type: row.get(4)?,
                        payload: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ExtractionRow::into_extraction).collect()
    }

    fn list_entries(
        &self,
        ctx: &RequestContext,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Entry>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM entries WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
            ENTRY_COLUMNS
        );
        self.query_entries(
            &sql,
            params![ctx.user_id.to_string(), limit as i64, offset as i64],
        )
    }

    fn delete_by_filter(&self, table: Table, filter: &DeleteFilter) -> Result<usize, Self::Error> {
        let user_id = filter
            .user_id
            .ok_or(StoreError::UnscopedDelete(table.as_str()))?;

        let mut sql = format!("DELETE FROM {} WHERE user_id = ?", table.as_str());
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id.to_string())];

        match table {
            Table::Entries => {
                if filter.source_type.is_some() {
                    return Err(StoreError::InvalidData(
                        "entries cannot be filtered by source_type".to_string(),
                    ));
                }
                if let Some(id) = filter.source_id {
                    sql.push_str(" AND id = ?");
                    params.push(Box::new(id.to_string()));
                }
                if let Some(tag) = &filter.tag {
                    sql.push_str(
                        " AND EXISTS (SELECT 1 FROM json_each(entries.tags) WHERE json_each.value = ?)",
                    );
                    params.push(Box::new(tag.clone()));
                }
            }
            Table::Extractions | Table::MemoryEmbeddings | Table::MemoryChunks => {
                if let Some(source_type) = filter.source_type {
                    sql.push_str(" AND source_type = ?");
                    params.push(Box::new(source_type.as_str()));
                }
                if let Some(id) = filter.source_id {
                    sql.push_str(" AND source_id = ?");
                    params.push(Box::new(id.to_string()));
                }
                if let Some(tag) = &filter.tag {
                    sql.push_str(
                        " AND source_id IN (SELECT e.id FROM entries e WHERE e.user_id = ?
                           AND EXISTS (SELECT 1 FROM json_each(e.tags) WHERE json_each.value = ?))",
                    );
                    params.push(Box::new(user_id.to_string()));
                    params.push(Box::new(tag.clone()));
                }
            }
        }

        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let deleted = self.conn.execute(&sql, &param_refs[..])?;
        debug!("Deleted {} rows from {}", deleted, table.as_str());
        Ok(deleted)
    }
}

impl Indexer for SqliteStore {
    type Error = StoreError;

    fn index_entry(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        content: &str,
        fields: &ExtractionFields,
    ) -> Result<bool, Self::Error> {
        let chunks = self.chunker.chunk(content);
        if chunks.is_empty() {
            return Ok(false);
        }

        for (index, chunk) in chunks.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO memory_chunks (user_id, source_type, source_id, chunk_index, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    ctx.user_id.to_string(),
                    SourceType::Checkin.as_str(),
                    id.to_string(),
                    index as i64,
                    chunk,
                    timestamp(ctx.now),
                ],
            )?;
        }

        let metadata = serde_json::json!({ "projects": fields.projects });
        self.insert_embedding(ctx, id, "entry", None, content.trim(), &metadata)?;
        Ok(true)
    }

    fn index_extraction(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        extraction_type: ExtractionType,
        fields: &ExtractionFields,
    ) -> Result<bool, Self::Error> {
        let summary = fields.summary();
        if summary.is_empty() {
            return Ok(false);
        }
        let metadata = serde_json::json!({
            "tasks": fields.tasks.len(),
            "obstacles": fields.obstacles.len(),
        });
        self.insert_embedding(
            ctx,
            id,
            "extraction",
            Some(extraction_type),
            &summary,
            &metadata,
        )?;
        Ok(true)
    }
}
