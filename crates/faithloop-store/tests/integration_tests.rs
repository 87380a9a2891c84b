//! Integration tests for faithloop-store
//!
//! These tests exercise the full persistence and indexing cycle against an
//! in-memory database.

use chrono::{Duration, TimeZone, Utc};
use faithloop_domain::{
    DeleteFilter, ExtractionFields, ExtractionType, Indexer, JournalStore, Mood, NewEntry,
    NewExtraction, RequestContext, SourceType, Table, UserId, DEMO_TAG,
};
use faithloop_store::chunking::TextChunker;
use faithloop_store::embedding::HashEmbeddingModel;
use faithloop_store::{SqliteStore, StoreError};

fn ctx() -> RequestContext {
    RequestContext::at(
        UserId::new(),
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
    )
}

fn fields() -> ExtractionFields {
    ExtractionFields {
        tasks: vec!["성경 읽기".to_string()],
        projects: vec!["faith".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_store_initialization() {
    assert!(SqliteStore::in_memory().is_ok());
}

#[test]
fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faithloop.db");
    let ctx = ctx();

    {
        let store = SqliteStore::new(&path).unwrap();
        store
            .insert_entry(&ctx, NewEntry::new("persisted", Mood::Great))
            .unwrap();
    }

    let reopened = SqliteStore::new(&path).unwrap();
    let entries = reopened.list_entries(&ctx, 10, 0).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, "persisted");
}

#[test]
fn test_insert_and_read_entry() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();

    let new = NewEntry::new("- 기도하기\n#faith", Mood::Good)
        .with_tags(["감사", DEMO_TAG])
        .with_metadata(serde_json::json!({"energy": 7}));
    let stored = store.insert_entry(&ctx, new).unwrap();

    assert_eq!(stored.user_id, ctx.user_id);
    assert_eq!(stored.created_at, ctx.now);

    let listed = store.list_entries(&ctx, 10, 0).unwrap();
    assert_eq!(listed, vec![stored]);
    assert_eq!(listed[0].metadata["energy"], 7);
}

#[test]
fn test_entries_scoped_to_user() {
    let store = SqliteStore::in_memory().unwrap();
    let alice = ctx();
    let bob = RequestContext::at(UserId::new(), alice.now);

    store
        .insert_entry(&alice, NewEntry::new("alice", Mood::Good))
        .unwrap();

    assert!(store.list_entries(&bob, 10, 0).unwrap().is_empty());
    assert_eq!(store.count_rows(Table::Entries, alice.user_id).unwrap(), 1);
}

#[test]
fn test_entries_in_range_inclusive_and_ascending() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    let start = Utc.with_ymd_and_hms(2026, 10, 12, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 59).unwrap();

    for (content, at) in [
        ("before", start - Duration::seconds(1)),
        ("late", end),
        ("early", start),
        ("after", end + Duration::seconds(1)),
    ] {
        store
            .insert_entry(&ctx, NewEntry::new(content, Mood::Neutral).with_created_at(at))
            .unwrap();
    }

    let contents: Vec<String> = store
        .entries_in_range(&ctx, start, end)
        .unwrap()
        .into_iter()
        .map(|e| e.content)
        .collect();
    assert_eq!(contents, vec!["early", "late"]);
}

#[test]
fn test_list_entries_newest_first_paged() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    for day in 0..5 {
        store
            .insert_entry(
                &ctx,
                NewEntry::new(format!("day {}", day), Mood::Good)
                    .with_created_at(ctx.now - Duration::days(4 - day)),
            )
            .unwrap();
    }

    let page: Vec<String> = store
        .list_entries(&ctx, 2, 1)
        .unwrap()
        .into_iter()
        .map(|e| e.content)
        .collect();
    assert_eq!(page, vec!["day 3", "day 2"]);
}

#[test]
fn test_list_entries_without_tag_keeps_pages_full() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    for day in 0..4 {
        store
            .insert_entry(
                &ctx,
                NewEntry::new(format!("mine {}", day), Mood::Good)
                    .with_created_at(ctx.now - Duration::days(10 + day)),
            )
            .unwrap();
    }
    for day in 0..3 {
        store
            .insert_entry(
                &ctx,
                NewEntry::new(format!("demo {}", day), Mood::Good)
                    .with_tags([DEMO_TAG])
                    .with_created_at(ctx.now - Duration::days(day)),
            )
            .unwrap();
    }

    // The newest three rows are demo rows; an unfiltered first page has no user rows
    assert!(store
        .list_entries(&ctx, 2, 0)
        .unwrap()
        .iter()
        .all(|e| e.is_demo()));

    let page: Vec<String> = store
        .list_entries_without_tag(&ctx, DEMO_TAG, 2, 1)
        .unwrap()
        .into_iter()
        .map(|e| e.content)
        .collect();
    assert_eq!(page, vec!["mine 1", "mine 2"]);
}

#[test]
fn test_entries_with_tag_exact_match() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    store
        .insert_entry(&ctx, NewEntry::new("a", Mood::Good).with_tags([DEMO_TAG]))
        .unwrap();
    store
        .insert_entry(&ctx, NewEntry::new("b", Mood::Good).with_tags(["__demo"]))
        .unwrap();

    let tagged = store.entries_with_tag(&ctx, DEMO_TAG).unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].content, "a");
}

#[test]
fn test_extraction_round_trip() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    let entry = store
        .insert_entry(&ctx, NewEntry::new("- 성경 읽기 #faith", Mood::Good))
        .unwrap();

    store
        .insert_extraction(
            &ctx,
            NewExtraction::for_checkin(entry.id, ExtractionType::RuleBased, fields()),
        )
        .unwrap();
    store
        .insert_extraction(
            &ctx,
            NewExtraction::for_checkin(entry.id, ExtractionType::LlmExtractor, fields()),
        )
        .unwrap();

    let found = store
        .extractions_for_source(&ctx, SourceType::Checkin, entry.id)
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].fields, fields());
    assert!(store
        .extractions_for_source(&ctx, SourceType::Artifact, entry.id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_index_entry_writes_chunks_and_embedding() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    let entry = store
        .insert_entry(&ctx, NewEntry::new("첫 문단\n\n둘째 문단", Mood::Good))
        .unwrap();

    assert!(store
        .index_entry(&ctx, entry.id, &entry.content, &fields())
        .unwrap());
    assert!(store
        .index_extraction(&ctx, entry.id, ExtractionType::DemoRule, &fields())
        .unwrap());

    assert_eq!(
        store.chunks_for_source(&ctx, entry.id).unwrap(),
        vec!["첫 문단\n\n둘째 문단"]
    );

    let embeddings = store.embeddings_for_source(&ctx, entry.id).unwrap();
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].kind, "entry");
    assert_eq!(embeddings[1].kind, "extraction");
    assert_eq!(embeddings[1].extraction_type, Some(ExtractionType::DemoRule));
    assert_eq!(embeddings[1].content, fields().summary());
    assert_eq!(embeddings[0].vector.len(), 384);
}

#[test]
fn test_custom_chunker_and_embedding_model() {
    let store = SqliteStore::in_memory()
        .unwrap()
        .with_chunker(TextChunker::new(5))
        .with_embedding_model(HashEmbeddingModel::new(16));
    let ctx = ctx();
    let entry = store
        .insert_entry(&ctx, NewEntry::new("첫 문단\n\n둘째 문단", Mood::Good))
        .unwrap();

    assert!(store
        .index_entry(&ctx, entry.id, &entry.content, &fields())
        .unwrap());

    assert_eq!(
        store.chunks_for_source(&ctx, entry.id).unwrap(),
        vec!["첫 문단", "둘째 문단"]
    );
    let embeddings = store.embeddings_for_source(&ctx, entry.id).unwrap();
    assert_eq!(embeddings.len(), 1);
    assert_eq!(embeddings[0].vector.len(), 16);
}

#[test]
fn test_index_skips_empty_input() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    let id = faithloop_domain::EntryId::new();

    assert!(!store
        .index_entry(&ctx, id, "   ", &ExtractionFields::default())
        .unwrap());
    assert!(!store
        .index_extraction(&ctx, id, ExtractionType::RuleBased, &ExtractionFields::default())
        .unwrap());
    assert_eq!(store.count_rows(Table::MemoryEmbeddings, ctx.user_id).unwrap(), 0);
}

#[test]
fn test_delete_by_source_and_tag() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();

    let demo = store
        .insert_entry(&ctx, NewEntry::new("demo", Mood::Good).with_tags([DEMO_TAG]))
        .unwrap();
    let real = store
        .insert_entry(&ctx, NewEntry::new("real", Mood::Good))
        .unwrap();

    for entry in [&demo, &real] {
        store
            .insert_extraction(
                &ctx,
                NewExtraction::for_checkin(entry.id, ExtractionType::RuleBased, fields()),
            )
            .unwrap();
        store
            .index_entry(&ctx, entry.id, &entry.content, &fields())
            .unwrap();
    }

    let by_source = DeleteFilter::for_user(&ctx).checkin_source(demo.id);
    assert_eq!(store.delete_by_filter(Table::Extractions, &by_source).unwrap(), 1);
    assert_eq!(
        store
            .delete_by_filter(Table::MemoryEmbeddings, &DeleteFilter::for_user(&ctx).source(demo.id))
            .unwrap(),
        1
    );

    let by_tag = DeleteFilter::for_user(&ctx).tagged(DEMO_TAG);
    assert_eq!(store.delete_by_filter(Table::MemoryChunks, &by_tag).unwrap(), 1);
    assert_eq!(store.delete_by_filter(Table::Entries, &by_tag).unwrap(), 1);

    assert_eq!(store.count_rows(Table::Entries, ctx.user_id).unwrap(), 1);
    assert_eq!(store.count_rows(Table::Extractions, ctx.user_id).unwrap(), 1);
    assert_eq!(store.count_rows(Table::MemoryEmbeddings, ctx.user_id).unwrap(), 1);
    assert_eq!(store.count_rows(Table::MemoryChunks, ctx.user_id).unwrap(), 1);
}

#[test]
fn test_delete_entries_by_source_type_rejected() {
    let store = SqliteStore::in_memory().unwrap();
    let ctx = ctx();
    let filter = DeleteFilter {
        source_type: Some(SourceType::Checkin),
        ..DeleteFilter::for_user(&ctx)
    };
    assert!(matches!(
        store.delete_by_filter(Table::Entries, &filter),
        Err(StoreError::InvalidData(_))
    ));
}

#[test]
fn test_delete_respects_user_scope() {
    let store = SqliteStore::in_memory().unwrap();
    let alice = ctx();
    let bob = RequestContext::at(UserId::new(), alice.now);

    store
        .insert_entry(&alice, NewEntry::new("a", Mood::Good).with_tags([DEMO_TAG]))
        .unwrap();

    let deleted = store
        .delete_by_filter(Table::Entries, &DeleteFilter::for_user(&bob).tagged(DEMO_TAG))
        .unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(store.count_rows(Table::Entries, alice.user_id).unwrap(), 1);
}
