use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use thoughtstore_core::{
    JsonThoughtCodec, KeyValueStore, KvOp, ManualClock, MemoryKeyValueStore, SavedThought,
    StoreConfig, Thought, ThoughtCodec, ThoughtStore,
};

const ACTIVE: &str = "@thoughts:active:";
const ARCHIVED: &str = "@thoughts:archived:";

#[test]
fn expiry_boundary_keeps_just_inside_and_sweeps_just_outside() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    let retention = StoreConfig::default().retention();

    let inside = record(
        &format!("{ARCHIVED}inside"),
        now() - Duration::days(30),
        now() - (retention - Duration::minutes(1)),
    );
    let outside = record(
        &format!("{ARCHIVED}outside"),
        now() - Duration::days(30),
        now() - (retention + Duration::minutes(1)),
    );
    put(&kv, &inside);
    put(&kv, &outside);

    let loaded = store.load_collection();
    assert_eq!(loaded.archived, vec![inside.clone()]);
    assert!(kv.raw_value(&outside.uuid).is_none());
    assert!(kv.raw_value(&inside.uuid).is_some());
}

#[test]
fn expiry_uses_full_elapsed_time_across_hour_boundaries() {
    let kv = MemoryKeyValueStore::new();
    let store = ThoughtStore::try_new(&kv, StoreConfig::with_retention_minutes(30))
        .unwrap()
        .with_clock(Arc::new(ManualClock::new(now())));

    // Minute-of-hour is identical to `now`, but two hours have elapsed.
    let stale = record(
        &format!("{ARCHIVED}two-hours"),
        now() - Duration::hours(2),
        now() - Duration::hours(2),
    );
    put(&kv, &stale);

    assert!(store.load_collection().archived.is_empty());
    assert!(kv.is_empty());
}

#[test]
fn active_thoughts_never_expire() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    let ancient = record(
        &format!("{ACTIVE}ancient"),
        now() - Duration::days(400),
        now() - Duration::days(400),
    );
    put(&kv, &ancient);

    assert_eq!(store.load_collection().active, vec![ancient]);
}

#[test]
fn corrupt_and_foreign_entries_are_skipped_without_error() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);

    let good_active = record(&format!("{ACTIVE}good"), now(), now());
    let good_archived = record(&format!("{ARCHIVED}good-archived"), now(), now());
    put(&kv, &good_active);
    put(&kv, &good_archived);

    kv.insert_dangling(format!("{ACTIVE}dangling"));
    kv.set(&format!("{ACTIVE}null"), "null").unwrap();
    kv.set(&format!("{ACTIVE}garbage"), "{definitely not json").unwrap();
    kv.set(
        &format!("{ARCHIVED}bad-date"),
        r#"{"uuid":"x","createdAt":"soon","updatedAt":"later"}"#,
    )
    .unwrap();
    put(&kv, &record(ACTIVE, now(), now()));
    kv.set("settings:theme", "dark").unwrap();

    let loaded = store.load_collection();
    assert_eq!(loaded.active, vec![good_active]);
    assert_eq!(loaded.archived, vec![good_archived]);

    // Unreadable entries are left for inspection; only expiry deletes.
    assert_eq!(kv.len(), 8);
    assert_eq!(kv.raw_value("settings:theme").as_deref(), Some("dark"));
}

#[test]
fn duplicate_suffix_keeps_newer_copy_and_sweeps_the_other() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);

    let older_active = record(
        &format!("{ACTIVE}same"),
        now() - Duration::hours(3),
        now() - Duration::hours(3),
    );
    let newer_archived = record(
        &format!("{ARCHIVED}same"),
        now() - Duration::hours(3),
        now() - Duration::hours(1),
    );
    put(&kv, &older_active);
    put(&kv, &newer_archived);

    let loaded = store.load_collection();
    assert!(loaded.active.is_empty());
    assert_eq!(loaded.archived, vec![newer_archived.clone()]);
    assert_eq!(kv.keys(), vec![newer_archived.uuid]);
}

#[test]
fn duplicate_suffix_with_equal_timestamps_prefers_active() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    let at = now() - Duration::hours(1);
    let active = record(&format!("{ACTIVE}tie"), at, at);
    let archived = record(&format!("{ARCHIVED}tie"), at, at);
    put(&kv, &active);
    put(&kv, &archived);

    let loaded = store.load_collection();
    assert_eq!(loaded.active, vec![active.clone()]);
    assert!(loaded.archived.is_empty());
    assert_eq!(kv.keys(), vec![active.uuid]);
}

#[test]
fn storage_key_wins_over_embedded_uuid() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    let mut drifted = record(&format!("{ACTIVE}real"), now(), now());
    drifted.uuid = format!("{ARCHIVED}real");
    let payload = JsonThoughtCodec.encode(&drifted).unwrap();
    kv.set(&format!("{ACTIVE}real"), &payload).unwrap();

    let loaded = store.load_collection();
    assert_eq!(loaded.active.len(), 1);
    assert_eq!(loaded.active[0].uuid, format!("{ACTIVE}real"));
}

#[test]
fn read_failures_yield_empty_collection_and_recover() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    put(&kv, &record(&format!("{ACTIVE}one"), now(), now()));

    kv.fail_next(KvOp::ListKeys);
    assert!(store.load_collection().is_empty());

    kv.fail_next(KvOp::MultiGet);
    assert!(store.load_collection().is_empty());

    assert_eq!(store.load_collection().active.len(), 1);
}

#[test]
fn failed_sweep_is_retried_on_next_load() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    let expired = record(
        &format!("{ARCHIVED}expired"),
        now() - Duration::days(20),
        now() - Duration::days(10),
    );
    put(&kv, &expired);

    kv.fail_next(KvOp::MultiRemove);
    assert!(store.load_collection().archived.is_empty());
    assert!(kv.raw_value(&expired.uuid).is_some());

    assert!(store.load_collection().archived.is_empty());
    assert!(kv.is_empty());
}

#[test]
fn results_are_sorted_by_creation_time() {
    let kv = MemoryKeyValueStore::new();
    let store = store(&kv);
    // Key order ("a", "b", "c") is the reverse of creation order.
    let third = record(&format!("{ACTIVE}a"), now() - Duration::minutes(1), now());
    let second = record(&format!("{ACTIVE}b"), now() - Duration::minutes(2), now());
    let first = record(&format!("{ACTIVE}c"), now() - Duration::minutes(3), now());
    put(&kv, &third);
    put(&kv, &second);
    put(&kv, &first);

    let loaded = store.load_collection();
    assert_eq!(loaded.active, vec![first, second, third]);
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 3, 10, 12, 15, 0).unwrap()
}

fn store(kv: &MemoryKeyValueStore) -> ThoughtStore<&MemoryKeyValueStore> {
    ThoughtStore::try_new(kv, StoreConfig::default())
        .unwrap()
        .with_clock(Arc::new(ManualClock::new(now())))
}

fn record(key: &str, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> SavedThought {
    SavedThought {
        uuid: key.to_string(),
        created_at,
        updated_at,
        thought: Thought::new(format!("thought stored at {key}")),
    }
}

fn put(kv: &MemoryKeyValueStore, thought: &SavedThought) {
    let payload = JsonThoughtCodec.encode(thought).unwrap();
    kv.set(&thought.uuid, &payload).unwrap();
}
