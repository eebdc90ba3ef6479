use chrono::{Duration, TimeZone, Utc};
use rusqlite::{params, Connection};
use taskmaster_core::db::open_db_in_memory;
use taskmaster_core::{Category, Priority, SqliteTaskStore, StoreError, Task, TaskStore};

fn sample_tasks() -> Vec<Task> {
    let base = Utc.with_ymd_and_hms(2026, 4, 20, 9, 0, 0).unwrap();

    let mut groceries = Task::new("buy groceries", base);
    groceries.category = Category::Shopping;

    let mut report = Task::new("quarterly report", base + Duration::days(3));
    report.description = "numbers due to finance".to_string();
    report.priority = Priority::High;
    report.category = Category::Work;
    report.reminder_enabled = true;

    let mut checkup = Task::new("dental checkup", base - Duration::days(1));
    checkup.category = Category::Health;
    checkup.is_completed = true;

    vec![groceries, report, checkup]
}

#[test]
fn save_and_load_round_trip_preserves_every_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let mut tasks = sample_tasks();
    store.save(&tasks).unwrap();

    let mut loaded = store.load().unwrap();
    // Storage order is opaque; compare as a set keyed by id.
    tasks.sort_by_key(|task| task.id);
    loaded.sort_by_key(|task| task.id);
    assert_eq!(loaded, tasks);
}

#[test]
fn load_without_saved_blob_returns_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn save_overwrites_previous_blob() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let tasks = sample_tasks();
    store.save(&tasks).unwrap();
    store.save(&tasks[..1]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, tasks[0].id);
}

#[test]
fn blob_is_stored_under_stable_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    store.save(&sample_tasks()).unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM kv_store WHERE key = 'savedTasks';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn corrupted_blob_surfaces_decode_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES ('savedTasks', ?1);",
        params![b"not a json array".to_vec()],
    )
    .unwrap();

    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[test]
fn blob_from_older_revision_without_reminder_flag_still_loads() {
    let conn = open_db_in_memory().unwrap();
    let old_blob = br#"[{
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "legacy task",
        "description": "",
        "dueDate": "2025-10-01T08:00:00Z",
        "isCompleted": false,
        "priority": "Medium",
        "category": "Personal"
    }]"#;
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES ('savedTasks', ?1);",
        params![old_blob.to_vec()],
    )
    .unwrap();

    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "legacy task");
    assert!(!loaded[0].reminder_enabled);
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteTaskStore::try_new(&conn);
    assert!(matches!(result, Err(StoreError::MissingTable("kv_store"))));
}
