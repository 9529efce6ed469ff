use quiz_core::model::{AchievementId, PowerUpKind, SettingName, UserProgress};
use storage::repository::{KeyValueStore, PROGRESS_SLOT, ProgressRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_slot_round_trips_progress() {
    let repo = connect("memdb_progress_roundtrip").await;
    assert!(repo.load_progress().await.unwrap().is_none());

    let mut progress = UserProgress::new();
    progress.add_xp(900);
    progress.update_streak(true);
    progress.update_streak(true);
    progress.consume_power_up(PowerUpKind::SkipQuestion);
    progress.toggle_setting(SettingName::Animations);
    progress.unlock_achievement(&AchievementId::new("perfect_score"));
    repo.save_progress(&progress).await.unwrap();

    let loaded = repo.load_progress().await.unwrap().expect("snapshot");
    assert_eq!(loaded, progress);
    assert_eq!(loaded.level(), 4);
}

#[tokio::test]
async fn sqlite_overwrites_single_slot() {
    let repo = connect("memdb_overwrite").await;
    repo.put_slot(PROGRESS_SLOT, "first").await.unwrap();
    repo.put_slot(PROGRESS_SLOT, "second").await.unwrap();

    let value = repo.get_slot(PROGRESS_SLOT).await.unwrap();
    assert_eq!(value.as_deref(), Some("second"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_slots")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn sqlite_malformed_slot_reports_serialization_error() {
    let repo = connect("memdb_malformed").await;
    repo.put_slot(PROGRESS_SLOT, "[1, 2, 3]").await.unwrap();
    let err = repo.load_progress().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let storage = Storage::sqlite("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.progress.save_progress(&UserProgress::new()).await.unwrap();
    assert!(storage.slots.get_slot(PROGRESS_SLOT).await.unwrap().is_some());
}
