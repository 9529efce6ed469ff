//! Owner of the user's persistent progress.
//!
//! Every mutation writes a full snapshot before returning. Save failures are
//! logged and swallowed; the in-memory state stays authoritative.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use quiz_core::model::{AchievementId, PowerUpKind, SettingName, UserProgress};
use storage::repository::{ProgressRepository, StorageError};

/// Visual theme derived from the `darkMode` setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::Dark } else { Self::Light }
    }

    /// Class applied to the root element of the UI.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }
}

/// Receives theme switches from the progress store.
pub trait ThemeSink: Send + Sync {
    fn apply_theme(&self, theme: Theme);
}

/// Theme sink backed by a watch channel; the UI subscribes to it.
pub struct WatchThemeSink {
    tx: watch::Sender<Theme>,
}

impl WatchThemeSink {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Theme::default());
        Self { tx }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }
}

impl Default for WatchThemeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeSink for WatchThemeSink {
    fn apply_theme(&self, theme: Theme) {
        self.tx.send_replace(theme);
    }
}

pub struct ProgressStore {
    repo: Arc<dyn ProgressRepository>,
    theme: Option<Arc<dyn ThemeSink>>,
    state: Mutex<UserProgress>,
    changes: watch::Sender<UserProgress>,
}

impl ProgressStore {
    /// Load the persisted snapshot and apply its theme.
    pub async fn open(
        repo: Arc<dyn ProgressRepository>,
        theme: Option<Arc<dyn ThemeSink>>,
    ) -> Self {
        let progress = Self::load(repo.as_ref()).await;
        if let Some(sink) = &theme {
            sink.apply_theme(Theme::from_dark_mode(progress.settings().dark_mode()));
        }
        let (changes, _rx) = watch::channel(progress.clone());
        Self {
            repo,
            theme,
            state: Mutex::new(progress),
            changes,
        }
    }

    /// Read the stored snapshot, falling back to defaults when it is absent
    /// or cannot be decoded.
    pub async fn load(repo: &dyn ProgressRepository) -> UserProgress {
        match repo.load_progress().await {
            Ok(Some(progress)) => progress,
            Ok(None) => {
                tracing::debug!("no stored progress, starting fresh");
                UserProgress::new()
            }
            Err(err @ StorageError::Serialization(_)) => {
                tracing::warn!(error = %err, "stored progress is malformed, using defaults");
                UserProgress::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored progress, using defaults");
                UserProgress::new()
            }
        }
    }

    pub async fn snapshot(&self) -> UserProgress {
        self.state.lock().await.clone()
    }

    /// Receiver that observes every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UserProgress> {
        self.changes.subscribe()
    }

    pub async fn add_xp(&self, amount: u32) -> UserProgress {
        let ((), progress) = self
            .mutate("add_xp", |progress| progress.add_xp(amount))
            .await;
        tracing::debug!(
            amount,
            total_xp = progress.total_xp(),
            level = progress.level(),
            "xp added"
        );
        progress
    }

    pub async fn update_streak(&self, increment: bool) -> UserProgress {
        let ((), progress) = self
            .mutate("update_streak", |progress| progress.update_streak(increment))
            .await;
        progress
    }

    /// Returns `true` when the achievement flipped to unlocked.
    pub async fn unlock_achievement(&self, id: &AchievementId) -> bool {
        let (flipped, _) = self
            .mutate("unlock_achievement", |progress| progress.unlock_achievement(id))
            .await;
        if flipped {
            tracing::info!(achievement = %id, "achievement unlocked");
        }
        flipped
    }

    pub async fn set_achievement_progress(&self, id: &AchievementId, percent: u8) -> bool {
        let (changed, _) = self
            .mutate("set_achievement_progress", |progress| {
                progress.set_achievement_progress(id, percent)
            })
            .await;
        changed
    }

    /// Returns `true` when a unit was available and consumed.
    pub async fn consume_power_up(&self, kind: PowerUpKind) -> bool {
        let (consumed, _) = self
            .mutate("consume_power_up", |progress| progress.consume_power_up(kind))
            .await;
        if !consumed {
            tracing::debug!(power_up = kind.key(), "power-up exhausted");
        }
        consumed
    }

    /// Flip a setting and return its new value.
    pub async fn toggle_setting(&self, name: SettingName) -> bool {
        let (value, _) = self
            .mutate("toggle_setting", |progress| progress.toggle_setting(name))
            .await;
        if name == SettingName::DarkMode {
            if let Some(sink) = &self.theme {
                sink.apply_theme(Theme::from_dark_mode(value));
            }
        }
        value
    }

    /// Overwrite the stored snapshot with a fresh record.
    pub async fn reset(&self) -> UserProgress {
        let ((), progress) = self
            .mutate("reset", |progress| *progress = UserProgress::new())
            .await;
        if let Some(sink) = &self.theme {
            sink.apply_theme(Theme::from_dark_mode(progress.settings().dark_mode()));
        }
        progress
    }

    async fn mutate<R>(
        &self,
        op: &'static str,
        apply: impl FnOnce(&mut UserProgress) -> R,
    ) -> (R, UserProgress) {
        let mut guard = self.state.lock().await;
        let out = apply(&mut guard);
        let snapshot = guard.clone();
        // Written under the lock so snapshots land in mutation order.
        if let Err(err) = self.repo.save_progress(&snapshot).await {
            tracing::warn!(op, error = %err, "failed to persist progress");
        }
        drop(guard);
        self.changes.send_replace(snapshot.clone());
        (out, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::achievement::FIRST_QUIZ;
    use storage::repository::{InMemoryRepository, KeyValueStore, PROGRESS_SLOT};

    struct FailingRepo;

    #[async_trait]
    impl ProgressRepository for FailingRepo {
        async fn load_progress(&self) -> Result<Option<UserProgress>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn save_progress(&self, _progress: &UserProgress) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn clear_progress(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    async fn store_with(repo: &InMemoryRepository) -> ProgressStore {
        ProgressStore::open(Arc::new(repo.clone()), None).await
    }

    #[tokio::test]
    async fn fresh_store_uses_defaults() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;
        let progress = store.snapshot().await;
        assert_eq!(progress, UserProgress::new());
        assert_eq!(progress.power_ups().count(PowerUpKind::SkipQuestion), 2);
    }

    #[tokio::test]
    async fn add_xp_persists_and_levels_up() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;

        let progress = store.add_xp(100).await;
        assert_eq!(progress.total_xp(), 100);
        assert_eq!(progress.level(), 2);

        let reloaded = ProgressStore::load(&repo).await;
        assert_eq!(reloaded.total_xp(), 100);
        assert_eq!(reloaded.level(), 2);
    }

    #[tokio::test]
    async fn streak_updates_track_max() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;
        store.update_streak(true).await;
        store.update_streak(true).await;
        let progress = store.update_streak(false).await;
        assert_eq!(progress.streak(), 0);
        assert_eq!(progress.max_streak(), 2);
    }

    #[tokio::test]
    async fn exhausted_power_up_stays_at_zero() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;
        assert!(store.consume_power_up(PowerUpKind::SkipQuestion).await);
        assert!(store.consume_power_up(PowerUpKind::SkipQuestion).await);
        assert!(!store.consume_power_up(PowerUpKind::SkipQuestion).await);
        let progress = store.snapshot().await;
        assert_eq!(progress.power_ups().count(PowerUpKind::SkipQuestion), 0);
    }

    #[tokio::test]
    async fn unlock_is_idempotent() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;
        let id = AchievementId::new(FIRST_QUIZ);
        assert!(store.unlock_achievement(&id).await);
        assert!(!store.unlock_achievement(&id).await);
        assert!(!store.unlock_achievement(&AchievementId::new("nope")).await);
        assert_eq!(store.snapshot().await.unlocked_count(), 1);
    }

    #[tokio::test]
    async fn malformed_slot_loads_defaults() {
        let repo = InMemoryRepository::new();
        repo.put_slot(PROGRESS_SLOT, "{not json").await.unwrap();
        let store = store_with(&repo).await;
        assert_eq!(store.snapshot().await, UserProgress::new());
    }

    #[tokio::test]
    async fn save_failures_are_swallowed() {
        let store = ProgressStore::open(Arc::new(FailingRepo), None).await;
        let progress = store.add_xp(50).await;
        assert_eq!(progress.total_xp(), 50);
        assert_eq!(store.snapshot().await.total_xp(), 50);
    }

    #[tokio::test]
    async fn dark_mode_toggle_switches_theme() {
        let repo = InMemoryRepository::new();
        let sink = Arc::new(WatchThemeSink::new());
        let store = ProgressStore::open(
            Arc::new(repo.clone()),
            Some(Arc::clone(&sink) as Arc<dyn ThemeSink>),
        )
        .await;
        assert_eq!(sink.current(), Theme::Light);

        assert!(store.toggle_setting(SettingName::DarkMode).await);
        assert_eq!(sink.current(), Theme::Dark);

        assert!(!store.toggle_setting(SettingName::SoundEffects).await);
        assert_eq!(sink.current(), Theme::Dark);

        // Reopening applies the persisted theme.
        let other = Arc::new(WatchThemeSink::new());
        let _store = ProgressStore::open(
            Arc::new(repo),
            Some(Arc::clone(&other) as Arc<dyn ThemeSink>),
        )
        .await;
        assert_eq!(other.current(), Theme::Dark);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;
        store.add_xp(400).await;
        store.consume_power_up(PowerUpKind::DoublePoints).await;
        let progress = store.reset().await;
        assert_eq!(progress, UserProgress::new());
        assert_eq!(ProgressStore::load(&repo).await, UserProgress::new());
    }

    #[tokio::test]
    async fn subscribers_observe_mutations() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo).await;
        let mut rx = store.subscribe();
        store.add_xp(10).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_xp(), 10);
    }
}
