use std::sync::Arc;

use quiz_core::catalog::builtin_categories;
use quiz_core::model::Category;
use storage::repository::Storage;

use crate::Clock;
use crate::achievements::AchievementEvaluator;
use crate::challenge_service::ChallengeService;
use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::leaderboard_service::LeaderboardService;
use crate::progress_store::{ProgressStore, ThemeSink, WatchThemeSink};
use crate::quiz::QuizController;

/// Assembles the app-facing services around one progress store.
#[derive(Clone)]
pub struct AppServices {
    config: QuizConfig,
    categories: Arc<[Category]>,
    theme: Arc<WatchThemeSink>,
    progress: Arc<ProgressStore>,
    achievements: Arc<AchievementEvaluator>,
    leaderboard: Arc<LeaderboardService>,
    challenges: Arc<ChallengeService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the built-in
    /// catalog fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock, config).await
    }

    /// Build services over an already opened storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog fails validation.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        config: QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let categories: Arc<[Category]> = builtin_categories()?.into();
        let theme = Arc::new(WatchThemeSink::new());
        let progress = Arc::new(
            ProgressStore::open(
                Arc::clone(&storage.progress),
                Some(Arc::clone(&theme) as Arc<dyn ThemeSink>),
            )
            .await,
        );
        let achievements = Arc::new(AchievementEvaluator::new(Arc::clone(&progress)));

        Ok(Self {
            config,
            categories,
            theme,
            progress,
            achievements,
            leaderboard: Arc::new(LeaderboardService::builtin(clock)),
            challenges: Arc::new(ChallengeService::builtin()),
        })
    }

    /// A fresh controller for one quiz screen.
    #[must_use]
    pub fn quiz_controller(&self) -> QuizController {
        QuizController::new(
            Arc::clone(&self.progress),
            Arc::clone(&self.achievements),
            Arc::clone(&self.categories),
            self.config.clone(),
        )
    }

    #[must_use]
    pub fn categories(&self) -> Arc<[Category]> {
        Arc::clone(&self.categories)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<WatchThemeSink> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn achievements(&self) -> Arc<AchievementEvaluator> {
        Arc::clone(&self.achievements)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn challenges(&self) -> Arc<ChallengeService> {
        Arc::clone(&self.challenges)
    }
}
