use std::sync::Arc;

use quiz_core::model::Category;
use services::{
    AchievementEvaluator, ChallengeService, LeaderboardService, ProgressStore, QuizController,
    WatchThemeSink,
};

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressStore>;
    fn achievements(&self) -> Arc<AchievementEvaluator>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
    fn challenges(&self) -> Arc<ChallengeService>;
    fn theme(&self) -> Arc<WatchThemeSink>;
    fn categories(&self) -> Arc<[Category]>;

    /// A new controller; each quiz screen owns exactly one.
    fn quiz_controller(&self) -> QuizController;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    progress: Arc<ProgressStore>,
    achievements: Arc<AchievementEvaluator>,
    leaderboard: Arc<LeaderboardService>,
    challenges: Arc<ChallengeService>,
    theme: Arc<WatchThemeSink>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        Self {
            progress: app.progress(),
            achievements: app.achievements(),
            leaderboard: app.leaderboard(),
            challenges: app.challenges(),
            theme: app.theme(),
            app,
        }
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

    #[must_use]
    pub fn theme(&self) -> Arc<WatchThemeSink> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn categories(&self) -> Arc<[Category]> {
        self.app.categories()
    }

    #[must_use]
    pub fn quiz_controller(&self) -> QuizController {
        self.app.quiz_controller()
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
