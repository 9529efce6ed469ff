pub mod achievement;
mod challenge;
mod ids;
mod leaderboard;
mod progress;
mod question;
mod summary;

pub use achievement::{Achievement, AchievementError, default_achievements};
pub use challenge::DailyChallenge;
pub use ids::{AchievementId, CategoryId, ChallengeId};
pub use leaderboard::{CategoryFilter, LeaderboardEntry, RankedEntry, TimeFrame, rank_entries};
pub use progress::{
    PowerUpKind, PowerUps, SettingName, Settings, UserProgress, level_for_total_xp, xp_for_level,
};
pub use question::{Category, CategoryError, Question, QuestionError};
pub use summary::{QuizSummary, QuizSummaryError};
