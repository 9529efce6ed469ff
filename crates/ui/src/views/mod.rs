mod achievement_toast;
mod daily_challenge;
mod home;
mod hooks;
mod leaderboard;
mod profile;
mod quiz;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use achievement_toast::AchievementToast;
pub use daily_challenge::DailyChallengeView;
pub use home::HomeView;
pub use hooks::use_watch;
pub use leaderboard::LeaderboardView;
pub use profile::ProfileView;
pub use quiz::{QuizView, StartQuizView};
