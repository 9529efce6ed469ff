mod challenge_vm;
mod leaderboard_vm;
mod profile_vm;
mod quiz_vm;
mod time_fmt;

pub use challenge_vm::{ChallengeCardVm, map_challenge_cards};
pub use leaderboard_vm::{LeaderboardRowVm, map_leaderboard_rows};
pub use profile_vm::{AchievementVm, PowerUpInventoryVm, ProfileVm, SettingVm};
pub use quiz_vm::{
    CategoryCardVm, FeedbackVm, OptionState, OptionVm, PowerUpButtonVm, QuestionVm, QuizScreen,
    SummaryVm, TimerVm, map_category_cards, map_power_up_buttons, quiz_screen,
};
pub use time_fmt::{format_clock, format_date};
