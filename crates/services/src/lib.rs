#![forbid(unsafe_code)]

pub mod achievements;
pub mod app_services;
pub mod challenge_service;
pub mod config;
pub mod error;
pub mod leaderboard_service;
pub mod progress_store;
pub mod quiz;

pub use quiz_core::Clock;

pub use achievements::{AchievementEvaluator, EvaluationTrigger, UnlockQueue};
pub use app_services::AppServices;
pub use challenge_service::ChallengeService;
pub use config::QuizConfig;
pub use error::{AppServicesError, ChallengeError, QuizError};
pub use leaderboard_service::LeaderboardService;
pub use progress_store::{ProgressStore, Theme, ThemeSink, WatchThemeSink};
pub use quiz::{
    AnswerRecord, PowerUpOutcome, QuizController, QuizPhase, QuizSession, QuizSnapshot,
    SubmitOutcome,
};
