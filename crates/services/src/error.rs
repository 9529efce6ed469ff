//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CategoryId, ChallengeId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the quiz session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
    #[error("a quiz is already in progress; reset it first")]
    SessionInProgress,
}

/// Errors emitted by `ChallengeService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error("daily challenge {0} not found")]
    NotFound(ChallengeId),
    #[error("daily challenge {0} is already completed")]
    AlreadyCompleted(ChallengeId),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] quiz_core::Error),
}
