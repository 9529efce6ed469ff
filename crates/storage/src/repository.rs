use async_trait::async_trait;
use quiz_core::model::UserProgress;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::record::ProgressRecord;

/// Key of the single slot that holds the progress snapshot.
pub const PROGRESS_SLOT: &str = "userState";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A local string key-value store. Each key holds one opaque value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_slot(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn put_slot(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn delete_slot(&self, key: &str) -> Result<(), StorageError>;
}

/// Repository contract for the user progress snapshot.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the slot holds a malformed
    /// or incompatible record, or other storage errors.
    async fn load_progress(&self) -> Result<Option<UserProgress>, StorageError>;

    /// Replace the stored snapshot with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError>;

    /// Drop the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be cleared.
    async fn clear_progress(&self) -> Result<(), StorageError>;
}

#[async_trait]
impl<S> ProgressRepository for S
where
    S: KeyValueStore,
{
    async fn load_progress(&self) -> Result<Option<UserProgress>, StorageError> {
        let Some(raw) = self.get_slot(PROGRESS_SLOT).await? else {
            return Ok(None);
        };
        let record = ProgressRecord::from_json(&raw)?;
        record.into_progress().map(Some)
    }

    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let raw = ProgressRecord::from_progress(progress).to_json()?;
        self.put_slot(PROGRESS_SLOT, &raw).await?;
        tracing::debug!(
            slot = PROGRESS_SLOT,
            bytes = raw.len(),
            "progress snapshot written"
        );
        Ok(())
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        self.delete_slot(PROGRESS_SLOT).await
    }
}

/// Simple in-memory slot store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete_slot(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Storage handles behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn KeyValueStore>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryRepository::new())
    }

    /// Share one slot store for both raw and typed access.
    #[must_use]
    pub fn from_store<S>(store: S) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        let slots: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(store);
        Self { slots, progress }
    }
}
