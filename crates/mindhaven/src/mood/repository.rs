use chrono::{DateTime, Utc};

use super::domain::MoodEntry;
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// Storage abstraction for mood entries. Entries are append-only.
pub trait MoodRepository: Send + Sync {
    fn insert(&self, entry: MoodEntry) -> Result<MoodEntry, StorageError>;
    /// Entries for a user, newest first.
    fn entries_for(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, StorageError>;
    /// Entries for a user within `[start, end]`, oldest first.
    fn entries_between(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEntry>, StorageError>;
}
