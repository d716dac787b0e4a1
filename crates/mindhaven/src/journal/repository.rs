use super::domain::JournalEntry;
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// Storage abstraction for journal entries. Entries are append-only.
pub trait JournalRepository: Send + Sync {
    fn insert(&self, entry: JournalEntry) -> Result<JournalEntry, StorageError>;
    /// Entries for a user, newest first.
    fn entries_for(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, StorageError>;
}
