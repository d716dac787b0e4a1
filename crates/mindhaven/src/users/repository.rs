use super::domain::{UserAccount, UserId};
use crate::storage::StorageError;

/// Storage abstraction for account rows. Email addresses are unique;
/// `insert` reports a duplicate as [`StorageError::Conflict`].
pub trait UserRepository: Send + Sync {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, StorageError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StorageError>;
    fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StorageError>;
}
