use chrono::{DateTime, Utc};

use super::domain::{ChatMessage, Conversation, ConversationId};
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// Storage abstraction for conversations and messages. Messages are
/// append-only; conversations only mutate their activity timestamp.
pub trait ChatRepository: Send + Sync {
    fn insert_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StorageError>;
    fn conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Conversation>, StorageError>;
    /// Conversations for a user, most recent activity first.
    fn conversations_for(&self, user_id: &UserId) -> Result<Vec<Conversation>, StorageError>;
    fn touch_conversation(
        &self,
        conversation_id: &ConversationId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
    fn insert_message(&self, message: ChatMessage) -> Result<ChatMessage, StorageError>;
    /// Messages in a conversation, oldest first.
    fn messages_for(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ChatMessage>, StorageError>;
}
