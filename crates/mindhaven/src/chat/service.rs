use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::error;

use super::domain::{ChatMessage, Conversation, ConversationId, MessageId, Sender};
use super::relay::ChatRelay;
use super::repository::ChatRepository;
use crate::sentiment::SentimentAnalyzer;
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// First message in every new conversation, authored by the assistant.
const WELCOME_MESSAGE: &str = "Hello! I'm here to listen and support you on your mental health journey. How are you feeling today?";

/// Substituted whenever the relay fails; the conversation never surfaces
/// an upstream error to the user.
const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble generating a response right now. Please try again later.";

const GREETING_WORDS: [&str; 4] = ["hello", "hi", "hey", "greetings"];

static CONVERSATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static MESSAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_conversation_id() -> ConversationId {
    let id = CONVERSATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ConversationId(format!("conv-{id:06}"))
}

fn next_message_id() -> MessageId {
    let id = MESSAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MessageId(format!("msg-{id:06}"))
}

/// Service composing conversation storage, sentiment capture, and the
/// generative relay.
pub struct ChatService<R, L> {
    repository: Arc<R>,
    relay: Arc<L>,
    analyzer: SentimentAnalyzer,
}

impl<R, L> ChatService<R, L>
where
    R: ChatRepository + 'static,
    L: ChatRelay + 'static,
{
    pub fn new(repository: Arc<R>, relay: Arc<L>, analyzer: SentimentAnalyzer) -> Self {
        Self {
            repository,
            relay,
            analyzer,
        }
    }

    /// Open a new conversation seeded with the assistant's welcome message.
    pub fn start_conversation(
        &self,
        user_id: &UserId,
    ) -> Result<Conversation, ChatServiceError> {
        let now = Utc::now();
        let conversation = self.repository.insert_conversation(Conversation {
            conversation_id: next_conversation_id(),
            user_id: user_id.clone(),
            started_at: now,
            last_message_at: now,
        })?;

        self.repository.insert_message(ChatMessage {
            message_id: next_message_id(),
            conversation_id: conversation.conversation_id.clone(),
            sender: Sender::Ai,
            body: WELCOME_MESSAGE.to_string(),
            sentiment: None,
            sent_at: now,
        })?;

        Ok(conversation)
    }

    /// Conversations for a user, most recent activity first.
    pub fn conversations(&self, user_id: &UserId) -> Result<Vec<Conversation>, ChatServiceError> {
        Ok(self.repository.conversations_for(user_id)?)
    }

    /// Messages in an owned conversation, oldest first.
    pub fn messages(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ChatMessage>, ChatServiceError> {
        self.owned_conversation(user_id, conversation_id)?;
        Ok(self.repository.messages_for(conversation_id)?)
    }

    /// Record a sentiment-scored user message, obtain the assistant's
    /// reply, and return the stored reply message.
    pub async fn send_message(
        &self,
        user_id: &UserId,
        username: &str,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<ChatMessage, ChatServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatServiceError::EmptyMessage);
        }
        self.owned_conversation(user_id, conversation_id)?;

        let sentiment = self.analyzer.analyze(text);
        self.repository.insert_message(ChatMessage {
            message_id: next_message_id(),
            conversation_id: conversation_id.clone(),
            sender: Sender::User,
            body: text.to_string(),
            sentiment: Some(sentiment),
            sent_at: Utc::now(),
        })?;

        let reply_body = if let Some(greeting) = self.greeting_reply(username, text) {
            greeting
        } else {
            match self.relay.reply(text).await {
                Ok(reply) => reply,
                Err(err) => {
                    error!(error = %err, "chat relay failed, substituting fallback reply");
                    FALLBACK_REPLY.to_string()
                }
            }
        };

        let reply = self.repository.insert_message(ChatMessage {
            message_id: next_message_id(),
            conversation_id: conversation_id.clone(),
            sender: Sender::Ai,
            body: reply_body,
            sentiment: None,
            sent_at: Utc::now(),
        })?;

        self.repository
            .touch_conversation(conversation_id, reply.sent_at)?;

        Ok(reply)
    }

    /// Plain greetings are answered locally without a relay round trip.
    fn greeting_reply(&self, username: &str, text: &str) -> Option<String> {
        let is_greeting = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| {
                GREETING_WORDS
                    .iter()
                    .any(|word| token.eq_ignore_ascii_case(word))
            });

        is_greeting.then(|| {
            format!("Hello {username}! How can I help you with your mental health journey today?")
        })
    }

    fn owned_conversation(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> Result<Conversation, ChatServiceError> {
        self.repository
            .conversation(conversation_id)?
            .filter(|conversation| &conversation.user_id == user_id)
            .ok_or(ChatServiceError::UnknownConversation)
    }
}

/// Error raised by the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("Conversation ID and message text are required")]
    EmptyMessage,
    #[error("Conversation not found")]
    UnknownConversation,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::relay::RelayError;
    use crate::sentiment::SentimentLabel;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryChat {
        conversations: Mutex<Vec<Conversation>>,
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl ChatRepository for MemoryChat {
        fn insert_conversation(
            &self,
            conversation: Conversation,
        ) -> Result<Conversation, StorageError> {
            let mut guard = self.conversations.lock().expect("chat mutex poisoned");
            guard.push(conversation.clone());
            Ok(conversation)
        }

        fn conversation(
            &self,
            conversation_id: &ConversationId,
        ) -> Result<Option<Conversation>, StorageError> {
            let guard = self.conversations.lock().expect("chat mutex poisoned");
            Ok(guard
                .iter()
                .find(|conv| &conv.conversation_id == conversation_id)
                .cloned())
        }

        fn conversations_for(&self, user_id: &UserId) -> Result<Vec<Conversation>, StorageError> {
            let guard = self.conversations.lock().expect("chat mutex poisoned");
            let mut conversations: Vec<Conversation> = guard
                .iter()
                .filter(|conv| &conv.user_id == user_id)
                .cloned()
                .collect();
            conversations.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
            Ok(conversations)
        }

        fn touch_conversation(
            &self,
            conversation_id: &ConversationId,
            at: DateTime<Utc>,
        ) -> Result<(), StorageError> {
            let mut guard = self.conversations.lock().expect("chat mutex poisoned");
            match guard
                .iter_mut()
                .find(|conv| &conv.conversation_id == conversation_id)
            {
                Some(conv) => {
                    conv.last_message_at = at;
                    Ok(())
                }
                None => Err(StorageError::NotFound),
            }
        }

        fn insert_message(&self, message: ChatMessage) -> Result<ChatMessage, StorageError> {
            let mut guard = self.messages.lock().expect("chat mutex poisoned");
            guard.push(message.clone());
            Ok(message)
        }

        fn messages_for(
            &self,
            conversation_id: &ConversationId,
        ) -> Result<Vec<ChatMessage>, StorageError> {
            let guard = self.messages.lock().expect("chat mutex poisoned");
            Ok(guard
                .iter()
                .filter(|message| &message.conversation_id == conversation_id)
                .cloned()
                .collect())
        }
    }

    struct EchoRelay;

    #[async_trait]
    impl ChatRelay for EchoRelay {
        async fn reply(&self, message: &str) -> Result<String, RelayError> {
            Ok(format!("echo: {message}"))
        }
    }

    struct FailingRelay;

    #[async_trait]
    impl ChatRelay for FailingRelay {
        async fn reply(&self, _message: &str) -> Result<String, RelayError> {
            Err(RelayError::Unavailable("upstream down".to_string()))
        }
    }

    fn user() -> UserId {
        UserId("user-000001".to_string())
    }

    fn service<L: ChatRelay + 'static>(relay: L) -> (ChatService<MemoryChat, L>, Arc<MemoryChat>) {
        let repository = Arc::new(MemoryChat::default());
        let service = ChatService::new(
            repository.clone(),
            Arc::new(relay),
            SentimentAnalyzer::bundled(),
        );
        (service, repository)
    }

    #[test]
    fn new_conversations_open_with_the_welcome_message() {
        let (service, repository) = service(EchoRelay);
        let conversation = service.start_conversation(&user()).expect("starts");

        let messages = repository
            .messages_for(&conversation.conversation_id)
            .expect("messages load");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Ai);
        assert!(messages[0].body.starts_with("Hello! I'm here to listen"));
        assert!(messages[0].sentiment.is_none());
    }

    #[tokio::test]
    async fn user_messages_are_scored_and_relayed() {
        let (service, repository) = service(EchoRelay);
        let conversation = service.start_conversation(&user()).expect("starts");

        let reply = service
            .send_message(
                &user(),
                "casey",
                &conversation.conversation_id,
                "everything feels hopeless and dark lately",
            )
            .await
            .expect("message sends");

        assert_eq!(reply.sender, Sender::Ai);
        assert!(reply.body.starts_with("echo:"));
        assert!(reply.sentiment.is_none());

        let messages = repository
            .messages_for(&conversation.conversation_id)
            .expect("messages load");
        let user_message = messages
            .iter()
            .find(|message| message.sender == Sender::User)
            .expect("user message stored");
        let report = user_message.sentiment.expect("user message scored");
        assert_eq!(report.sentiment, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn relay_failures_become_the_fixed_apology() {
        let (service, _) = service(FailingRelay);
        let conversation = service.start_conversation(&user()).expect("starts");

        let reply = service
            .send_message(
                &user(),
                "casey",
                &conversation.conversation_id,
                "can you suggest a breathing exercise",
            )
            .await
            .expect("message still succeeds");

        assert_eq!(reply.body, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn greetings_short_circuit_the_relay() {
        // The failing relay proves the reply never reached it.
        let (service, _) = service(FailingRelay);
        let conversation = service.start_conversation(&user()).expect("starts");

        let reply = service
            .send_message(&user(), "casey", &conversation.conversation_id, "Hey there!")
            .await
            .expect("message sends");

        assert_eq!(
            reply.body,
            "Hello casey! How can I help you with your mental health journey today?"
        );
    }

    #[tokio::test]
    async fn empty_messages_are_rejected() {
        let (service, _) = service(EchoRelay);
        let conversation = service.start_conversation(&user()).expect("starts");

        let err = service
            .send_message(&user(), "casey", &conversation.conversation_id, "   ")
            .await
            .expect_err("must reject");
        assert!(matches!(err, ChatServiceError::EmptyMessage));
    }

    #[tokio::test]
    async fn foreign_conversations_read_as_missing() {
        let (service, _) = service(EchoRelay);
        let conversation = service.start_conversation(&user()).expect("starts");

        let other = UserId("user-000002".to_string());
        let err = service
            .send_message(&other, "riley", &conversation.conversation_id, "hello")
            .await
            .expect_err("must hide foreign rows");
        assert!(matches!(err, ChatServiceError::UnknownConversation));

        let err = service
            .messages(&other, &conversation.conversation_id)
            .expect_err("must hide foreign rows");
        assert!(matches!(err, ChatServiceError::UnknownConversation));
    }

    #[tokio::test]
    async fn sending_updates_conversation_activity() {
        let (service, repository) = service(EchoRelay);
        let conversation = service.start_conversation(&user()).expect("starts");
        let started = conversation.last_message_at;

        let reply = service
            .send_message(&user(), "casey", &conversation.conversation_id, "an update")
            .await
            .expect("message sends");

        let stored = repository
            .conversation(&conversation.conversation_id)
            .expect("conversation loads")
            .expect("conversation exists");
        assert_eq!(stored.last_message_at, reply.sent_at);
        assert!(stored.last_message_at >= started);
    }
}
