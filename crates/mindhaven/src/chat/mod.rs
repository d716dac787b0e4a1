//! Supportive AI chat: conversations, sentiment-scored user messages, and
//! the relay to an external generative text service.

pub mod domain;
pub mod relay;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ChatMessage, Conversation, ConversationId, MessageId, Sender};
pub use relay::{ChatRelay, GeminiRelay, RelayError};
pub use repository::ChatRepository;
pub use router::chat_router;
pub use service::{ChatService, ChatServiceError};
