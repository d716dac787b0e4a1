use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::ConversationId;
use super::relay::ChatRelay;
use super::repository::ChatRepository;
use super::service::{ChatService, ChatServiceError};
use crate::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageRequest {
    #[serde(rename = "conversationId")]
    pub(crate) conversation_id: ConversationId,
    #[serde(rename = "messageText")]
    pub(crate) message_text: String,
}

/// Router builder exposing the conversation and messaging endpoints.
pub fn chat_router<R, L>(service: Arc<ChatService<R, L>>) -> Router
where
    R: ChatRepository + 'static,
    L: ChatRelay + 'static,
{
    Router::new()
        .route(
            "/api/v1/chat/conversations",
            get(conversations_handler::<R, L>).post(start_conversation_handler::<R, L>),
        )
        .route(
            "/api/v1/chat/conversations/:conversation_id/messages",
            get(messages_handler::<R, L>),
        )
        .route("/api/v1/chat/messages", post(send_message_handler::<R, L>))
        .with_state(service)
}

fn error_response(error: ChatServiceError) -> Response {
    let status = match error {
        ChatServiceError::EmptyMessage => StatusCode::BAD_REQUEST,
        ChatServiceError::UnknownConversation => StatusCode::NOT_FOUND,
        ChatServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn conversations_handler<R, L>(
    State(service): State<Arc<ChatService<R, L>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: ChatRepository + 'static,
    L: ChatRelay + 'static,
{
    match service.conversations(&user.user_id) {
        Ok(conversations) => Json(conversations).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn start_conversation_handler<R, L>(
    State(service): State<Arc<ChatService<R, L>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: ChatRepository + 'static,
    L: ChatRelay + 'static,
{
    match service.start_conversation(&user.user_id) {
        Ok(conversation) => (StatusCode::CREATED, Json(conversation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn messages_handler<R, L>(
    State(service): State<Arc<ChatService<R, L>>>,
    user: AuthenticatedUser,
    Path(conversation_id): Path<String>,
) -> Response
where
    R: ChatRepository + 'static,
    L: ChatRelay + 'static,
{
    match service.messages(&user.user_id, &ConversationId(conversation_id)) {
        Ok(messages) => Json(messages).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn send_message_handler<R, L>(
    State(service): State<Arc<ChatService<R, L>>>,
    user: AuthenticatedUser,
    Json(request): Json<SendMessageRequest>,
) -> Response
where
    R: ChatRepository + 'static,
    L: ChatRelay + 'static,
{
    match service
        .send_message(
            &user.user_id,
            &user.username,
            &request.conversation_id,
            &request.message_text,
        )
        .await
    {
        Ok(reply) => Json(reply).into_response(),
        Err(error) => error_response(error),
    }
}
