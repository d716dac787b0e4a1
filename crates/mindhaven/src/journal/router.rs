use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::repository::JournalRepository;
use super::service::{JournalService, JournalServiceError};
use crate::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateEntryRequest {
    #[serde(rename = "entryText")]
    pub(crate) entry_text: String,
}

/// Router builder exposing journal creation, listing, and trend analysis.
pub fn journal_router<R>(service: Arc<JournalService<R>>) -> Router
where
    R: JournalRepository + 'static,
{
    Router::new()
        .route("/api/v1/journal", post(create_handler::<R>).get(list_handler::<R>))
        .route("/api/v1/journal/analysis", get(analysis_handler::<R>))
        .with_state(service)
}

fn error_response(error: JournalServiceError) -> Response {
    let status = match error {
        JournalServiceError::InvalidBody => StatusCode::BAD_REQUEST,
        JournalServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateEntryRequest>,
) -> Response
where
    R: JournalRepository + 'static,
{
    match service.create_entry(&user.user_id, &request.entry_text) {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Entry saved",
                "entryId": entry.entry_id,
                "sentiment": entry.sentiment.sentiment,
                "score": entry.sentiment.score,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: JournalRepository + 'static,
{
    match service.entries(&user.user_id) {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analysis_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: JournalRepository + 'static,
{
    match service.analysis(&user.user_id) {
        Ok(trends) => Json(trends).into_response(),
        Err(error) => error_response(error),
    }
}
