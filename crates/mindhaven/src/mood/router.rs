use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::repository::MoodRepository;
use super::service::{MoodService, MoodServiceError};
use crate::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateMoodRequest {
    pub(crate) mood_score: i64,
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

/// Router builder exposing mood logging and the dashboard statistics.
pub fn mood_router<R>(service: Arc<MoodService<R>>) -> Router
where
    R: MoodRepository + 'static,
{
    Router::new()
        .route("/api/v1/moods", post(create_handler::<R>).get(list_handler::<R>))
        .route("/api/v1/moods/stats", get(stats_handler::<R>))
        .with_state(service)
}

fn error_response(error: MoodServiceError) -> Response {
    let status = match error {
        MoodServiceError::ScoreOutOfRange => StatusCode::BAD_REQUEST,
        MoodServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<MoodService<R>>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateMoodRequest>,
) -> Response
where
    R: MoodRepository + 'static,
{
    match service.create_entry(&user.user_id, request.mood_score, request.notes) {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Mood entry created successfully",
                "entryId": entry.entry_id,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<MoodService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: MoodRepository + 'static,
{
    match service.entries(&user.user_id) {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<MoodService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: MoodRepository + 'static,
{
    match service.stats(&user.user_id, Utc::now()) {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error_response(error),
    }
}
