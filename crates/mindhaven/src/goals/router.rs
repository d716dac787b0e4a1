use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use super::domain::{GoalDraft, GoalId};
use super::repository::GoalRepository;
use super::service::{GoalService, GoalServiceError};
use crate::auth::AuthenticatedUser;

/// Router builder exposing goal CRUD endpoints.
pub fn goal_router<R>(service: Arc<GoalService<R>>) -> Router
where
    R: GoalRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/goals",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/v1/goals/:goal_id",
            axum::routing::put(update_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: GoalServiceError) -> Response {
    let status = match error {
        GoalServiceError::InvalidTitle | GoalServiceError::InvalidProgress => {
            StatusCode::BAD_REQUEST
        }
        GoalServiceError::UnknownGoal => StatusCode::NOT_FOUND,
        GoalServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<GoalService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: GoalRepository + 'static,
{
    match service.goals(&user.user_id) {
        Ok(goals) => Json(goals).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<GoalService<R>>>,
    user: AuthenticatedUser,
    Json(draft): Json<GoalDraft>,
) -> Response
where
    R: GoalRepository + 'static,
{
    match service.create(&user.user_id, draft) {
        Ok(goal) => (StatusCode::CREATED, Json(goal)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<GoalService<R>>>,
    user: AuthenticatedUser,
    Path(goal_id): Path<String>,
    Json(draft): Json<GoalDraft>,
) -> Response
where
    R: GoalRepository + 'static,
{
    match service.update(&user.user_id, &GoalId(goal_id), draft) {
        Ok(goal) => Json(goal).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<GoalService<R>>>,
    user: AuthenticatedUser,
    Path(goal_id): Path<String>,
) -> Response
where
    R: GoalRepository + 'static,
{
    match service.delete(&user.user_id, &GoalId(goal_id)) {
        Ok(()) => Json(json!({ "message": "Goal deleted successfully" })).into_response(),
        Err(error) => error_response(error),
    }
}
