use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssignmentDraft, AssignmentId};
use super::repository::AssignmentRepository;
use super::service::{AssignmentService, AssignmentServiceError};
use crate::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponsesRequest {
    pub(crate) assignment_id: AssignmentId,
    #[serde(default)]
    pub(crate) answers: BTreeMap<String, String>,
}

/// Router builder exposing assignment CRUD and the reflection flow.
pub fn assignment_router<R>(service: Arc<AssignmentService<R>>) -> Router
where
    R: AssignmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/assignments",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/v1/assessments/assignments/questions",
            get(questions_handler::<R>),
        )
        .route(
            "/api/v1/assessments/assignments/submit",
            post(submit_responses_handler::<R>),
        )
        .route(
            "/api/v1/assessments/assignments/:assignment_id",
            axum::routing::put(update_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: AssignmentServiceError) -> Response {
    let status = match error {
        AssignmentServiceError::MissingTitle | AssignmentServiceError::EmptyResponses => {
            StatusCode::BAD_REQUEST
        }
        AssignmentServiceError::UnknownAssignment => StatusCode::NOT_FOUND,
        AssignmentServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AssignmentService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: AssignmentRepository + 'static,
{
    match service.assignments(&user.user_id) {
        Ok(assignments) => Json(assignments).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<AssignmentService<R>>>,
    user: AuthenticatedUser,
    Json(draft): Json<AssignmentDraft>,
) -> Response
where
    R: AssignmentRepository + 'static,
{
    match service.create(&user.user_id, draft) {
        Ok(assignment) => (StatusCode::CREATED, Json(assignment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<AssignmentService<R>>>,
    user: AuthenticatedUser,
    Path(assignment_id): Path<String>,
    Json(draft): Json<AssignmentDraft>,
) -> Response
where
    R: AssignmentRepository + 'static,
{
    match service.update(&user.user_id, &AssignmentId(assignment_id), draft) {
        Ok(assignment) => Json(assignment).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<AssignmentService<R>>>,
    user: AuthenticatedUser,
    Path(assignment_id): Path<String>,
) -> Response
where
    R: AssignmentRepository + 'static,
{
    match service.delete(&user.user_id, &AssignmentId(assignment_id)) {
        Ok(()) => Json(json!({ "message": "Assignment deleted successfully" })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssignmentService<R>>>,
    _user: AuthenticatedUser,
) -> Response
where
    R: AssignmentRepository + 'static,
{
    Json(service.questions()).into_response()
}

pub(crate) async fn submit_responses_handler<R>(
    State(service): State<Arc<AssignmentService<R>>>,
    user: AuthenticatedUser,
    Json(request): Json<SubmitResponsesRequest>,
) -> Response
where
    R: AssignmentRepository + 'static,
{
    match service.submit_responses(&user.user_id, &request.assignment_id, request.answers) {
        Ok(count) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Responses saved", "count": count })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
