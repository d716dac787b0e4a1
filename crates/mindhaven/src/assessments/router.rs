use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::AssessmentTypeId;
use super::repository::AssessmentRepository;
use super::service::{AssessmentService, AssessmentServiceError, SubmissionRequest};
use crate::auth::AuthenticatedUser;

/// Router builder exposing the questionnaire catalog, submission, and
/// history endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments/types", get(types_handler::<R>))
        .route(
            "/api/v1/assessments/types/:type_id/questions",
            get(questions_handler::<R>),
        )
        .route("/api/v1/assessments/submit", post(submit_handler::<R>))
        .route("/api/v1/assessments/history", get(history_handler::<R>))
        .with_state(service)
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match error {
        AssessmentServiceError::EmptyAnswers => StatusCode::BAD_REQUEST,
        AssessmentServiceError::UnknownType => StatusCode::NOT_FOUND,
        AssessmentServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn types_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    _user: AuthenticatedUser,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.types() {
        Ok(types) => Json(types).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    _user: AuthenticatedUser,
    Path(type_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.questions(&AssessmentTypeId(type_id)) {
        Ok(questions) => Json(questions).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    user: AuthenticatedUser,
    Json(request): Json<SubmissionRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.submit(&user.user_id, request) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.history(&user.user_id) {
        Ok(history) => Json(history).into_response(),
        Err(error) => error_response(error),
    }
}
