use crate::infra::{
    AppState, InMemoryAssessmentRepository, InMemoryAssignmentRepository, InMemoryChatRepository,
    InMemoryGoalRepository, InMemoryJournalRepository, InMemoryMoodRepository,
    InMemoryUserRepository,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;

use mindhaven::assessments::{assessment_router, AssessmentService};
use mindhaven::assignments::{assignment_router, AssignmentService};
use mindhaven::chat::{chat_router, ChatService, GeminiRelay};
use mindhaven::goals::{goal_router, GoalService};
use mindhaven::journal::{journal_router, JournalService};
use mindhaven::mood::{mood_router, MoodService};
use mindhaven::users::{auth_router, AccountService};

/// Fully wired service graph behind the HTTP surface.
pub(crate) struct Services {
    pub(crate) accounts: Arc<AccountService<InMemoryUserRepository>>,
    pub(crate) journal: Arc<JournalService<InMemoryJournalRepository>>,
    pub(crate) moods: Arc<MoodService<InMemoryMoodRepository>>,
    pub(crate) goals: Arc<GoalService<InMemoryGoalRepository>>,
    pub(crate) assignments: Arc<AssignmentService<InMemoryAssignmentRepository>>,
    pub(crate) assessments: Arc<AssessmentService<InMemoryAssessmentRepository>>,
    pub(crate) chat: Arc<ChatService<InMemoryChatRepository, GeminiRelay>>,
}

pub(crate) fn app_router(services: Services) -> Router {
    Router::new()
        .merge(auth_router(services.accounts))
        .merge(journal_router(services.journal))
        .merge(mood_router(services.moods))
        .merge(goal_router(services.goals))
        .merge(assignment_router(services.assignments))
        .merge(assessment_router(services.assessments))
        .merge(chat_router(services.chat))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
