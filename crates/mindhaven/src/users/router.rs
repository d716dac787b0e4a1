use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{Credentials, Registration};
use super::repository::UserRepository;
use super::service::{AccountService, AccountServiceError, AuthSession};
use crate::auth::AuthenticatedUser;

/// Router builder exposing registration, login, and profile endpoints.
pub fn auth_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/v1/auth/register", post(register_handler::<R>))
        .route("/api/v1/auth/login", post(login_handler::<R>))
        .route("/api/v1/auth/profile", get(profile_handler::<R>))
        .with_state(service)
}

fn session_body(message: &str, session: AuthSession) -> serde_json::Value {
    json!({
        "message": message,
        "token": session.token,
        "user": session.user,
    })
}

fn error_status(error: &AccountServiceError) -> StatusCode {
    match error {
        AccountServiceError::MissingFields
        | AccountServiceError::UsernameTooShort
        | AccountServiceError::InvalidEmail
        | AccountServiceError::PasswordTooShort => StatusCode::BAD_REQUEST,
        AccountServiceError::EmailInUse => StatusCode::CONFLICT,
        AccountServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountServiceError::UnknownUser => StatusCode::NOT_FOUND,
        AccountServiceError::Auth(_) | AccountServiceError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: AccountServiceError) -> Response {
    let status = error_status(&error);
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(registration): Json<Registration>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.register(registration) {
        Ok(session) => (
            StatusCode::CREATED,
            Json(session_body("User registered successfully", session)),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(credentials): Json<Credentials>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.login(credentials) {
        Ok(session) => Json(session_body("Login successful", session)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    user: AuthenticatedUser,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.profile(&user.user_id) {
        Ok(profile) => Json(profile).into_response(),
        Err(error) => error_response(error),
    }
}
