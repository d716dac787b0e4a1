//! Axum extractor that turns a `Bearer` header into a verified identity.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::TokenIssuer;
use crate::users::domain::UserId;

/// Verified identity attached to a request. Handlers that take this
/// extractor only run for callers holding a valid token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let issuer = parts.extensions.get::<TokenIssuer>().cloned().ok_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "token issuer not configured" })),
            )
                .into_response()
        })?;

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("Access denied. No token provided."))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Access denied. No token provided."))?;

        let claims = issuer
            .verify(token)
            .map_err(|_| unauthorized("Invalid token"))?;

        Ok(Self {
            user_id: UserId(claims.sub),
            username: claims.username,
        })
    }
}
