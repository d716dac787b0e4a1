use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Extension;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::assessments::router::assessment_router;
use crate::assessments::service::AssessmentService;

fn router_with_auth() -> (axum::Router, crate::auth::TokenIssuer) {
    let (service, _) = build_service();
    let issuer = issuer();
    let router = assessment_router(Arc::new(service)).layer(Extension(issuer.clone()));
    (router, issuer)
}

fn submit_request(authorization: Option<String>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::post("/api/v1/assessments/submit")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_scores_and_returns_created() {
    let (router, issuer) = router_with_auth();

    let response = router
        .oneshot(submit_request(
            Some(bearer(&issuer)),
            json!({ "typeId": "dep-screen", "answers": { "q1": "3", "q2": "9" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("score"), Some(&json!("6.00")));
    assert_eq!(payload.get("interpretation"), Some(&json!("Mild depression")));
    assert!(payload.get("assessmentId").is_some());
}

#[tokio::test]
async fn submit_route_rejects_empty_answers() {
    let (router, issuer) = router_with_auth();

    let response = router
        .oneshot(submit_request(
            Some(bearer(&issuer)),
            json!({ "typeId": "dep-screen", "answers": {} }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("Type ID and answers are required"))
    );
}

#[tokio::test]
async fn submit_route_reports_unknown_types_as_not_found() {
    let (router, issuer) = router_with_auth();

    let response = router
        .oneshot(submit_request(
            Some(bearer(&issuer)),
            json!({ "typeId": "missing", "answers": { "q1": "3" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("Assessment type not found"))
    );
}

#[tokio::test]
async fn routes_require_a_bearer_token() {
    let (router, _) = router_with_auth();

    let response = router
        .oneshot(submit_request(
            None,
            json!({ "typeId": "dep-screen", "answers": { "q1": "3" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn repository_failures_surface_as_internal_errors() {
    let issuer = issuer();
    let service = AssessmentService::new(Arc::new(UnavailableAssessments));
    let router = assessment_router(Arc::new(service)).layer(Extension(issuer.clone()));

    let response = router
        .oneshot(submit_request(
            Some(bearer(&issuer)),
            json!({ "typeId": "dep-screen", "answers": { "q1": "3" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn types_route_lists_the_catalog() {
    let (router, issuer) = router_with_auth();

    let request = Request::get("/api/v1/assessments/types")
        .header(header::AUTHORIZATION, bearer(&issuer))
        .body(Body::empty())
        .expect("request builds");
    let response = router.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let types = payload.as_array().expect("array of types");
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].get("name"), Some(&json!("Depression Screener")));
}
