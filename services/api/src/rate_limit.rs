//! Per-IP request throttling.
//!
//! Three keyed limiters approximate the intended windows: a general API
//! allowance of ~100 requests per 15 minutes, 10 authentication attempts
//! per hour, and 20 journal entries per hour. Probe endpoints are exempt
//! so scrapers cannot exhaust the general allowance.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use serde_json::json;

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

const API_LIMIT_MESSAGE: &str =
    "Too many requests from this IP, please try again after 15 minutes";
const AUTH_LIMIT_MESSAGE: &str =
    "Too many authentication attempts, please try again after an hour";
const JOURNAL_LIMIT_MESSAGE: &str =
    "You have created too many journal entries, please try again later";

pub(crate) struct ApiRateLimits {
    api: KeyedLimiter,
    auth: KeyedLimiter,
    journal: KeyedLimiter,
}

fn nonzero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("rate limit constants are non-zero")
}

impl ApiRateLimits {
    pub(crate) fn new() -> Self {
        // Burst of 100, one token back every 9 seconds: ~100 per 15 minutes.
        let api_quota = Quota::with_period(Duration::from_secs(9))
            .expect("non-zero refill period")
            .allow_burst(nonzero(100));

        Self {
            api: RateLimiter::keyed(api_quota),
            auth: RateLimiter::keyed(Quota::per_hour(nonzero(10))),
            journal: RateLimiter::keyed(Quota::per_hour(nonzero(20))),
        }
    }

    /// Check every limiter that applies to this request; the most specific
    /// scope wins the rejection message.
    pub(crate) fn check(
        &self,
        method: &Method,
        path: &str,
        ip: IpAddr,
    ) -> Result<(), &'static str> {
        if is_auth_attempt(path) && self.auth.check_key(&ip).is_err() {
            return Err(AUTH_LIMIT_MESSAGE);
        }
        if is_journal_creation(method, path) && self.journal.check_key(&ip).is_err() {
            return Err(JOURNAL_LIMIT_MESSAGE);
        }
        if self.api.check_key(&ip).is_err() {
            return Err(API_LIMIT_MESSAGE);
        }
        Ok(())
    }
}

fn is_auth_attempt(path: &str) -> bool {
    matches!(path, "/api/v1/auth/register" | "/api/v1/auth/login")
}

fn is_journal_creation(method: &Method, path: &str) -> bool {
    method == Method::POST && path == "/api/v1/journal"
}

fn is_probe(path: &str) -> bool {
    matches!(path, "/health" | "/ready" | "/metrics")
}

pub(crate) async fn enforce(
    State(limits): State<Arc<ApiRateLimits>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if is_probe(&path) {
        return next.run(request).await;
    }

    if let Err(message) = limits.check(request.method(), &path, addr.ip()) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": message })),
        )
            .into_response();
    }

    next.run(request).await
}
