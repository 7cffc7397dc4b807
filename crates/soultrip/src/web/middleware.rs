//! Session guard and rate limiting layers.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{COOKIE, RETRY_AFTER};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use super::error::ApiError;
use super::state::AppState;
use crate::auth::{cookie_value, SESSION_COOKIE};
use crate::rate_limit::{RateLimitResult, RateLimiter};

/// The session token from the request cookies.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| cookie_value(header, SESSION_COOKIE))
}

/// Whether the request carries a live admin session.
pub async fn is_logged_in(state: &AppState, headers: &HeaderMap) -> bool {
    match session_token(headers) {
        Some(token) => state.sessions.validate(token).await.is_some(),
        None => false,
    }
}

/// Let admin requests through; send pages to the login form and answer API
/// calls with 401.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if is_logged_in(&state, req.headers()).await {
        return next.run(req).await;
    }
    debug!("Rejected unauthenticated request to {}", req.uri().path());
    if req.uri().path().starts_with("/api/") {
        ApiError::unauthorized().into_response()
    } else {
        Redirect::to("/admin/login?error=unauthorized").into_response()
    }
}

fn client_ip(req: &Request) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

async fn limit(limiter: &RateLimiter, message: &str, req: Request, next: Next) -> Response {
    let Some(ip) = client_ip(&req) else {
        return next.run(req).await;
    };
    match limiter.check(ip).await {
        RateLimitResult::Allowed => next.run(req).await,
        RateLimitResult::Limited { retry_after, limit } => {
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": message, "retryAfter": retry_after })),
            )
                .into_response();
            let headers = response.headers_mut();
            headers.insert(RETRY_AFTER, HeaderValue::from(retry_after));
            headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
            response
        }
    }
}

/// Limit applied to every request.
pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    limit(
        &state.limiter,
        "Too many requests from this IP, please try again later.",
        req,
        next,
    )
    .await
}

/// Stricter limit on settings writes.
pub async fn rate_limit_settings(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    limit(
        &state.settings_limiter,
        "Too many settings update requests, please try again later.",
        req,
        next,
    )
    .await
}
