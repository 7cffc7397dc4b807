//! Library errors turned into HTTP responses.
//!
//! JSON endpoints answer with `{ "success": false, "error": ... }`; pages
//! render the error template inside the site layout.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::error::Error;
use crate::site::SiteSettings;
use crate::views;

/// Status code for a library error.
#[must_use]
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation { .. } | Error::Conflict { .. } => StatusCode::BAD_REQUEST,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::UploadRejected { too_large: true, .. } => StatusCode::PAYLOAD_TOO_LARGE,
        Error::UploadRejected { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error reply for JSON endpoints.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    has_bookings: bool,
}

impl ApiError {
    /// An error with an explicit status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            has_bookings: false,
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 401 for requests without an admin session.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication required")
    }

    /// Map a library error, replacing server-side failures with `fallback`.
    pub fn with_fallback(err: Error, fallback: &str) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!("{}: {}", fallback, err);
            return Self::new(status, fallback);
        }
        // Deleting a booked tour is the only conflict reachable over HTTP.
        let has_bookings = matches!(err, Error::Conflict { .. });
        Self {
            status,
            message: err.to_string(),
            has_bookings,
        }
    }

    /// Status this error answers with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::with_fallback(err, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.has_bookings {
            json!({ "success": false, "error": self.message, "hasBookings": true })
        } else {
            json!({ "success": false, "error": self.message })
        };
        (self.status, Json(body)).into_response()
    }
}

/// Error reply for HTML pages.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    html: String,
}

impl PageError {
    /// Render `err` inside the site layout.
    #[must_use]
    pub fn new(site: &SiteSettings, err: &Error) -> Self {
        let status = status_for(err);
        let html = match status {
            StatusCode::NOT_FOUND => views::public::not_found(site),
            s if s.is_server_error() => {
                error!("Page failed: {}", err);
                views::public::error_page(
                    site,
                    s.as_u16(),
                    "Something went wrong. Please try again later.",
                )
            }
            s => views::public::error_page(site, s.as_u16(), &err.to_string()),
        };
        Self { status, html }
    }

    /// The 404 page.
    #[must_use]
    pub fn not_found(site: &SiteSettings) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            html: views::public::not_found(site),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.html)).into_response()
    }
}
