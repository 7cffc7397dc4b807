//! Public pages, the contact form and booking requests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::error::{status_for, ApiError, PageError};
use super::extract::JsonOrForm;
use super::state::AppState;
use crate::mail;
use crate::model::{BookingRequest, NewInquiry};
use crate::views;
use crate::views::public::ContactNotice;

const BOOKING_OK: &str =
    "Booking request submitted successfully! We will contact you to confirm details.";
const BOOKING_FAILED: &str =
    "Sorry, there was an error processing your booking. Please try again.";

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let tours = state
        .storage
        .lock()
        .await
        .list_active_tours()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::public::home(&site, &tours)))
}

/// Query string of the tour listing.
#[derive(Debug, Default, Deserialize)]
pub struct ToursQuery {
    /// Category name to filter by.
    pub category: Option<String>,
}

/// `GET /tours`
pub async fn tours(
    State(state): State<AppState>,
    Query(query): Query<ToursQuery>,
) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let category = query.category.filter(|c| !c.trim().is_empty());

    let storage = state.storage.lock().await;
    let tours = match category.as_deref() {
        Some(name) => storage.list_tours_by_category(name),
        None => storage.list_active_tours(),
    }
    .map_err(|e| PageError::new(&site, &e))?;
    let categories = storage
        .list_categories()
        .map_err(|e| PageError::new(&site, &e))?;
    drop(storage);

    Ok(Html(views::public::tours(
        &site,
        &tours,
        &categories,
        category.as_deref(),
    )))
}

/// `GET /tour/{id}`
pub async fn tour_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let Ok(id) = id.parse::<i64>() else {
        return Err(PageError::not_found(&site));
    };

    let storage = state.storage.lock().await;
    let tour = storage
        .get_active_tour(id)
        .map_err(|e| PageError::new(&site, &e))?
        .ok_or_else(|| PageError::not_found(&site))?;
    let gallery = storage
        .tour_gallery(id)
        .map_err(|e| PageError::new(&site, &e))?;
    drop(storage);

    Ok(Html(views::public::tour_detail(&site, &tour, &gallery)))
}

/// `GET /about`
///
/// A storage failure renders the page with empty lists.
pub async fn about(State(state): State<AppState>) -> Html<String> {
    let site = state.site().await;
    let page = state
        .storage
        .lock()
        .await
        .about_page()
        .unwrap_or_else(|e| {
            warn!("Failed to load about page content: {}", e);
            crate::model::AboutPage::default()
        });
    Html(views::public::about(&site, &page))
}

/// Query string of the contact page.
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    /// `true` after a stored submission.
    pub success: Option<String>,
    /// `true` after a rejected submission.
    pub error: Option<String>,
}

/// `GET /contact`
pub async fn contact(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Html<String> {
    let site = state.site().await;
    let notice = if query.success.as_deref() == Some("true") {
        Some(ContactNotice::Success)
    } else if query.error.as_deref() == Some("true") {
        Some(ContactNotice::Error)
    } else {
        None
    };
    Html(views::public::contact(&site, notice))
}

/// `POST /contact`
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<JsonOrForm<NewInquiry>, ApiError>,
) -> Redirect {
    let failed = Redirect::to("/contact?error=true");

    let Ok(JsonOrForm(inquiry)) = body else {
        return failed;
    };
    let inquiry = match inquiry.validate() {
        Ok(inquiry) => inquiry,
        Err(e) => {
            info!("Rejected contact form: {}", e);
            return failed;
        }
    };

    let stored = state.storage.lock().await.create_inquiry(inquiry.clone());
    if let Err(e) = stored {
        error!("Failed to store contact inquiry: {}", e);
        return failed;
    }

    let owner = state.owner_email().await;
    mail::deliver(
        state.mailer.as_ref(),
        mail::contact_notification(&inquiry, &owner),
    )
    .await;
    mail::deliver(state.mailer.as_ref(), mail::contact_auto_reply(&inquiry)).await;

    Redirect::to("/contact?success=true")
}

/// `POST /book`
pub async fn book(
    State(state): State<AppState>,
    body: Result<JsonOrForm<BookingRequest>, ApiError>,
) -> Response {
    let request = match body {
        Ok(JsonOrForm(request)) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": format!("Invalid booking request: {}", e.message()) })),
            )
                .into_response();
        }
    };

    let created = state.storage.lock().await.create_booking(request);
    match created {
        Ok(booking) => {
            let owner = state.owner_email().await;
            mail::deliver(
                state.mailer.as_ref(),
                mail::booking_notification(&booking, &owner),
            )
            .await;
            Json(json!({ "success": true, "message": BOOKING_OK })).into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            let message = if status.is_server_error() {
                error!("Failed to store booking: {}", e);
                BOOKING_FAILED.to_string()
            } else {
                e.to_string()
            };
            (status, Json(json!({ "success": false, "message": message }))).into_response()
        }
    }
}

/// Fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>) -> PageError {
    let site = state.site().await;
    PageError::not_found(&site)
}
