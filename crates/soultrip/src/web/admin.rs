//! Admin login and back office pages.

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{info, warn};

use super::error::{ApiError, PageError};
use super::extract::JsonOrForm;
use super::middleware::{is_logged_in, session_token};
use super::state::AppState;
use crate::auth::{clear_session_cookie, session_cookie};
use crate::storage::Storage;
use crate::views;
use crate::views::admin::LoginNotice;

/// Rows shown in each dashboard panel.
const DASHBOARD_ROWS: usize = 5;

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// `unauthorized` or `invalid`.
    pub error: Option<String>,
}

/// `GET /admin/login`
pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Response {
    if is_logged_in(&state, &headers).await {
        return Redirect::to("/admin/dashboard").into_response();
    }
    let notice = LoginNotice::from_query(query.error.as_deref());
    Html(views::admin::login(notice)).into_response()
}

/// Submitted credentials.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// `POST /admin/login`
pub async fn login(
    State(state): State<AppState>,
    body: Result<JsonOrForm<LoginForm>, ApiError>,
) -> Response {
    let invalid = Redirect::to("/admin/login?error=invalid");
    let Ok(JsonOrForm(form)) = body else {
        return invalid.into_response();
    };
    if !state.credentials.verify(&form.username, &form.password) {
        warn!("Failed admin login for {:?}", form.username);
        return invalid.into_response();
    }

    let token = state.sessions.create(&form.username).await;
    let cookie = session_cookie(&token, state.sessions.ttl(), state.secure_cookies);
    ([(SET_COOKIE, cookie)], Redirect::to("/admin/dashboard")).into_response()
}

/// `POST /admin/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.sessions.destroy(token).await {
            info!("Admin logged out");
        }
    }
    let cookie = clear_session_cookie(state.secure_cookies);
    ([(SET_COOKIE, cookie)], Redirect::to("/admin/login")).into_response()
}

/// `GET /admin/dashboard`
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let page = render_dashboard(&*state.storage.lock().await)
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(page))
}

fn render_dashboard(storage: &Storage) -> crate::Result<String> {
    let stats = storage.dashboard_stats()?;
    let bookings = storage.recent_bookings(DASHBOARD_ROWS)?;
    let inquiries = storage.recent_inquiries(DASHBOARD_ROWS)?;
    let tours = storage.list_recent_tours(DASHBOARD_ROWS)?;
    Ok(views::admin::dashboard(&stats, &bookings, &inquiries, &tours))
}

/// `GET /admin/tours`
pub async fn tours(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let tours = state
        .storage
        .lock()
        .await
        .list_all_tours()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::tours(&tours)))
}

/// `GET /admin/tours/add`
pub async fn add_tour(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let categories = state
        .storage
        .lock()
        .await
        .list_categories()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::tour_form(None, &categories)))
}

/// `GET /admin/tours/edit/{id}`
pub async fn edit_tour(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let storage = state.storage.lock().await;
    let tour = storage
        .get_tour(id)
        .map_err(|e| PageError::new(&site, &e))?
        .ok_or_else(|| PageError::not_found(&site))?;
    let categories = storage
        .list_categories()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::tour_form(Some(&tour), &categories)))
}

/// `GET /admin/bookings`
pub async fn bookings(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let bookings = state
        .storage
        .lock()
        .await
        .list_bookings()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::bookings(&bookings)))
}

/// `GET /admin/contacts`
pub async fn contacts(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let inquiries = state
        .storage
        .lock()
        .await
        .list_inquiries()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::contacts(&inquiries)))
}

/// `GET /admin/about`
pub async fn about(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let page = state
        .storage
        .lock()
        .await
        .about_page()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::about(&page)))
}

/// `GET /admin/analytics`
pub async fn analytics(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let analytics = state
        .storage
        .lock()
        .await
        .analytics()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::analytics(&analytics)))
}
