//! Website settings editor.
//!
//! Every write invalidates the settings cache so the public pages pick the
//! change up on their next render.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use super::error::{ApiError, PageError};
use super::extract::{JsonOrForm, MultipartForm};
use super::state::AppState;
use crate::model::SettingUpdate;
use crate::uploads::UploadKind;
use crate::views;

/// `GET /admin/settings`
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let site = state.site().await;
    let settings = state
        .storage
        .lock()
        .await
        .all_settings()
        .map_err(|e| PageError::new(&site, &e))?;
    Ok(Html(views::admin::settings(&settings)))
}

/// `POST /admin/settings/update`
pub async fn update(
    State(state): State<AppState>,
    JsonOrForm(update): JsonOrForm<SettingUpdate>,
) -> Result<Json<Value>, ApiError> {
    let (key, value) = update.into_parts()?;
    let updated = state
        .storage
        .lock()
        .await
        .update_setting(&key, &value)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update setting"))?;
    if !updated {
        return Err(ApiError::not_found("Setting not found"));
    }
    state.site.invalidate().await;
    info!("Setting {} updated", key);
    Ok(Json(json!({ "success": true, "message": "Setting updated successfully" })))
}

/// `GET /admin/settings/category/{category}`
pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let settings = state
        .storage
        .lock()
        .await
        .settings_by_category(&category)
        .map_err(|e| ApiError::with_fallback(e, "Failed to load category settings"))?;
    Ok(Json(json!({ "success": true, "settings": settings })))
}

/// `POST /admin/settings/upload-logo`
pub async fn upload_logo(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> Result<Json<Value>, ApiError> {
    let file = form
        .take_file("logo")
        .ok_or_else(|| ApiError::bad_request("No logo file uploaded"))?;
    let path = state
        .uploads
        .save(UploadKind::Logo, &file)
        .await
        .map_err(|e| ApiError::with_fallback(e, "Failed to upload logo"))?;

    state
        .storage
        .lock()
        .await
        .update_setting("site_logo", &path)
        .map_err(|e| ApiError::with_fallback(e, "Failed to upload logo"))?;
    state.site.invalidate().await;

    Ok(Json(json!({
        "success": true,
        "message": "Logo uploaded successfully",
        "logoPath": path,
    })))
}
