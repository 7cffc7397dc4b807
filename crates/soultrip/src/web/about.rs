//! About page content: sections, team, statistics and core values.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::error::ApiError;
use super::extract::{JsonOrForm, MultipartForm, RecordId};
use super::state::AppState;
use crate::model::{SectionInput, StatInput, TeamMemberInput, ValueInput};
use crate::uploads::UploadKind;

type ApiResult = Result<Json<Value>, ApiError>;

fn added(what: &str, id: i64) -> Json<Value> {
    Json(json!({ "success": true, "message": format!("{what} added successfully"), "id": id }))
}

/// Success when a row was touched, 404 otherwise.
fn changed(found: bool, what: &str, verb: &str) -> ApiResult {
    if found {
        Ok(Json(json!({ "success": true, "message": format!("{what} {verb} successfully") })))
    } else {
        Err(ApiError::not_found(format!("{what} not found")))
    }
}

/// `POST /admin/about/content`
pub async fn add_section(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<SectionInput>,
) -> ApiResult {
    let id = state
        .storage
        .lock()
        .await
        .add_section(&input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to add content"))?;
    Ok(added("Content", id))
}

/// `POST /admin/about/content/{id}`
pub async fn update_section(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonOrForm(input): JsonOrForm<SectionInput>,
) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .update_section(id, &input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update content"))?;
    changed(found, "Content", "updated")
}

/// `DELETE /admin/about/content/{id}`
pub async fn delete_section(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .deactivate_section(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete content"))?;
    changed(found, "Content", "deleted")
}

/// Team fields from a multipart body, with the portrait stored first when
/// sent. Also returns the path of the stored portrait.
async fn team_input(
    state: &AppState,
    mut form: MultipartForm,
) -> Result<(TeamMemberInput, Option<String>), ApiError> {
    let mut input: TeamMemberInput = form.parse()?;
    input.validate()?;
    let Some(file) = form.take_file("image") else {
        return Ok((input, None));
    };
    let path = state
        .uploads
        .save(UploadKind::Team, &file)
        .await
        .map_err(|e| ApiError::with_fallback(e, "Failed to upload image"))?;
    input.image_url = Some(path.clone());
    Ok((input, Some(path)))
}

/// Drop a portrait stored for a request that did not go through.
async fn discard_portrait(state: &AppState, stored: Option<&str>) {
    if let Some(path) = stored {
        state.uploads.discard(path).await;
    }
}

/// `POST /admin/about/team`
pub async fn add_team_member(State(state): State<AppState>, form: MultipartForm) -> ApiResult {
    let (input, stored) = team_input(&state, form).await?;
    let result = state.storage.lock().await.add_team_member(&input);
    match result {
        Ok(id) => Ok(added("Team member", id)),
        Err(e) => {
            discard_portrait(&state, stored.as_deref()).await;
            Err(ApiError::with_fallback(e, "Failed to add team member"))
        }
    }
}

/// `POST /admin/about/team/{id}`
///
/// Without a new portrait the stored one is kept. A portrait sent for an
/// unknown member is removed again.
pub async fn update_team_member(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    form: MultipartForm,
) -> ApiResult {
    let (input, stored) = team_input(&state, form).await?;
    let result = state.storage.lock().await.update_team_member(id, &input);
    if !matches!(result, Ok(true)) {
        discard_portrait(&state, stored.as_deref()).await;
    }
    let found = result.map_err(|e| ApiError::with_fallback(e, "Failed to update team member"))?;
    changed(found, "Team member", "updated")
}

/// `DELETE /admin/about/team/{id}`
pub async fn delete_team_member(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .deactivate_team_member(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete team member"))?;
    changed(found, "Team member", "deleted")
}

/// `POST /admin/about/stats`
pub async fn add_stat(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<StatInput>,
) -> ApiResult {
    let id = state
        .storage
        .lock()
        .await
        .add_stat(&input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to add statistic"))?;
    Ok(added("Statistic", id))
}

/// `POST /admin/about/stats/{id}`
pub async fn update_stat(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonOrForm(input): JsonOrForm<StatInput>,
) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .update_stat(id, &input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update statistic"))?;
    changed(found, "Statistic", "updated")
}

/// `DELETE /admin/about/stats/{id}`
pub async fn delete_stat(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .deactivate_stat(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete statistic"))?;
    changed(found, "Statistic", "deleted")
}

/// `POST /admin/about/values`
pub async fn add_value(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<ValueInput>,
) -> ApiResult {
    let id = state
        .storage
        .lock()
        .await
        .add_value(&input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to add value"))?;
    Ok(added("Value", id))
}

/// `POST /admin/about/values/{id}`
pub async fn update_value(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonOrForm(input): JsonOrForm<ValueInput>,
) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .update_value(id, &input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update value"))?;
    changed(found, "Value", "updated")
}

/// `DELETE /admin/about/values/{id}`
pub async fn delete_value(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult {
    let found = state
        .storage
        .lock()
        .await
        .deactivate_value(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete value"))?;
    changed(found, "Value", "deleted")
}
