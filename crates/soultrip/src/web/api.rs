//! JSON endpoints behind the admin session.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::extract::{JsonOrForm, MultipartForm, RecordId};
use super::state::AppState;
use crate::model::{Booking, BookingUpdate, InquiryStatus, InquiryStatusUpdate, Overview, Tour, TourInput};
use crate::uploads::UploadKind;

type ApiResult<T> = Result<Json<T>, ApiError>;

fn done(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}

/// `GET /api/admin/stats`
pub async fn stats(State(state): State<AppState>) -> ApiResult<Overview> {
    let overview = state
        .storage
        .lock()
        .await
        .overview()
        .map_err(|e| ApiError::with_fallback(e, "Failed to fetch stats"))?;
    Ok(Json(overview))
}

/// Query string of the admin tour list.
#[derive(Debug, Default, Deserialize)]
pub struct TourListQuery {
    /// Return at most this many tours.
    pub limit: Option<usize>,
}

/// `GET /api/admin/tours`
pub async fn list_tours(
    State(state): State<AppState>,
    Query(query): Query<TourListQuery>,
) -> ApiResult<Vec<Tour>> {
    let storage = state.storage.lock().await;
    let tours = match query.limit {
        Some(limit) => storage.list_recent_tours(limit),
        None => storage.list_all_tours(),
    }
    .map_err(|e| ApiError::with_fallback(e, "Failed to fetch tours"))?;
    Ok(Json(tours))
}

/// `POST /api/admin/tours`
pub async fn create_tour(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<TourInput>,
) -> ApiResult<Value> {
    let id = state
        .storage
        .lock()
        .await
        .create_tour(input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to add tour"))?;
    Ok(Json(json!({
        "success": true,
        "message": "Tour added successfully",
        "id": id,
    })))
}

/// `PUT /api/admin/tours/{id}`
pub async fn update_tour(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonOrForm(input): JsonOrForm<TourInput>,
) -> ApiResult<Value> {
    state
        .storage
        .lock()
        .await
        .update_tour(id, input)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update tour"))?;
    Ok(done("Tour updated successfully"))
}

/// `DELETE /api/admin/tours/{id}`
pub async fn delete_tour(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<Value> {
    let deleted = state
        .storage
        .lock()
        .await
        .delete_tour(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete tour"))?;
    if !deleted {
        return Err(ApiError::not_found("Tour not found"));
    }
    Ok(done("Tour deleted successfully"))
}

/// `GET /api/admin/bookings/{id}`
pub async fn get_booking(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<Booking> {
    state
        .storage
        .lock()
        .await
        .get_booking(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to fetch booking"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Booking not found"))
}

/// `PUT /api/admin/bookings/{id}`
pub async fn update_booking(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonOrForm(update): JsonOrForm<BookingUpdate>,
) -> ApiResult<Value> {
    state
        .storage
        .lock()
        .await
        .update_booking(id, update)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update booking"))?;
    Ok(done("Booking updated successfully"))
}

/// `DELETE /api/admin/bookings/{id}`
pub async fn delete_booking(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Value> {
    let deleted = state
        .storage
        .lock()
        .await
        .delete_booking(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete booking"))?;
    if !deleted {
        return Err(ApiError::not_found("Booking not found"));
    }
    Ok(done("Booking deleted successfully"))
}

/// `PUT /api/admin/contacts/{id}`
pub async fn update_contact(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonOrForm(update): JsonOrForm<InquiryStatusUpdate>,
) -> ApiResult<Value> {
    let status: InquiryStatus = update
        .status
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid status value"))?;
    state
        .storage
        .lock()
        .await
        .update_inquiry_status(id, status)
        .map_err(|e| ApiError::with_fallback(e, "Failed to update contact status"))?;
    Ok(done("Contact status updated successfully"))
}

/// `DELETE /api/admin/contacts/{id}`
pub async fn delete_contact(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Value> {
    let deleted = state
        .storage
        .lock()
        .await
        .delete_inquiry(id)
        .map_err(|e| ApiError::with_fallback(e, "Failed to delete contact inquiry"))?;
    if !deleted {
        return Err(ApiError::not_found("Contact inquiry not found"));
    }
    Ok(done("Contact inquiry deleted successfully"))
}

/// `POST /api/upload-image`
pub async fn upload_image(State(state): State<AppState>, mut form: MultipartForm) -> ApiResult<Value> {
    let file = form
        .take_file("image")
        .ok_or_else(|| ApiError::bad_request("No image file provided"))?;
    let path = state
        .uploads
        .save(UploadKind::Tour, &file)
        .await
        .map_err(|e| ApiError::with_fallback(e, "Failed to upload image"))?;
    Ok(Json(json!({
        "success": true,
        "imagePath": path,
        "message": "Image uploaded successfully",
    })))
}
