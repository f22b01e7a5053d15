//! Handlers for `/admin/detection`.
//!
//! Detections arrive already computed by the edge; the API stores them as
//! reported.

use axum::extract::{Query, State};
use crowdwatch_core::error::CoreError;
use crowdwatch_core::listing::id_filter;
use crowdwatch_core::pagination::Page;
use crowdwatch_db::models::detection::{
    Detection, DetectionFilter, DetectionInput, DetectionListItem,
};
use crowdwatch_db::repositories::DetectionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/detection`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionListParams {
    #[serde(flatten)]
    pub paging: PageParams,
    pub camera_id: Option<String>,
    pub entrance_id: Option<String>,
}

impl DetectionListParams {
    pub fn filter(&self) -> Result<DetectionFilter, CoreError> {
        Ok(DetectionFilter {
            camera_id: id_filter("cameraId", self.camera_id.as_deref())?,
            entrance_id: id_filter("entranceId", self.entrance_id.as_deref())?,
            deleted: self.paging.deleted(),
        })
    }
}

/// POST /api/v1/admin/detection
pub async fn register_detection(
    _auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<DetectionInput>,
) -> AppResult<ApiResponse<Detection>> {
    let detection = DetectionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        detection_id = detection.id,
        camera_id = detection.camera_id,
        count = detection.count,
        "Detection registered"
    );
    Ok(ApiResponse::created(detection, "Detection registered successfully"))
}

/// PUT /api/v1/admin/detection/{id}
pub async fn update_detection(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(input): ValidatedJson<DetectionInput>,
) -> AppResult<ApiResponse<Detection>> {
    let detection = DetectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Detection", id))?;
    tracing::info!(detection_id = id, by = auth.user_id, "Detection updated");
    Ok(ApiResponse::ok(detection, "Detection updated successfully"))
}

/// DELETE /api/v1/admin/detection/{id}
pub async fn delete_detection(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Detection>> {
    let detection = DetectionRepo::set_deleted(&state.pool, id, true)
        .await?
        .ok_or(CoreError::not_found("Detection", id))?;
    tracing::info!(detection_id = id, by = auth.user_id, "Detection deleted");
    Ok(ApiResponse::ok(detection, "Detection deleted successfully"))
}

/// PUT /api/v1/admin/detection/{id}/restore
pub async fn restore_detection(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Detection>> {
    let detection = DetectionRepo::set_deleted(&state.pool, id, false)
        .await?
        .ok_or(CoreError::not_found("Detection", id))?;
    tracing::info!(detection_id = id, by = auth.user_id, "Detection restored");
    Ok(ApiResponse::ok(detection, "Detection restored successfully"))
}

/// GET /api/v1/admin/detection/{id}
pub async fn get_detection(
    _auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Detection>> {
    let detection = DetectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Detection", id))?;
    Ok(ApiResponse::ok(detection, "Detection fetched successfully"))
}

/// GET /api/v1/admin/detection
///
/// Ordered by event timestamp, newest first.
pub async fn list_detections(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DetectionListParams>,
) -> AppResult<ApiResponse<Page<DetectionListItem>>> {
    let filter = params.filter()?;
    let page = DetectionRepo::list(&state.pool, &filter, params.paging.page_request())
        .await
        .map_err(AppError::fetching("detections"))?;
    Ok(ApiResponse::ok(page, "Detections fetched successfully"))
}
