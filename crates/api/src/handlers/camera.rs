//! Handlers for `/admin/camera`.

use axum::extract::{Query, State};
use crowdwatch_core::error::CoreError;
use crowdwatch_core::listing::{flag_if_non_empty, id_filter};
use crowdwatch_core::pagination::Page;
use crowdwatch_db::models::camera::{Camera, CameraFilter, CameraInput, CameraListItem};
use crowdwatch_db::repositories::CameraRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/camera`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraListParams {
    #[serde(flatten)]
    pub paging: PageParams,
    pub entrance_id: Option<String>,
    pub is_active: Option<String>,
}

impl CameraListParams {
    pub fn filter(&self) -> Result<CameraFilter, CoreError> {
        Ok(CameraFilter {
            entrance_id: id_filter("entranceId", self.entrance_id.as_deref())?,
            is_active: flag_if_non_empty(self.is_active.as_deref()),
            deleted: self.paging.deleted(),
        })
    }
}

/// POST /api/v1/admin/camera
///
/// A duplicate `deviceId` is rejected with 409.
pub async fn register_camera(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CameraInput>,
) -> AppResult<ApiResponse<Camera>> {
    let camera = CameraRepo::create(&state.pool, &input).await?;
    tracing::info!(camera_id = camera.id, device_id = %camera.device_id, by = auth.user_id, "Camera registered");
    Ok(ApiResponse::created(camera, "Camera registered successfully"))
}

/// PUT /api/v1/admin/camera/{id}
pub async fn update_camera(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(input): ValidatedJson<CameraInput>,
) -> AppResult<ApiResponse<Camera>> {
    let camera = CameraRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Camera", id))?;
    tracing::info!(camera_id = id, by = auth.user_id, "Camera updated");
    Ok(ApiResponse::ok(camera, "Camera updated successfully"))
}

/// DELETE /api/v1/admin/camera/{id}
pub async fn delete_camera(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Camera>> {
    let camera = CameraRepo::set_deleted(&state.pool, id, true)
        .await?
        .ok_or(CoreError::not_found("Camera", id))?;
    tracing::info!(camera_id = id, by = auth.user_id, "Camera deleted");
    Ok(ApiResponse::ok(camera, "Camera deleted successfully"))
}

/// PUT /api/v1/admin/camera/{id}/restore
pub async fn restore_camera(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Camera>> {
    let camera = CameraRepo::set_deleted(&state.pool, id, false)
        .await?
        .ok_or(CoreError::not_found("Camera", id))?;
    tracing::info!(camera_id = id, by = auth.user_id, "Camera restored");
    Ok(ApiResponse::ok(camera, "Camera restored successfully"))
}

/// GET /api/v1/admin/camera/{id}
pub async fn get_camera(
    _auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Camera>> {
    let camera = CameraRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Camera", id))?;
    Ok(ApiResponse::ok(camera, "Camera fetched successfully"))
}

/// GET /api/v1/admin/camera
///
/// Each row carries its entrance and newest detection, or `null` for either.
pub async fn list_cameras(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CameraListParams>,
) -> AppResult<ApiResponse<Page<CameraListItem>>> {
    let filter = params.filter()?;
    let page = CameraRepo::list(&state.pool, &filter, params.paging.page_request())
        .await
        .map_err(AppError::fetching("cameras"))?;
    Ok(ApiResponse::ok(page, "Cameras fetched successfully"))
}
