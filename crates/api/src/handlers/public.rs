//! Unauthenticated handlers.

use axum::extract::State;
use crowdwatch_db::models::camera::CameraLocation;
use crowdwatch_db::repositories::CameraRepo;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/public/camera
///
/// Where each active camera is and which entrance it watches.
pub async fn camera_locations(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CameraLocation>>> {
    let cameras = CameraRepo::list_locations(&state.pool).await?;
    Ok(ApiResponse::ok(cameras, "Camera fetched successfully"))
}
