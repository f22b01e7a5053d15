//! Handlers for `/admin/entrance`.

use axum::extract::{Query, State};
use crowdwatch_core::error::CoreError;
use crowdwatch_core::pagination::Page;
use crowdwatch_db::models::entrance::{Entrance, EntranceFilter, EntranceInput};
use crowdwatch_db::repositories::EntranceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/admin/entrance
pub async fn register_entrance(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<EntranceInput>,
) -> AppResult<ApiResponse<Entrance>> {
    let entrance = EntranceRepo::create(&state.pool, &input).await?;
    tracing::info!(entrance_id = entrance.id, by = auth.user_id, "Entrance registered");
    Ok(ApiResponse::created(entrance, "Entrance registered successfully"))
}

/// PUT /api/v1/admin/entrance/{id}
///
/// Replaces every field; deleted entrances may be updated.
pub async fn update_entrance(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(input): ValidatedJson<EntranceInput>,
) -> AppResult<ApiResponse<Entrance>> {
    let entrance = EntranceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Entrance", id))?;
    tracing::info!(entrance_id = id, by = auth.user_id, "Entrance updated");
    Ok(ApiResponse::ok(entrance, "Entrance updated successfully"))
}

/// DELETE /api/v1/admin/entrance/{id}
pub async fn delete_entrance(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Entrance>> {
    let entrance = EntranceRepo::set_deleted(&state.pool, id, true)
        .await?
        .ok_or(CoreError::not_found("Entrance", id))?;
    tracing::info!(entrance_id = id, by = auth.user_id, "Entrance deleted");
    Ok(ApiResponse::ok(entrance, "Entrance deleted successfully"))
}

/// PUT /api/v1/admin/entrance/{id}/restore
pub async fn restore_entrance(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Entrance>> {
    let entrance = EntranceRepo::set_deleted(&state.pool, id, false)
        .await?
        .ok_or(CoreError::not_found("Entrance", id))?;
    tracing::info!(entrance_id = id, by = auth.user_id, "Entrance restored");
    Ok(ApiResponse::ok(entrance, "Entrance restored successfully"))
}

/// GET /api/v1/admin/entrance/{id}
pub async fn get_entrance(
    _auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Entrance>> {
    let entrance = EntranceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Entrance", id))?;
    Ok(ApiResponse::ok(entrance, "Entrance fetched successfully"))
}

/// GET /api/v1/admin/entrance
pub async fn list_entrances(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<ApiResponse<Page<Entrance>>> {
    let filter = EntranceFilter {
        deleted: params.deleted(),
    };
    let page = EntranceRepo::list(&state.pool, &filter, params.page_request())
        .await
        .map_err(AppError::fetching("entrances"))?;
    Ok(ApiResponse::ok(page, "Entrances fetched successfully"))
}
