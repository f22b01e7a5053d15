//! Handlers for `/admin/alert`.
//!
//! Registering an alert also pushes it to realtime subscribers: once to the
//! alert's entrance room and once to everyone.

use axum::extract::{Query, State};
use chrono::Utc;
use crowdwatch_core::alert::{resolved_at_for, ResolutionState};
use crowdwatch_core::error::CoreError;
use crowdwatch_core::listing::{flag_if_present, id_filter};
use crowdwatch_core::pagination::Page;
use crowdwatch_db::models::alert::{
    Alert, AlertFilter, AlertInput, AlertListItem, AlertSummary, BulkUpdateResult,
};
use crowdwatch_db::repositories::AlertRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/alert`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListParams {
    #[serde(flatten)]
    pub paging: PageParams,
    pub entrance_id: Option<String>,
    pub is_resolved: Option<String>,
    pub is_read: Option<String>,
}

impl AlertListParams {
    pub fn filter(&self) -> Result<AlertFilter, CoreError> {
        Ok(AlertFilter {
            entrance_id: id_filter("entranceId", self.entrance_id.as_deref())?,
            is_resolved: flag_if_present(self.is_resolved.as_deref()),
            is_read: flag_if_present(self.is_read.as_deref()),
            deleted: self.paging.deleted(),
        })
    }
}

/// POST /api/v1/admin/alert
pub async fn register_alert(
    _auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<AlertInput>,
) -> AppResult<ApiResponse<Alert>> {
    let resolved_at = resolved_at_for(
        ResolutionState::default(),
        input.is_resolved,
        input.resolved_at,
        Utc::now(),
    );
    let alert = AlertRepo::create(&state.pool, &input, resolved_at).await?;
    tracing::info!(
        alert_id = alert.id,
        entrance_id = alert.entrance_id,
        severity = %alert.severity,
        "Alert registered"
    );

    state.hub.publish_alert(&AlertSummary::from(&alert)).await;

    Ok(ApiResponse::created(alert, "Alert registered successfully"))
}

/// PUT /api/v1/admin/alert/{id}
///
/// `resolvedAt` is stamped the first time `isResolved` turns true and is
/// never cleared here. The stamp is decided inside the UPDATE itself.
pub async fn update_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(input): ValidatedJson<AlertInput>,
) -> AppResult<ApiResponse<Alert>> {
    let alert = AlertRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Alert", id))?;
    tracing::info!(alert_id = id, by = auth.user_id, "Alert updated");
    Ok(ApiResponse::ok(alert, "Alert updated successfully"))
}

/// DELETE /api/v1/admin/alert/{id}
pub async fn delete_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Alert>> {
    let alert = AlertRepo::set_deleted(&state.pool, id, true)
        .await?
        .ok_or(CoreError::not_found("Alert", id))?;
    tracing::info!(alert_id = id, by = auth.user_id, "Alert deleted");
    Ok(ApiResponse::ok(alert, "Alert deleted successfully"))
}

/// PUT /api/v1/admin/alert/{id}/restore
pub async fn restore_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Alert>> {
    let alert = AlertRepo::set_deleted(&state.pool, id, false)
        .await?
        .ok_or(CoreError::not_found("Alert", id))?;
    tracing::info!(alert_id = id, by = auth.user_id, "Alert restored");
    Ok(ApiResponse::ok(alert, "Alert restored successfully"))
}

/// GET /api/v1/admin/alert/{id}
pub async fn get_alert(
    _auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Alert>> {
    let alert = AlertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Alert", id))?;
    Ok(ApiResponse::ok(alert, "Alert fetched successfully"))
}

/// GET /api/v1/admin/alert
pub async fn list_alerts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> AppResult<ApiResponse<Page<AlertListItem>>> {
    let filter = params.filter()?;
    let page = AlertRepo::list(&state.pool, &filter, params.paging.page_request())
        .await
        .map_err(AppError::fetching("alerts"))?;
    Ok(ApiResponse::ok(page, "Alerts fetched successfully"))
}

/// POST /api/v1/admin/alert/mark-all-as-read
///
/// Global: every unread, non-deleted alert across all entrances.
pub async fn mark_all_as_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<BulkUpdateResult>> {
    let result = AlertRepo::mark_all_read(&state.pool).await?;
    tracing::info!(modified = result.modified, by = auth.user_id, "Alerts marked as read");
    Ok(ApiResponse::ok(result, "All alerts marked as read successfully"))
}

/// GET /api/v1/admin/alert/{entrance_id}/unread
pub async fn unread_alerts(
    _auth: AuthUser,
    State(state): State<AppState>,
    EntityId(entrance_id): EntityId,
) -> AppResult<ApiResponse<Vec<Alert>>> {
    let alerts = AlertRepo::list_unread_for_entrance(&state.pool, entrance_id).await?;
    Ok(ApiResponse::ok(alerts, "Unread alerts fetched successfully"))
}
