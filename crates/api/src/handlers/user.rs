//! Handlers for `/admin/users`.
//!
//! Users are created through `/admin/auth/register`; this module covers
//! everything after that. Unlike other resources, updates patch only the
//! supplied fields and every mutation checks the soft-delete state first.

use axum::extract::{Query, State};
use crowdwatch_core::error::CoreError;
use crowdwatch_core::listing::text_filter;
use crowdwatch_core::pagination::Page;
use crowdwatch_core::types::DbId;
use crowdwatch_db::models::trimmed_opt;
use crowdwatch_db::models::user::{UpdateUser, User, UserFilter, UserResponse};
use crowdwatch_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, ValidatedJson};
use crate::handlers::{password_strength, phone_number};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    #[serde(flatten)]
    pub paging: PageParams,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
}

impl UserListParams {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            name: text_filter(self.name.as_deref()),
            email: text_filter(self.email.as_deref()),
            phone_no: text_filter(self.phone_no.as_deref()),
            deleted: self.paging.deleted(),
        }
    }
}

/// Request body for `PUT /admin/users/{id}`. Absent fields are left as-is.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "phone_number"))]
    pub phone_no: Option<String>,
    #[validate(custom(function = "password_strength"))]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<ApiResponse<Page<UserResponse>>> {
    let page = UserRepo::list(&state.pool, &params.filter(), params.paging.page_request())
        .await
        .map_err(AppError::fetching("users"))?;
    Ok(ApiResponse::ok(page, "User list fetched successfully"))
}

/// GET /api/v1/admin/users/{id}
///
/// Soft-deleted users are still returned.
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = load(&state, id).await?;
    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "User details fetched successfully",
    ))
}

/// PUT /api/v1/admin/users/{id}
///
/// Patch profile fields. A new password is re-hashed. Fails on deleted users.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let existing = load(&state, id).await?;
    if existing.is_deleted {
        return Err(CoreError::InvalidState("User is deleted".into()).into());
    }

    if input.email.is_some() || input.phone_no.is_some() {
        let taken = UserRepo::contact_taken(
            &state.pool,
            input.email.as_deref(),
            input.phone_no.as_deref(),
            Some(id),
        )
        .await?;
        if taken {
            return Err(CoreError::Conflict("Email or phone number already in use".into()).into());
        }
    }

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let update_dto = UpdateUser {
        name: input.name,
        email: input.email,
        phone_no: input.phone_no,
        password_hash,
    };
    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(CoreError::not_found("User", id))?;
    tracing::info!(user_id = id, by = auth.user_id, "User updated");

    Ok(ApiResponse::ok(UserResponse::from(user), "User updated successfully"))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-delete. Fails if the user is already deleted.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<UserResponse>> {
    let existing = load(&state, id).await?;
    if existing.is_deleted {
        return Err(CoreError::InvalidState("User is deleted".into()).into());
    }

    let user = set_deleted(&state, id, true).await?;
    tracing::info!(user_id = id, by = auth.user_id, "User deleted");
    Ok(ApiResponse::ok(UserResponse::from(user), "User deleted successfully"))
}

/// PUT /api/v1/admin/users/{id}/restore
///
/// Undo a soft-delete. Fails if the user is not deleted.
pub async fn restore_user(
    auth: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<UserResponse>> {
    let existing = load(&state, id).await?;
    if !existing.is_deleted {
        return Err(CoreError::InvalidState("User is not deleted".into()).into());
    }

    let user = set_deleted(&state, id, false).await?;
    tracing::info!(user_id = id, by = auth.user_id, "User restored");
    Ok(ApiResponse::ok(UserResponse::from(user), "User restored successfully"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id).into())
}

async fn set_deleted(state: &AppState, id: DbId, deleted: bool) -> AppResult<User> {
    UserRepo::set_deleted(&state.pool, id, deleted)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id).into())
}
