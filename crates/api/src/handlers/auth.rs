//! Handlers for `/admin/auth` (register, login).

use axum::extract::State;
use crowdwatch_core::error::CoreError;
use crowdwatch_core::roles::ROLE_USER;
use crowdwatch_db::models::trimmed;
use crowdwatch_db::models::user::{CreateUser, UserResponse};
use crowdwatch_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::{password_strength, phone_number};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "phone_number"))]
    pub phone_no: String,
    #[validate(custom(function = "password_strength"))]
    pub password: String,
}

/// Request body for `POST /admin/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/auth/register
///
/// Create a `user`-role account. Email and phone must not belong to any
/// existing account, deleted ones included.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let taken = UserRepo::contact_taken(
        &state.pool,
        Some(&input.email),
        Some(&input.phone_no),
        None,
    )
    .await?;
    if taken {
        return Err(AppError::Core(CoreError::Conflict("User already exists".into())));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        name: input.name,
        email: input.email,
        phone_no: input.phone_no,
        password_hash: hashed,
        role: ROLE_USER.to_string(),
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(user_id = user.id, "User registered");

    Ok(ApiResponse::created(
        UserResponse::from(user),
        "User registered successfully",
    ))
}

/// POST /api/v1/admin/auth/login
///
/// Verify email + password and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| CoreError::not_found_by("User", "email", input.email.clone()))?;

    if user.is_deleted {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account has been deleted".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let token = generate_token(&user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(ApiResponse::ok(
        LoginResponse {
            token,
            user: UserResponse::from(user),
        },
        "User logged in successfully",
    ))
}
