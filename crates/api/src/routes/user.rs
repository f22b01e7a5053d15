//! Route definitions for `/admin/users`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/admin/users`.
///
/// ```text
/// GET    /              -> list_users
/// GET    /{id}          -> get_user
/// PUT    /{id}          -> update_user
/// DELETE /{id}          -> delete_user
/// PUT    /{id}/restore  -> restore_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route("/{id}/restore", put(user::restore_user))
}
