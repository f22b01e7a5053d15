//! Route definitions for `/admin/entrance`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::entrance;
use crate::state::AppState;

/// Routes mounted at `/admin/entrance`.
///
/// ```text
/// GET    /              -> list_entrances
/// POST   /              -> register_entrance
/// GET    /{id}          -> get_entrance
/// PUT    /{id}          -> update_entrance
/// DELETE /{id}          -> delete_entrance
/// PUT    /{id}/restore  -> restore_entrance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entrance::list_entrances).post(entrance::register_entrance))
        .route(
            "/{id}",
            get(entrance::get_entrance)
                .put(entrance::update_entrance)
                .delete(entrance::delete_entrance),
        )
        .route("/{id}/restore", put(entrance::restore_entrance))
}
