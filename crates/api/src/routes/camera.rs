//! Route definitions for `/admin/camera`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::camera;
use crate::state::AppState;

/// Routes mounted at `/admin/camera`.
///
/// ```text
/// GET    /              -> list_cameras
/// POST   /              -> register_camera
/// GET    /{id}          -> get_camera
/// PUT    /{id}          -> update_camera
/// DELETE /{id}          -> delete_camera
/// PUT    /{id}/restore  -> restore_camera
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(camera::list_cameras).post(camera::register_camera))
        .route(
            "/{id}",
            get(camera::get_camera)
                .put(camera::update_camera)
                .delete(camera::delete_camera),
        )
        .route("/{id}/restore", put(camera::restore_camera))
}
