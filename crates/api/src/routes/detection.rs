//! Route definitions for `/admin/detection`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::detection;
use crate::state::AppState;

/// Routes mounted at `/admin/detection`.
///
/// ```text
/// GET    /              -> list_detections
/// POST   /              -> register_detection
/// GET    /{id}          -> get_detection
/// PUT    /{id}          -> update_detection
/// DELETE /{id}          -> delete_detection
/// PUT    /{id}/restore  -> restore_detection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(detection::list_detections).post(detection::register_detection))
        .route(
            "/{id}",
            get(detection::get_detection)
                .put(detection::update_detection)
                .delete(detection::delete_detection),
        )
        .route("/{id}/restore", put(detection::restore_detection))
}
