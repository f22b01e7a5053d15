//! Route definitions for `/public` (no authentication).

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET /camera -> camera_locations
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/camera", get(public::camera_locations))
}
