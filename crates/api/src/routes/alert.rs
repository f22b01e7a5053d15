//! Route definitions for `/admin/alert`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes mounted at `/admin/alert`.
///
/// The unread listing shares the `{id}` segment with the per-alert routes;
/// there it names an entrance.
///
/// ```text
/// GET    /                  -> list_alerts
/// POST   /                  -> register_alert
/// POST   /mark-all-as-read  -> mark_all_as_read
/// GET    /{id}              -> get_alert
/// PUT    /{id}              -> update_alert
/// DELETE /{id}              -> delete_alert
/// PUT    /{id}/restore      -> restore_alert
/// GET    /{id}/unread       -> unread_alerts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alert::list_alerts).post(alert::register_alert))
        .route("/mark-all-as-read", post(alert::mark_all_as_read))
        .route(
            "/{id}",
            get(alert::get_alert)
                .put(alert::update_alert)
                .delete(alert::delete_alert),
        )
        .route("/{id}/restore", put(alert::restore_alert))
        .route("/{id}/unread", get(alert::unread_alerts))
}
