pub mod alert;
pub mod auth;
pub mod camera;
pub mod detection;
pub mod entrance;
pub mod health;
pub mod public;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                      realtime socket (no auth)
///
/// /admin/auth/register                     register (public)
/// /admin/auth/login                        login (public)
///
/// /admin/users                             list
/// /admin/users/{id}                        get, update, soft-delete
/// /admin/users/{id}/restore                restore
///
/// /admin/entrance                          list, register
/// /admin/entrance/{id}                     get, update, soft-delete
/// /admin/entrance/{id}/restore             restore
///
/// /admin/camera                            list, register
/// /admin/camera/{id}                       get, update, soft-delete
/// /admin/camera/{id}/restore               restore
///
/// /admin/detection                         list, register
/// /admin/detection/{id}                    get, update, soft-delete
/// /admin/detection/{id}/restore            restore
///
/// /admin/alert                             list, register
/// /admin/alert/mark-all-as-read            mark every unread alert read (POST)
/// /admin/alert/{id}                        get, update, soft-delete
/// /admin/alert/{id}/restore                restore
/// /admin/alert/{id}/unread                 unread alerts for entrance {id}
///
/// /public/camera                           active camera locations (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/admin/auth", auth::router())
        .nest("/admin/users", user::router())
        .nest("/admin/entrance", entrance::router())
        .nest("/admin/camera", camera::router())
        .nest("/admin/detection", detection::router())
        .nest("/admin/alert", alert::router())
        .nest("/public", public::router())
}
