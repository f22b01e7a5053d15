use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::RealtimeHub;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: crowdwatch_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Realtime hub for alert and count fan-out. Created once in `main`.
    pub hub: Arc<RealtimeHub>,
}
