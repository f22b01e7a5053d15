//! Realtime alert and count fan-out over WebSocket.
//!
//! Provides the connection registry with entrance rooms, heartbeat
//! monitoring, the JSON frame protocol, and the HTTP upgrade handler.

mod handler;
mod heartbeat;
pub mod manager;
pub mod protocol;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::RealtimeHub;
