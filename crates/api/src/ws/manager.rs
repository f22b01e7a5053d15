use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use crowdwatch_core::types::{DbId, Timestamp};
use crowdwatch_db::models::alert::AlertSummary;
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};

use crate::ws::protocol::{self, ClientFrame, ClientEvent, ServerFrame};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single realtime connection.
pub struct Connection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// Entrance rooms this connection has joined.
    pub rooms: HashSet<DbId>,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Registry of live realtime connections and their entrance rooms.
///
/// Thread-safe via interior `RwLock`; created once in `main` and shared
/// through `AppState` behind an `Arc`. Delivery is best-effort: sends to
/// closed channels are skipped and nothing is replayed.
pub struct RealtimeHub {
    connections: RwLock<HashMap<String, Connection>>,
}

impl RealtimeHub {
    /// Create a new, empty hub.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Connection {
            sender: tx,
            rooms: HashSet::new(),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID. Its room memberships go with it.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Join the room for `entrance_id`. Returns `false` for unknown connections.
    pub async fn subscribe(&self, conn_id: &str, entrance_id: DbId) -> bool {
        match self.connections.write().await.get_mut(conn_id) {
            Some(conn) => {
                conn.rooms.insert(entrance_id);
                true
            }
            None => false,
        }
    }

    /// Leave the room for `entrance_id`. Returns `false` if not a member.
    pub async fn unsubscribe(&self, conn_id: &str, entrance_id: DbId) -> bool {
        self.connections
            .write()
            .await
            .get_mut(conn_id)
            .is_some_and(|conn| conn.rooms.remove(&entrance_id))
    }

    /// Broadcast a message to all connected clients.
    ///
    /// Returns the number of connections the message was queued for.
    pub async fn broadcast(&self, message: Message) -> usize {
        let conns = self.connections.read().await;
        conns
            .values()
            .filter(|conn| conn.sender.send(message.clone()).is_ok())
            .count()
    }

    /// Send a message to every connection in an entrance room.
    ///
    /// Returns the number of connections the message was queued for.
    pub async fn broadcast_to_room(&self, entrance_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        conns
            .values()
            .filter(|conn| conn.rooms.contains(&entrance_id))
            .filter(|conn| conn.sender.send(message.clone()).is_ok())
            .count()
    }

    /// Announce a newly registered alert: `newAlert` to the entrance room
    /// and `globalAlert` to everyone.
    pub async fn publish_alert(&self, alert: &AlertSummary) {
        let room_msg = encode(protocol::NEW_ALERT, alert);
        let global_msg = encode(protocol::GLOBAL_ALERT, alert);

        let (Some(room_msg), Some(global_msg)) = (room_msg, global_msg) else {
            return;
        };

        let room = self.broadcast_to_room(alert.entrance_id, room_msg).await;
        let global = self.broadcast(global_msg).await;
        tracing::debug!(
            alert_id = alert.id,
            entrance_id = alert.entrance_id,
            room,
            global,
            "Published alert"
        );
    }

    /// Handle one inbound text frame from `conn_id`.
    ///
    /// Malformed and unknown frames are logged and dropped.
    pub async fn handle_text(&self, conn_id: &str, text: &str) {
        let frame = match serde_json::from_str::<ClientFrame>(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(conn_id, error = %e, "Ignoring malformed frame");
                return;
            }
        };

        match frame.classify() {
            ClientEvent::Alert(data) => {
                if let Some(msg) = encode(protocol::NEW_ALERT, &data) {
                    self.broadcast(msg).await;
                }
            }
            ClientEvent::Count(data) => {
                if let Some(msg) = encode(protocol::COUNT_UPDATE, &data) {
                    self.broadcast(msg).await;
                }
            }
            ClientEvent::Subscribe(entrance_id) => {
                self.subscribe(conn_id, entrance_id).await;
                tracing::debug!(conn_id, entrance_id, "Joined entrance room");
            }
            ClientEvent::Unsubscribe(entrance_id) => {
                self.unsubscribe(conn_id, entrance_id).await;
                tracing::debug!(conn_id, entrance_id, "Left entrance room");
            }
            ClientEvent::Unknown(event) => {
                tracing::debug!(conn_id, event = %event, "Ignoring unknown event");
            }
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Number of connections in an entrance room.
    pub async fn room_size(&self, entrance_id: DbId) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|conn| conn.rooms.contains(&entrance_id))
            .count()
    }

    /// Send a Close frame to every connection, then clear the registry.
    ///
    /// Used during graceful shutdown.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all realtime connections");
    }

    /// Send a Ping frame to every connected client and drop connections
    /// whose outbound channel is already closed.
    ///
    /// Returns the number of connections dropped.
    pub async fn ping_all(&self) -> usize {
        let mut conns = self.connections.write().await;
        let before = conns.len();
        conns.retain(|_, conn| conn.sender.send(Message::Ping(Bytes::new())).is_ok());
        before - conns.len()
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

fn encode<T: Serialize>(event: &str, data: &T) -> Option<Message> {
    match serde_json::to_string(&ServerFrame { event, data }) {
        Ok(text) => Some(Message::Text(text.into())),
        Err(e) => {
            tracing::error!(event, error = %e, "Failed to encode realtime frame");
            None
        }
    }
}
