//! JSON frame format for the realtime socket.
//!
//! Every frame is a text message `{"event": <name>, "data": <payload>}`.

use crowdwatch_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client-published alert payload, echoed to everyone.
pub const ALERT: &str = "alert";
/// Client-published count payload, echoed to everyone.
pub const COUNT: &str = "count";
pub const SUBSCRIBE: &str = "subscribe";
pub const UNSUBSCRIBE: &str = "unsubscribe";

/// Alert fan-out (client echo, and entrance-room push on registration).
pub const NEW_ALERT: &str = "newAlert";
/// Alert push to every connection on registration.
pub const GLOBAL_ALERT: &str = "globalAlert";
pub const COUNT_UPDATE: &str = "countUpdate";

/// Inbound frame before interpretation.
#[derive(Debug, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Outbound frame.
#[derive(Debug, Serialize)]
pub struct ServerFrame<'a, T: Serialize> {
    pub event: &'a str,
    pub data: &'a T,
}

/// What an inbound frame asks for.
#[derive(Debug, PartialEq)]
pub enum ClientEvent {
    Alert(Value),
    Count(Value),
    Subscribe(DbId),
    Unsubscribe(DbId),
    Unknown(String),
}

impl ClientFrame {
    pub fn classify(self) -> ClientEvent {
        match self.event.as_str() {
            ALERT => ClientEvent::Alert(self.data),
            COUNT => ClientEvent::Count(self.data),
            SUBSCRIBE => match entrance_id(&self.data) {
                Some(id) => ClientEvent::Subscribe(id),
                None => ClientEvent::Unknown(self.event),
            },
            UNSUBSCRIBE => match entrance_id(&self.data) {
                Some(id) => ClientEvent::Unsubscribe(id),
                None => ClientEvent::Unknown(self.event),
            },
            _ => ClientEvent::Unknown(self.event),
        }
    }
}

/// Accepts `7`, `"7"` or `{"entranceId": 7}`.
fn entrance_id(data: &Value) -> Option<DbId> {
    match data {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("entranceId").and_then(entrance_id),
        _ => None,
    }
}
