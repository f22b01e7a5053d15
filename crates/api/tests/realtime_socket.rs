//! End-to-end test of the `/api/v1/ws` endpoint over a real TCP socket.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crowdwatch_api::router::build_app_router;
use crowdwatch_api::ws::RealtimeHub;
use crowdwatch_db::models::alert::AlertSummary;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_tungstenite::tungstenite::Message;

type Client = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Serve the full router on an ephemeral port. Returns its address and hub.
async fn spawn_server() -> (SocketAddr, Arc<RealtimeHub>) {
    let state = common::test_state(common::unreachable_pool());
    let hub = Arc::clone(&state.hub);
    let app = build_app_router(state, &common::test_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hub)
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/api/v1/ws"))
        .await
        .expect("websocket handshake should succeed");
    client
}

async fn send(client: &mut Client, json: Value) {
    client.send(Message::Text(json.to_string().into())).await.unwrap();
}

/// Next text frame, parsed. Panics after two seconds.
async fn next_event(client: &mut Client) -> Value {
    let fut = async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(text.as_str()).unwrap(),
                Some(Ok(_)) => continue,
                other => panic!("socket ended: {other:?}"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(2), fut)
        .await
        .expect("timed out waiting for a frame")
}

/// Poll until `check` holds, for up to two seconds.
async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition never became true");
}

#[tokio::test]
async fn count_frames_reach_every_client() {
    let (addr, hub) = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    eventually(|| {
        let hub = Arc::clone(&hub);
        async move { hub.connection_count().await == 2 }
    })
    .await;

    send(&mut a, serde_json::json!({"event": "count", "data": {"count": 21}})).await;

    for client in [&mut a, &mut b] {
        let event = next_event(client).await;
        assert_eq!(event["event"], "countUpdate");
        assert_eq!(event["data"]["count"], 21);
    }
}

#[tokio::test]
async fn registered_alert_reaches_room_and_everyone() {
    let (addr, hub) = spawn_server().await;
    let mut watcher = connect(addr).await;
    let mut bystander = connect(addr).await;

    send(&mut watcher, serde_json::json!({"event": "subscribe", "data": 9})).await;
    eventually(|| {
        let hub = Arc::clone(&hub);
        async move { hub.room_size(9).await == 1 && hub.connection_count().await == 2 }
    })
    .await;

    hub.publish_alert(&AlertSummary {
        id: 1,
        title: "Crowd building".into(),
        message: "Over threshold".into(),
        severity: "critical".into(),
        created_at: chrono::Utc::now(),
        entrance_id: 9,
    })
    .await;

    let first = next_event(&mut watcher).await;
    let second = next_event(&mut watcher).await;
    assert_eq!(first["event"], "newAlert");
    assert_eq!(second["event"], "globalAlert");
    assert_eq!(first["data"], second["data"]);

    let only = next_event(&mut bystander).await;
    assert_eq!(only["event"], "globalAlert");
    assert_eq!(only["data"]["id"], 1);
}

#[tokio::test]
async fn disconnect_releases_the_connection() {
    let (addr, hub) = spawn_server().await;
    let mut client = connect(addr).await;
    eventually(|| {
        let hub = Arc::clone(&hub);
        async move { hub.connection_count().await == 1 }
    })
    .await;

    client.close(None).await.unwrap();

    eventually(|| {
        let hub = Arc::clone(&hub);
        async move { hub.connection_count().await == 0 }
    })
    .await;
}
