use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::RealtimeHub;

/// How often every realtime connection is pinged.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn the keep-alive task for the realtime hub.
///
/// Each round pings every connection and reaps the ones whose socket task
/// has gone away without deregistering. Runs until aborted through the
/// returned handle during shutdown.
pub fn start_heartbeat(hub: Arc<RealtimeHub>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run(hub, HEARTBEAT_INTERVAL))
}

async fn run(hub: Arc<RealtimeHub>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; nobody needs a ping at startup.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let reaped = hub.ping_all().await;
        let live = hub.connection_count().await;
        if reaped > 0 {
            tracing::info!(reaped, live, "Reaped stale realtime connections");
        } else {
            tracing::trace!(live, "Realtime heartbeat");
        }
    }
}
