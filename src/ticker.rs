use crate::event::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// Drives toast expiry. Stops when the event loop goes away.
pub async fn start_ticker(tx: mpsc::UnboundedSender<AppEvent>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval.tick().await;

    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).is_err() {
            break;
        }
    }
}
