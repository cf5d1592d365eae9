//! Periodic health probing.
//!
//! # Responsibilities
//! - Probe the remote service on a fixed interval
//! - Stop cleanly on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::health::tracker::HealthTracker;

pub struct HealthMonitor {
    tracker: Arc<HealthTracker>,
    interval: Duration,
}

impl HealthMonitor {
    /// A zero `interval` disables the monitor.
    pub fn new(tracker: Arc<HealthTracker>, interval: Duration) -> Self {
        Self { tracker, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if self.interval.is_zero() {
            tracing::info!("Background health monitor disabled");
            return;
        }

        tracing::info!(interval_secs = self.interval.as_secs(), "Health monitor starting");

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let available = self.tracker.probe().await;
                    tracing::debug!(available, "Periodic health probe");
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
