//! Remote service availability tracking.
//!
//! # Responsibilities
//! - Probe `GET /health` under a short deadline
//! - Hold the last known status for lock-free concurrent reads
//! - Optionally skip network probes inside a minimum re-probe window
//!
//! # Design Decisions
//! - A failed probe is a signal, never an error: every failure mode yields `false`
//! - Each probe replaces the whole snapshot (single writer per probe, many readers)
//! - Transitions are logged; steady state is not

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::Utc;
use tokio::time::Instant;

use crate::config::AnalysisConfig;
use crate::health::state::HealthStatus;
use crate::observability::metrics;
use crate::remote::InferenceService;
use crate::resilience::timeouts::with_deadline;

#[derive(Debug)]
struct Snapshot {
    status: HealthStatus,
    probed_at: Option<Instant>,
}

/// Best-effort view of remote service reachability.
pub struct HealthTracker {
    service: Arc<dyn InferenceService>,
    state: ArcSwap<Snapshot>,
    probe_timeout: Duration,
    min_reprobe_interval: Duration,
    accepted_statuses: Vec<String>,
}

impl HealthTracker {
    /// Create a tracker without probing; the status starts as unknown.
    pub fn new(service: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Self {
        Self {
            service,
            state: ArcSwap::from_pointee(Snapshot {
                status: HealthStatus::unknown(),
                probed_at: None,
            }),
            probe_timeout: config.timeouts.health(),
            min_reprobe_interval: Duration::from_millis(config.health.min_reprobe_interval_ms),
            accepted_statuses: config.service.accepted_health_statuses.clone(),
        }
    }

    /// Create a tracker and probe once before returning.
    pub async fn connect(service: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Self {
        let tracker = Self::new(service, config);
        tracker.probe().await;
        tracker
    }

    /// Last known availability. Never blocks.
    pub fn is_available(&self) -> bool {
        self.state.load().status.available
    }

    /// Snapshot of the last known status.
    pub fn status(&self) -> HealthStatus {
        self.state.load().status
    }

    /// Refresh the status from the remote service and return it.
    pub async fn probe(&self) -> bool {
        if let Some(available) = self.recent() {
            tracing::debug!(available, "Skipping health probe inside re-probe window");
            return available;
        }

        let available = match with_deadline(self.probe_timeout, self.service.health()).await {
            Ok(report) if self.accepted_statuses.iter().any(|s| *s == report.status) => true,
            Ok(report) => {
                tracing::warn!(status = %report.status, "Health check failed: unexpected status");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = e.kind(), "Health check failed");
                false
            }
        };

        let previous = self.state.swap(Arc::new(Snapshot {
            status: HealthStatus::checked(available, Utc::now()),
            probed_at: Some(Instant::now()),
        }));

        if previous.probed_at.is_none() || previous.status.available != available {
            if available {
                tracing::info!("Remote inference service available");
            } else {
                tracing::warn!("Remote inference service unavailable, using fallback mode");
            }
        }

        metrics::record_remote_available(available);
        available
    }

    fn recent(&self) -> Option<bool> {
        if self.min_reprobe_interval.is_zero() {
            return None;
        }
        let snapshot = self.state.load();
        let probed_at = snapshot.probed_at?;
        (probed_at.elapsed() < self.min_reprobe_interval).then_some(snapshot.status.available)
    }
}
