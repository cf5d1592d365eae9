//! Health tracking subsystem.
//!
//! # Data Flow
//! ```text
//! On demand (tracker.rs):
//!     Analysis attempt
//!     → probe GET /health under the health deadline
//!     → overwrite state.rs snapshot
//!
//! Periodic (monitor.rs):
//!     Interval timer
//!     → probe
//!     → overwrite snapshot
//! ```
//!
//! # Design Decisions
//! - Probes happen before every analysis attempt; no caching window by default
//! - A single status for the one remote service, not per-endpoint
//! - Probe failures never surface as errors

pub mod monitor;
pub mod state;
pub mod tracker;

pub use monitor::HealthMonitor;
pub use state::HealthStatus;
pub use tracker::HealthTracker;
