//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HealthTracker / AnalysisClient produce:
//!     → logging.rs (structured log events, analysis_id spans)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stderr, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Every analysis runs inside a span carrying its analysis_id
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
