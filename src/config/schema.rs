//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the analysis
//! client. All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the analysis client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Remote inference service settings.
    pub service: ServiceConfig,

    /// Per-call timeouts.
    pub timeouts: TimeoutConfig,

    /// Health tracking settings.
    pub health: HealthConfig,

    /// Image input rules.
    pub input: InputConfig,

    /// Offline analysis settings.
    pub fallback: FallbackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote inference service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base address (e.g., "http://localhost:5001").
    pub address: String,

    /// Values of the health body's `status` field that mean "available".
    pub accepted_health_statuses: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: "http://localhost:5001".to_string(),
            accepted_health_statuses: vec!["ok".to_string()],
        }
    }
}

/// Timeout configuration for remote calls, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Health probe timeout.
    pub health_ms: u64,

    /// Single image analysis timeout.
    pub single_ms: u64,

    /// Batch analysis timeout.
    pub batch_ms: u64,
}

impl TimeoutConfig {
    pub fn health(&self) -> Duration {
        Duration::from_millis(self.health_ms)
    }

    pub fn single(&self) -> Duration {
        Duration::from_millis(self.single_ms)
    }

    pub fn batch(&self) -> Duration {
        Duration::from_millis(self.batch_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            health_ms: 5_000,
            single_ms: 60_000,
            batch_ms: 120_000,
        }
    }
}

/// Health tracking configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HealthConfig {
    /// Minimum time between two network probes (0 = probe every time).
    pub min_reprobe_interval_ms: u64,

    /// Background monitor interval in seconds (0 = no background monitor).
    pub monitor_interval_secs: u64,
}

/// What to do when an image cannot be resolved to readable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidInputPolicy {
    /// Answer with an offline analysis, like any other degraded case.
    #[default]
    Fallback,
    /// Surface an `InvalidInput` error to the caller.
    Reject,
}

/// Image input rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Policy for unreadable images.
    pub policy: InvalidInputPolicy,

    /// Largest accepted image in bytes.
    pub max_image_bytes: u64,

    /// Accepted file extensions (lowercase, without the dot).
    pub allowed_extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            policy: InvalidInputPolicy::Fallback,
            max_image_bytes: 10 * 1024 * 1024,
            allowed_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
        }
    }
}

/// Offline analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Identifier substrings that flag a diseased tree.
    pub disease_markers: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            disease_markers: vec!["disease".into(), "sick".into()],
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
