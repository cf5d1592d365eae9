//! Remote service health snapshot.
//!
//! # States
//! - Available: analysis attempts go to the remote service
//! - Unavailable: every analysis is answered by the fallback
//!
//! Before the first probe the service is treated as unavailable with no
//! check time. Nothing is persisted across restarts.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Last known availability of the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub available: bool,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl HealthStatus {
    /// State before any probe has completed.
    pub fn unknown() -> Self {
        Self {
            available: false,
            last_checked_at: None,
        }
    }

    pub fn checked(available: bool, at: DateTime<Utc>) -> Self {
        Self {
            available,
            last_checked_at: Some(at),
        }
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_unavailable() {
        let status = HealthStatus::default();
        assert!(!status.available);
        assert!(status.last_checked_at.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(HealthStatus::unknown()).unwrap();
        assert_eq!(value, serde_json::json!({ "available": false, "lastCheckedAt": null }));
    }
}
