//! The remote inference service seam and its error/value types.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::analysis::{GeoPoint, ImageData};

/// Opaque structured analysis returned by the remote service.
pub type RemotePayload = Map<String, Value>;

/// Errors that can occur while talking to the remote service.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The call did not complete before its deadline.
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, DNS or I/O failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("remote service returned status {0}")]
    Status(u16),

    /// The response was well-formed HTTP but broke the payload contract.
    #[error("contract violation: {0}")]
    Contract(String),
}

impl RemoteError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Timeout(_) => "timeout",
            RemoteError::Transport(_) => "transport",
            RemoteError::Status(_) => "status",
            RemoteError::Contract(_) => "contract",
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return RemoteError::Status(status.as_u16());
        }
        RemoteError::Transport(e.to_string())
    }
}

/// Body of a health response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
}

/// Optional context sent alongside images.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RemoteHints<'a> {
    pub tree_type: Option<&'a str>,
    pub location: Option<GeoPoint>,
}

/// Base address of the remote inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base: Url,
}

impl ServiceEndpoint {
    pub fn parse(address: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(address)?,
        })
    }

    /// Append `route` to the base path, keeping any path prefix.
    pub fn resolve(&self, route: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        url.set_path(&path);
        url
    }
}

/// Capability to reach the remote inference service.
///
/// Implementations do not enforce deadlines; callers wrap each call with
/// [`crate::resilience::timeouts::with_deadline`].
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// `GET /health`.
    async fn health(&self) -> Result<HealthReport, RemoteError>;

    /// `POST /analyze` with a single image.
    async fn analyze(
        &self,
        image: ImageData,
        hints: RemoteHints<'_>,
    ) -> Result<RemotePayload, RemoteError>;

    /// `POST /batch-analyze`; one payload per submitted image, in order.
    async fn batch_analyze(
        &self,
        images: Vec<ImageData>,
        hints: RemoteHints<'_>,
    ) -> Result<Vec<RemotePayload>, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_prefix() {
        let endpoint = ServiceEndpoint::parse("http://localhost:5001").unwrap();
        assert_eq!(endpoint.resolve("health").as_str(), "http://localhost:5001/health");
    }

    #[test]
    fn test_resolve_keeps_path_prefix() {
        let endpoint = ServiceEndpoint::parse("https://models.example.com/ai/").unwrap();
        assert_eq!(
            endpoint.resolve("/batch-analyze").as_str(),
            "https://models.example.com/ai/batch-analyze"
        );
    }

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(RemoteError::Timeout(Duration::from_secs(1)).kind(), "timeout");
        assert_eq!(RemoteError::Status(502).kind(), "status");
        assert_eq!(RemoteError::Contract("x".into()).kind(), "contract");
        assert_eq!(
            RemoteError::Status(503).to_string(),
            "remote service returned status 503"
        );
    }
}
