//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into a ready client
//! - Probe the remote service once before the first analysis
//!
//! # Design Decisions
//! - Fail fast on a bad service address or HTTP client setup
//! - An unreachable service is not a startup error (fallback mode)

use std::sync::Arc;

use thiserror::Error;

use crate::analysis::AnalysisClient;
use crate::config::AnalysisConfig;
use crate::remote::{HttpInferenceService, RemoteError, ServiceEndpoint};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid service address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot build HTTP client: {0}")]
    Client(#[from] RemoteError),
}

/// Build an HTTP-backed client and probe the service eagerly.
pub async fn build_client(config: &AnalysisConfig) -> Result<AnalysisClient, StartupError> {
    let endpoint =
        ServiceEndpoint::parse(&config.service.address).map_err(|source| StartupError::Address {
            address: config.service.address.clone(),
            source,
        })?;
    let service = HttpInferenceService::new(endpoint)?;

    tracing::info!(
        address = %config.service.address,
        single_timeout_ms = config.timeouts.single_ms,
        batch_timeout_ms = config.timeouts.batch_ms,
        policy = ?config.input.policy,
        "Analysis client configured"
    );

    Ok(AnalysisClient::connect(Arc::new(service), config).await)
}
