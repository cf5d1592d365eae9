//! Single-image analysis orchestration.
//!
//! # Flow
//! ```text
//! resolve image ──(input error)──────────────────────────┐
//!     │                                                  │ policy = fallback
//!     ▼                                                  ▼
//! probe health ──(unavailable)──────────────────────▶ FallbackAnalyzer
//!     │                                                  ▲
//!     ▼                                                  │
//! POST /analyze under single timeout ──(any failure)─────┘
//!     │
//!     ▼
//! RemoteResult (payload untouched)
//! ```
//!
//! # Design Decisions
//! - Remote failures never reach the caller; `mode` is the only signal
//! - Dropping the returned future cancels the remote call and produces nothing
//! - Clones share the service, tracker and fallback through `Arc`

use std::sync::Arc;

use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::error::AnalysisError;
use crate::analysis::fallback::FallbackAnalyzer;
use crate::analysis::image::InputError;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::result::{AnalysisResult, RemoteResult};
use crate::config::{AnalysisConfig, InputConfig, InvalidInputPolicy, TimeoutConfig};
use crate::health::HealthTracker;
use crate::observability::metrics;
use crate::remote::{contract, InferenceService, RemoteError, RemoteHints};
use crate::resilience::timeouts::with_deadline;

pub(crate) const OP_SINGLE: &str = "analyze";
pub(crate) const OP_BATCH: &str = "batch_analyze";

/// Why a fallback result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    InvalidInput,
    Unavailable,
    Remote(&'static str),
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::InvalidInput => "invalid_input",
            FallbackReason::Unavailable => "unavailable",
            FallbackReason::Remote(kind) => kind,
        }
    }
}

impl From<&RemoteError> for FallbackReason {
    fn from(e: &RemoteError) -> Self {
        FallbackReason::Remote(e.kind())
    }
}

/// Client for the remote inference service with transparent fallback.
#[derive(Clone)]
pub struct AnalysisClient {
    pub(crate) service: Arc<dyn InferenceService>,
    pub(crate) health: Arc<HealthTracker>,
    pub(crate) fallback: Arc<FallbackAnalyzer>,
    pub(crate) input: Arc<InputConfig>,
    pub(crate) timeouts: TimeoutConfig,
}

impl AnalysisClient {
    /// Build a client without probing the service.
    pub fn new(service: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Self {
        let health = Arc::new(HealthTracker::new(service.clone(), config));
        Self::assemble(service, health, config)
    }

    /// Build a client and probe the service once.
    pub async fn connect(service: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Self {
        let health = Arc::new(HealthTracker::connect(service.clone(), config).await);
        Self::assemble(service, health, config)
    }

    fn assemble(
        service: Arc<dyn InferenceService>,
        health: Arc<HealthTracker>,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            service,
            health,
            fallback: Arc::new(FallbackAnalyzer::from_config(&config.fallback)),
            input: Arc::new(config.input.clone()),
            timeouts: config.timeouts.clone(),
        }
    }

    pub fn health(&self) -> &Arc<HealthTracker> {
        &self.health
    }

    pub fn fallback(&self) -> &FallbackAnalyzer {
        &self.fallback
    }

    /// Analyse one image.
    ///
    /// # Errors
    ///
    /// Only under [`InvalidInputPolicy::Reject`], when the image cannot be
    /// resolved. Remote failures of every kind resolve to a fallback result.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let analysis_id = Uuid::new_v4();
        let identifier = request.image.identifier();
        let span = tracing::info_span!("analyze", %analysis_id, image = %identifier);

        async move {
            let AnalysisRequest {
                image,
                tree_type_hint,
                location_hint,
            } = request;

            let image = match image.resolve(&self.input).await {
                Ok(image) => image,
                Err(e) => return self.on_invalid_input(&identifier, None, e, OP_SINGLE),
            };

            if !self.health.probe().await {
                return Ok(self.degrade(&identifier, FallbackReason::Unavailable, OP_SINGLE));
            }

            let hints = RemoteHints {
                tree_type: tree_type_hint.as_deref(),
                location: location_hint,
            };
            let started = Instant::now();
            let outcome =
                with_deadline(self.timeouts.single(), self.service.analyze(image, hints))
                    .await
                    .and_then(|payload| contract::check_untagged(&payload).map(|()| payload));
            metrics::record_remote_call(OP_SINGLE, started.elapsed());

            match outcome {
                Ok(payload) => {
                    tracing::info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Remote analysis completed"
                    );
                    let result = AnalysisResult::Remote(RemoteResult::new(payload));
                    metrics::record_result(OP_SINGLE, result.mode());
                    Ok(result)
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind(),
                        "Remote analysis failed, using fallback"
                    );
                    Ok(self.degrade(&identifier, FallbackReason::from(&e), OP_SINGLE))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Apply the input policy to an unresolvable image.
    pub(crate) fn on_invalid_input(
        &self,
        identifier: &str,
        index: Option<usize>,
        error: InputError,
        operation: &'static str,
    ) -> Result<AnalysisResult, AnalysisError> {
        match self.input.policy {
            InvalidInputPolicy::Reject => {
                tracing::warn!(image = %identifier, error = %error, "Rejecting unreadable image");
                Err(AnalysisError::InvalidInput {
                    index,
                    source: error,
                })
            }
            InvalidInputPolicy::Fallback => {
                tracing::warn!(
                    image = %identifier,
                    error = %error,
                    "Unreadable image, using fallback"
                );
                Ok(self.degrade(identifier, FallbackReason::InvalidInput, operation))
            }
        }
    }

    pub(crate) fn degrade(
        &self,
        identifier: &str,
        reason: FallbackReason,
        operation: &'static str,
    ) -> AnalysisResult {
        tracing::debug!(
            image = %identifier,
            reason = reason.as_str(),
            "Building fallback analysis"
        );
        metrics::record_fallback(operation, reason.as_str());

        let result = AnalysisResult::Fallback(self.fallback.analyze(identifier));
        metrics::record_result(operation, result.mode());
        result
    }
}
