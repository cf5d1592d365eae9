//! Multi-image analysis as one combined remote call.
//!
//! # Flow
//! ```text
//! resolve every image (unreadable ones keep their slot, marked for fallback)
//!     → probe health once
//!     → POST /batch-analyze with the readable images, in input order
//!     → map results back to their original positions
//! ```
//!
//! # Design Decisions
//! - Output length always equals input length
//! - All-or-nothing: any failure of the combined call falls back for the whole batch
//! - No per-image retry

use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::client::{AnalysisClient, FallbackReason, OP_BATCH};
use crate::analysis::error::AnalysisError;
use crate::analysis::image::ImageData;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::result::{AnalysisResult, BatchResult, RemoteResult};
use crate::observability::metrics;
use crate::remote::{contract, RemoteError, RemoteHints};
use crate::resilience::timeouts::with_deadline;

impl AnalysisClient {
    /// Analyse several images, preserving input order.
    ///
    /// # Errors
    ///
    /// Only under `InvalidInputPolicy::Reject`: the first unreadable image
    /// fails the whole call, before any remote request is made.
    pub async fn batch_analyze(
        &self,
        requests: Vec<AnalysisRequest>,
    ) -> Result<BatchResult, AnalysisError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let batch_id = Uuid::new_v4();
        let span = tracing::info_span!("batch_analyze", %batch_id, size = requests.len());

        async move {
            let mut identifiers = Vec::with_capacity(requests.len());
            let mut tree_types = Vec::with_capacity(requests.len());
            let mut slots: Vec<Option<AnalysisResult>> = Vec::with_capacity(requests.len());
            let mut positions = Vec::new();
            let mut images: Vec<ImageData> = Vec::new();

            for (index, request) in requests.into_iter().enumerate() {
                let identifier = request.image.identifier();
                match request.image.resolve(&self.input).await {
                    Ok(image) => {
                        positions.push(index);
                        images.push(image);
                        tree_types.push(request.tree_type_hint);
                        slots.push(None);
                    }
                    Err(e) => {
                        let fallback =
                            self.on_invalid_input(&identifier, Some(index), e, OP_BATCH)?;
                        slots.push(Some(fallback));
                    }
                }
                identifiers.push(identifier);
            }

            if !self.health.probe().await {
                return Ok(self.degrade_unfilled(slots, &identifiers, FallbackReason::Unavailable));
            }
            if images.is_empty() {
                tracing::warn!("No readable image in batch, skipping remote call");
                return Ok(self.degrade_unfilled(slots, &identifiers, FallbackReason::InvalidInput));
            }

            let hints = RemoteHints {
                tree_type: shared_tree_type(&tree_types),
                location: None,
            };
            let expected = images.len();
            let started = Instant::now();
            let outcome = with_deadline(
                self.timeouts.batch(),
                self.service.batch_analyze(images, hints),
            )
            .await
            .and_then(|payloads| {
                if payloads.len() != expected {
                    return Err(RemoteError::Contract(format!(
                        "expected {expected} results, got {}",
                        payloads.len()
                    )));
                }
                payloads.iter().try_for_each(contract::check_untagged)?;
                Ok(payloads)
            });
            metrics::record_remote_call(OP_BATCH, started.elapsed());

            match outcome {
                Ok(payloads) => {
                    tracing::info!(submitted = expected, "Remote batch analysis completed");
                    for (position, payload) in positions.into_iter().zip(payloads) {
                        let result = AnalysisResult::Remote(RemoteResult::new(payload));
                        metrics::record_result(OP_BATCH, result.mode());
                        slots[position] = Some(result);
                    }
                    Ok(self.degrade_unfilled(slots, &identifiers, FallbackReason::InvalidInput))
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind(),
                        "Remote batch analysis failed, using fallback for whole batch"
                    );
                    Ok(self.degrade_unfilled(slots, &identifiers, FallbackReason::from(&e)))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fill every slot not already holding a result with a fallback, so the
    /// output always has one entry per input.
    fn degrade_unfilled(
        &self,
        slots: Vec<Option<AnalysisResult>>,
        identifiers: &[String],
        reason: FallbackReason,
    ) -> BatchResult {
        slots
            .into_iter()
            .zip(identifiers)
            .map(|(slot, identifier)| {
                slot.unwrap_or_else(|| self.degrade(identifier, reason, OP_BATCH))
            })
            .collect()
    }
}

/// The tree-type hint, if every submitted request carries the same one.
fn shared_tree_type(hints: &[Option<String>]) -> Option<&str> {
    let (first, rest) = hints.split_first()?;
    let first = first.as_deref()?;
    rest.iter()
        .all(|hint| hint.as_deref() == Some(first))
        .then_some(first)
}
