//! Errors surfaced to callers of the analysis client.

use thiserror::Error;

use crate::analysis::image::InputError;

/// Raised only under `InvalidInputPolicy::Reject`; every other failure
/// degrades to a fallback result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input{}: {source}", position_suffix(.index))]
    InvalidInput {
        /// Position in the batch, `None` for single analyses.
        index: Option<usize>,
        #[source]
        source: InputError,
    },
}

fn position_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at position {i}"),
        None => String::new(),
    }
}
