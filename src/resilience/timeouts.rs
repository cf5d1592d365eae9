//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap remote calls with a deadline
//! - Map expiry onto `RemoteError::Timeout`
//!
//! Expiry is reported as its own error kind so fallbacks can be counted by
//! reason.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::remote::RemoteError;

/// Run `fut` under `deadline`, turning expiry into [`RemoteError::Timeout`].
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout(deadline)),
    }
}
