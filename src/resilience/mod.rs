//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to the remote service:
//!     → timeouts.rs (enforce the per-call deadline)
//!     → On expiry: RemoteError::Timeout, handled like any other remote failure
//! ```
//!
//! # Design Decisions
//! - Every remote call has a deadline
//! - No retries: a failed remote attempt degrades straight to the fallback
//! - Dropping the wrapped future cancels the outbound call

pub mod timeouts;
