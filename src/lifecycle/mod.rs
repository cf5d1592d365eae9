//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build remote service → Eager health probe
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Background monitor exits → Process exits
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Trigger shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_client, StartupError};
