//! Remote inference service subsystem.
//!
//! # Data Flow
//! ```text
//! AnalysisClient / HealthTracker
//!     → service.rs (InferenceService trait, injected as Arc<dyn _>)
//!     → http.rs (reqwest multipart calls)
//!     → contract.rs (reject bodies that miss expected fields)
//! ```
//!
//! # Design Decisions
//! - The service is an injected capability so tests can script it
//! - Payloads are passed through untouched once they pass the contract
//! - Deadlines live with the caller, not the transport

pub mod contract;
pub mod http;
pub mod service;

pub use http::HttpInferenceService;
pub use service::{
    HealthReport, InferenceService, RemoteError, RemoteHints, RemotePayload, ServiceEndpoint,
};
