//! Tree image analysis with transparent fallback.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs / batch.rs (AnalysisClient::analyze / batch_analyze)
//!     → image.rs (resolve handle to bytes)
//!     → health::HealthTracker::probe
//!     → remote::InferenceService (optional)
//!     → fallback.rs (optional)
//!     → result.rs (mode-tagged AnalysisResult)
//! ```
//!
//! `BatchAnalysisClient` names the batch facet of [`AnalysisClient`]: both
//! operations live on the same type and share its tracker and service.

pub mod batch;
pub mod client;
pub mod error;
pub mod fallback;
pub mod image;
pub mod request;
pub mod result;

pub use client::{AnalysisClient, FallbackReason};
pub use error::AnalysisError;
pub use fallback::FallbackAnalyzer;
pub use image::{ImageData, InputError};
pub use request::{AnalysisRequest, GeoPoint, ImageHandle};
pub use result::{
    AnalysisMode, AnalysisResult, BatchResult, Disease, DiseaseDetection, FallbackResult,
    GrowthIndicators, Percent, RemoteResult, Severity, TreeAnalysis,
};
