//! Tree analysis client with health tracking and offline fallback.

pub mod analysis;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod remote;
pub mod resilience;

pub use analysis::{AnalysisClient, AnalysisRequest, AnalysisResult, ImageHandle};
pub use config::AnalysisConfig;
pub use health::HealthTracker;
pub use remote::{HttpInferenceService, InferenceService};
