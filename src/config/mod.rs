//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env overrides (AI_SERVICE_URL, ARBOR_*_TIMEOUT_MS)
//!     → validation.rs (semantic checks)
//!     → AnalysisConfig (validated, immutable)
//!     → passed by value to AnalysisClient at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_env, load_config, ConfigError};
pub use schema::AnalysisConfig;
pub use schema::{
    FallbackConfig, HealthConfig, InputConfig, InvalidInputPolicy, LogFormat,
    ObservabilityConfig, ServiceConfig, TimeoutConfig,
};
pub use validation::ValidationError;
