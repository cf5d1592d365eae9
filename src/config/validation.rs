//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the service address and value ranges (timeouts > 0)
//! - Reject empty lists that would disable a whole check
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AnalysisConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::AnalysisConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service.address '{address}' is not a valid URL: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("service.address '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("{0} must not be empty")]
    EmptyList(&'static str),

    #[error("{0} contains an empty entry")]
    EmptyEntry(&'static str),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AnalysisConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.service.address) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(config.service.address.clone()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidAddress {
            address: config.service.address.clone(),
            reason: e.to_string(),
        }),
    }

    let timeouts = [
        ("timeouts.health_ms", config.timeouts.health_ms),
        ("timeouts.single_ms", config.timeouts.single_ms),
        ("timeouts.batch_ms", config.timeouts.batch_ms),
        ("input.max_image_bytes", config.input.max_image_bytes),
    ];
    for (field, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroValue(field));
        }
    }

    check_list(
        "service.accepted_health_statuses",
        &config.service.accepted_health_statuses,
        &mut errors,
    );
    check_list("input.allowed_extensions", &config.input.allowed_extensions, &mut errors);
    check_list("fallback.disease_markers", &config.fallback.disease_markers, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_list(field: &'static str, values: &[String], errors: &mut Vec<ValidationError>) {
    if values.is_empty() {
        errors.push(ValidationError::EmptyList(field));
    } else if values.iter().any(|v| v.trim().is_empty()) {
        errors.push(ValidationError::EmptyEntry(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AnalysisConfig::default();
        config.service.address = "not a url".into();
        config.timeouts.single_ms = 0;
        config.timeouts.batch_ms = 0;
        config.fallback.disease_markers.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidAddress { .. }));
        assert!(errors.contains(&ValidationError::ZeroValue("timeouts.single_ms")));
        assert!(errors.contains(&ValidationError::ZeroValue("timeouts.batch_ms")));
        assert!(errors.contains(&ValidationError::EmptyList("fallback.disease_markers")));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = AnalysisConfig::default();
        config.service.address = "ftp://models.local".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnsupportedScheme("ftp://models.local".into())]
        );
    }

    #[test]
    fn test_rejects_blank_extension() {
        let mut config = AnalysisConfig::default();
        config.input.allowed_extensions.push("  ".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyEntry("input.allowed_extensions")]);
    }
}
