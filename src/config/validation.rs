//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use reqwest::Url;
use thiserror::Error;

/// Longest request timeout accepted; the host blocks the login on this call.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is not a valid URI: {value}")]
    InvalidUri { field: &'static str, value: String },
    #[error("{field} must use http or https, got '{scheme}'")]
    UnsupportedScheme { field: &'static str, scheme: String },
    #[error("secret_key must not be empty")]
    EmptySecret,
    #[error("request_timeout_secs must be between 1 and 120, got {0}")]
    InvalidTimeout(u64),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_uri("rest_uri", &config.rest_uri, &mut errors);
    check_uri("web_uri", &config.web_uri, &mut errors);

    if config.secret_key.trim().is_empty() {
        errors.push(ValidationError::EmptySecret);
    }

    if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&config.request_timeout_secs) {
        errors.push(ValidationError::InvalidTimeout(config.request_timeout_secs));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_uri(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::UnsupportedScheme {
            field,
            scheme: url.scheme().to_string(),
        }),
        Err(_) => errors.push(ValidationError::InvalidUri {
            field,
            value: value.to_string(),
        }),
    }
}
