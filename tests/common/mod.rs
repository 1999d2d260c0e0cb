//! Integration test common infrastructure.
//!
//! Provides a mock Edifice verification service and helpers for building
//! clients and configurations pointed at it.

pub mod service;

#[allow(unused_imports)]
pub use service::{MockService, RecordedRequest, Reply};

use edifice_auth::Config;

/// Web base used by every test configuration.
#[allow(dead_code)]
pub const TEST_WEB_URI: &str = "http://web.test/#";

/// Secret used by every test configuration.
#[allow(dead_code)]
pub const TEST_SECRET: &str = "test-secret-key";

/// Configuration pointing at `service`.
#[allow(dead_code)]
pub fn config_for(service: &MockService) -> Config {
    Config {
        rest_uri: service.rest_uri(),
        web_uri: TEST_WEB_URI.to_string(),
        secret_key: TEST_SECRET.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}
