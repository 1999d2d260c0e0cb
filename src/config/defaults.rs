//! Default value functions for configuration.

pub const DEFAULT_REST_URI: &str = "https://api.edificemc.com";
pub const DEFAULT_WEB_URI: &str = "https://www.edificemc.com/#";
pub const DEFAULT_SECRET_KEY: &str = "secret";

pub fn default_rest_uri() -> String {
    DEFAULT_REST_URI.to_string()
}

pub fn default_web_uri() -> String {
    DEFAULT_WEB_URI.to_string()
}

pub fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

pub fn default_request_timeout_secs() -> u64 {
    10
}

/// Whether a secret is the shipped placeholder and must be replaced.
pub fn is_default_secret(secret: &str) -> bool {
    secret.trim() == DEFAULT_SECRET_KEY
}
