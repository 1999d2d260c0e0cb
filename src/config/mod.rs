//! Configuration loading and management.
//!
//! - [`types`]: the [`Config`] file layout and loading
//! - [`defaults`]: serde default values
//! - [`validation`]: startup validation

mod defaults;
mod types;
pub mod validation;

pub use defaults::{DEFAULT_REST_URI, DEFAULT_SECRET_KEY, DEFAULT_WEB_URI, is_default_secret};
pub use types::{Config, ConfigError, INSECURE_TLS_ENV, TlsConfig};
pub(crate) use types::insecure_tls_env_present;
pub use validation::{ValidationError, validate};
