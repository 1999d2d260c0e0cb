//! Core configuration types and loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

use super::defaults::{
    default_request_timeout_secs, default_rest_uri, default_secret_key, default_web_uri,
    is_default_secret,
};
use super::validation::validate;
use crate::verification::{Credentials, Endpoints};

/// Environment variable that must be present for `tls.accept_invalid_certs` to take effect.
pub const INSECURE_TLS_ENV: &str = "EDIFICE_ALLOW_INSECURE_TLS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Verification plugin configuration.
///
/// Loaded once at startup, then turned into the immutable [`Endpoints`] and
/// [`Credentials`] shared by every login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URI of the verification REST API.
    #[serde(default = "default_rest_uri")]
    pub rest_uri: String,
    /// Base URI of the companion website (signup and login pages hang off it).
    #[serde(default = "default_web_uri")]
    pub web_uri: String,
    /// Shared secret sent as the `Authorization` header when issuing codes.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Upper bound on one verification request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Transport security settings.
    #[serde(default)]
    pub tls: TlsConfig,
}

/// Transport security settings for the outbound verification call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Skip certificate and hostname validation (local development only).
    /// Ignored unless `EDIFICE_ALLOW_INSECURE_TLS` is set in the environment.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rest_uri: default_rest_uri(),
            web_uri: default_web_uri(),
            secret_key: default_secret_key(),
            request_timeout_secs: default_request_timeout_secs(),
            tls: TlsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the file at `path`, generating it with defaults when absent.
    ///
    /// Never fails: unreadable files, and files that do not pass
    /// [`validate`], fall back to the in-memory defaults with a warning.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "Generating config file...");
            let config = Self::default();
            match config.save(path) {
                Ok(()) => info!(path = %path.display(), "Config file successfully generated."),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "The default configuration could not be created!"
                ),
            }
            return config;
        }

        match Self::load(path) {
            Ok(config) => match validate(&config) {
                Ok(()) => config,
                Err(errors) => {
                    for e in &errors {
                        warn!(path = %path.display(), error = %e, "Invalid configuration");
                    }
                    warn!(
                        path = %path.display(),
                        "The configuration is invalid! Using the default configuration"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "The configuration could not be loaded! Using the default configuration"
                );
                Self::default()
            }
        }
    }

    /// Emit warnings for settings that are unsafe outside development.
    pub fn warn_insecure(&self) {
        self.warn_insecure_with(insecure_tls_env_present())
    }

    pub(crate) fn warn_insecure_with(&self, env_override: bool) {
        if is_default_secret(&self.secret_key) {
            warn!(
                "secret_key is still the shipped default; set a real secret before deploying"
            );
        }
        if self.tls.accept_invalid_certs {
            if env_override {
                warn!(
                    "INSECURE: certificate validation disabled for the verification service (allowed via {})",
                    INSECURE_TLS_ENV
                );
            } else {
                error!(
                    "tls.accept_invalid_certs is set but {} is not; keeping certificate validation on",
                    INSECURE_TLS_ENV
                );
            }
        }
    }

    /// Whether the outbound client should skip certificate validation.
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs_with(insecure_tls_env_present())
    }

    pub(crate) fn accept_invalid_certs_with(&self, env_override: bool) -> bool {
        self.tls.accept_invalid_certs && env_override
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.rest_uri, &self.web_uri)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.secret_key.clone())
    }
}

pub(crate) fn insecure_tls_env_present() -> bool {
    std::env::var_os(INSECURE_TLS_ENV).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults_match_shipped_values() {
        let config = Config::default();
        assert_eq!(config.rest_uri, "https://api.edificemc.com");
        assert_eq!(config.web_uri, "https://www.edificemc.com/#");
        assert_eq!(config.secret_key, "secret");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(!config.tls.accept_invalid_certs);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(r#"secret_key = "hunter2""#).unwrap();
        assert_eq!(config.secret_key, "hunter2");
        assert_eq!(config.rest_uri, "https://api.edificemc.com");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_load_or_init_generates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("edifice.toml");

        let config = Config::load_or_init(&path);
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded, Config::default());
    }

    #[test]
    fn test_load_or_init_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edifice.toml");
        std::fs::write(
            &path,
            "rest_uri = \"http://127.0.0.1:8080\"\nsecret_key = \"s3cr3t\"\n",
        )
        .unwrap();

        let config = Config::load_or_init(&path);
        assert_eq!(config.rest_uri, "http://127.0.0.1:8080");
        assert_eq!(config.secret_key, "s3cr3t");
        assert_eq!(config.web_uri, "https://www.edificemc.com/#");
    }

    #[test]
    fn test_load_or_init_falls_back_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edifice.toml");
        std::fs::write(&path, "rest_uri = [not toml").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        assert_eq!(Config::load_or_init(&path), Config::default());
    }

    #[test]
    fn test_load_or_init_falls_back_on_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edifice.toml");
        std::fs::write(
            &path,
            "secret_key = \"s3cr3t\"\nrequest_timeout_secs = 0\n",
        )
        .unwrap();

        let config = Config::load_or_init(&path);
        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_warn_insecure_flag_without_env() {
        let mut config = Config::default();
        config.tls.accept_invalid_certs = true;

        let logs = captured_logs(|| config.warn_insecure_with(false));
        assert!(logs.contains("secret_key is still the shipped default"));
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("keeping certificate validation on"));
        assert!(!logs.contains("INSECURE"));
    }

    #[test]
    fn test_warn_insecure_flag_with_env() {
        let config = Config {
            secret_key: "s3cr3t".to_string(),
            tls: TlsConfig {
                accept_invalid_certs: true,
            },
            ..Config::default()
        };

        let logs = captured_logs(|| config.warn_insecure_with(true));
        assert!(logs.contains("INSECURE: certificate validation disabled"));
        assert!(!logs.contains("shipped default"));
    }

    #[test]
    fn test_warn_insecure_quiet_when_safe() {
        let config = Config {
            secret_key: "s3cr3t".to_string(),
            ..Config::default()
        };
        assert!(captured_logs(|| config.warn_insecure_with(true)).is_empty());
    }

    #[test]
    fn test_insecure_tls_requires_env_override() {
        let mut config = Config::default();
        assert!(!config.accept_invalid_certs_with(true));

        config.tls.accept_invalid_certs = true;
        assert!(!config.accept_invalid_certs_with(false));
        assert!(config.accept_invalid_certs_with(true));
    }

    #[test]
    fn test_endpoints_from_config() {
        let config = Config::default();
        let endpoints = config.endpoints();
        assert_eq!(
            endpoints.verification_code_url(),
            "https://api.edificemc.com/auth/verificationcode"
        );
        assert_eq!(endpoints.signup_url(), "https://www.edificemc.com/#/signup");
        assert_eq!(config.credentials().secret_key(), "secret");
    }
}
