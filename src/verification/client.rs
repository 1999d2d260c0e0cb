//! HTTP client for the verification code endpoint.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use super::{Credentials, Endpoints, VerificationOutcome, VerificationService, classify};
use crate::config::{Config, ValidationError, insecure_tls_env_present, validate};
use crate::profile::ProfileId;

const USER_AGENT: &str = concat!("edifice-auth/", env!("CARGO_PKG_VERSION"));

/// Most response body bytes read; the rest is discarded.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Errors constructing the HTTP client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Body of `POST /auth/verificationcode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationRequest {
    player_id: String,
}

impl VerificationRequest {
    fn new(profile: ProfileId) -> Self {
        Self {
            player_id: profile.wire_form(),
        }
    }
}

/// Single-shot client for the verification service.
///
/// Cheap to share behind an `Arc`; concurrent attempts are independent.
pub struct VerificationClient {
    endpoints: Endpoints,
    credentials: Credentials,
    http_client: reqwest::Client,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl VerificationClient {
    /// Create a client with full certificate validation.
    pub fn new(
        endpoints: Endpoints,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ClientBuildError> {
        Self::build(endpoints, credentials, timeout, false)
    }

    /// Create a client from the loaded configuration.
    ///
    /// Rejects a configuration that fails [`validate`], logging each error.
    /// Certificate validation is only skipped when both the config flag and
    /// the environment override are present.
    pub fn from_config(config: &Config) -> Result<Self, ClientBuildError> {
        Self::from_config_with(config, insecure_tls_env_present())
    }

    pub(crate) fn from_config_with(
        config: &Config,
        env_override: bool,
    ) -> Result<Self, ClientBuildError> {
        if let Err(errors) = validate(config) {
            for e in &errors {
                warn!(error = %e, "Invalid configuration");
            }
            return Err(ClientBuildError::InvalidConfig(errors));
        }
        config.warn_insecure_with(env_override);
        Self::build(
            config.endpoints(),
            config.credentials(),
            config.request_timeout(),
            config.accept_invalid_certs_with(env_override),
        )
    }

    fn build(
        endpoints: Endpoints,
        credentials: Credentials,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, ClientBuildError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        debug!(
            rest_base = %endpoints.rest_base(),
            timeout_ms = timeout.as_millis() as u64,
            accept_invalid_certs,
            "Verification client initialized"
        );

        Ok(Self {
            endpoints,
            credentials,
            http_client,
            timeout,
            accept_invalid_certs,
        })
    }

    /// Whether this client skips certificate validation.
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Issue a code, giving up after `budget` or the configured timeout, whichever is shorter.
    pub async fn issue_within(&self, profile: ProfileId, budget: Duration) -> VerificationOutcome {
        let budget = budget.min(self.timeout);
        match tokio::time::timeout(budget, self.exchange(profile)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(profile = %profile, budget = ?budget, "Verification request timed out");
                VerificationOutcome::transport(format!("request timed out after {:?}", budget))
            }
        }
    }

    /// One request/response exchange, without the outer deadline.
    async fn exchange(&self, profile: ProfileId) -> VerificationOutcome {
        let url = self.endpoints.verification_code_url();
        let started = Instant::now();

        let response = match self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, self.credentials.secret_key())
            .json(&VerificationRequest::new(profile))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(profile = %profile, url = %url, error = %e, "Verification request failed");
                return VerificationOutcome::transport(describe(&e));
            }
        };

        let status = response.status();
        let raw_body = match read_capped(response, MAX_BODY_BYTES).await {
            Ok(text) => text,
            Err(e) => {
                warn!(profile = %profile, status = status.as_u16(), error = %e, "Failed to read verification response");
                return VerificationOutcome::transport(describe(&e));
            }
        };

        debug!(
            profile = %profile,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Verification response received"
        );

        let outcome = classify(status, &raw_body, &self.endpoints);
        if let VerificationOutcome::MalformedResponse { raw_body } = &outcome {
            warn!(
                profile = %profile,
                status = status.as_u16(),
                raw_body = %raw_body,
                "Malformed verification response"
            );
        }
        outcome
    }
}

/// Read at most `limit` bytes of the body as (lossy) UTF-8.
async fn read_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<String, reqwest::Error> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - buf.len();
        if chunk.len() >= room {
            buf.extend_from_slice(&chunk[..room]);
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[async_trait]
impl VerificationService for VerificationClient {
    async fn issue(&self, profile: ProfileId) -> VerificationOutcome {
        self.issue_within(profile, self.timeout).await
    }
}

/// Short cause text for a transport error, shown to the player.
fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not connect to the verification service".to_string()
    } else {
        err.to_string()
    }
}
