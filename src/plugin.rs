//! Host-facing entry point wiring the interceptor and the guard together.

use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::login::{ConnectedPlayer, ConnectionAttempt, LoginInterceptor, PostCancelGuard};
use crate::verification::{
    ClientBuildError, VerificationClient, VerificationOutcome, VerificationService,
};

/// What a host game server embeds: one handler per login event.
pub struct EdificeAuth {
    interceptor: LoginInterceptor<dyn VerificationService>,
    guard: PostCancelGuard,
}

impl EdificeAuth {
    /// Build the HTTP verification client from `config`.
    ///
    /// Fails with [`ClientBuildError::InvalidConfig`] when `config` does not
    /// pass validation.
    pub fn from_config(config: &Config) -> Result<Self, ClientBuildError> {
        let client = VerificationClient::from_config(config)?;
        info!(
            rest_uri = %config.rest_uri,
            web_uri = %config.web_uri,
            timeout_secs = config.request_timeout_secs,
            accept_invalid_certs = client.accepts_invalid_certs(),
            "Edifice verification ready"
        );
        Ok(Self::with_service(Arc::new(client)))
    }

    /// Use an arbitrary verification backend.
    pub fn with_service(service: Arc<dyn VerificationService>) -> Self {
        Self {
            interceptor: LoginInterceptor::new(service),
            guard: PostCancelGuard::new(),
        }
    }

    /// Connection attempt handler. Always cancels the attempt.
    pub async fn on_login(&self, attempt: &mut ConnectionAttempt) -> VerificationOutcome {
        self.interceptor.on_connection_attempt(attempt).await
    }

    /// Session established handler. Always kicks.
    pub async fn on_join(&self, player: &dyn ConnectedPlayer) {
        self.guard.on_session_established(player).await
    }

    pub fn guard(&self) -> &PostCancelGuard {
        &self.guard
    }
}
