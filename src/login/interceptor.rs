use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info, warn};

use super::{AttemptPhase, ConnectionAttempt};
use crate::message::render;
use crate::telemetry::spans;
use crate::verification::{VerificationOutcome, VerificationService};

/// Diverts connection attempts into the verification flow.
///
/// Holds no per-attempt state; one instance serves concurrent attempts.
pub struct LoginInterceptor<S: ?Sized> {
    service: Arc<S>,
}

impl<S: VerificationService + ?Sized> LoginInterceptor<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Run the verification exchange for `attempt`, attach the resulting
    /// disconnect message and cancel it.
    ///
    /// The attempt is cancelled for every outcome.
    pub async fn on_connection_attempt(
        &self,
        attempt: &mut ConnectionAttempt,
    ) -> VerificationOutcome {
        let span = spans::login_attempt(&attempt.profile(), attempt.name());
        async {
            let profile = attempt.profile();
            let started = Instant::now();

            attempt.advance(AttemptPhase::AwaitingVerification);
            debug!("Awaiting verification service");
            let outcome = self.service.issue(profile).await;

            attempt.deny(render(&outcome));

            let elapsed_ms = started.elapsed().as_millis() as u64;
            if outcome.is_failure() {
                warn!(
                    outcome = outcome.kind(),
                    elapsed_ms,
                    detail = ?outcome,
                    "Login denied, verification failed"
                );
            } else {
                info!(
                    outcome = outcome.kind(),
                    elapsed_ms,
                    "Login denied, verification pending"
                );
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

impl<S: ?Sized> Clone for LoginInterceptor<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
