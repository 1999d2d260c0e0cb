use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, error};

use crate::message::StyledMessage;
use crate::profile::ProfileId;
use crate::telemetry::spans;

/// Disconnect text used when a player slips past the login interceptor.
pub const GUARD_KICK_MESSAGE: &str = "You must finish registration before joining.";

/// A player with an established session, as exposed by the host.
#[async_trait]
pub trait ConnectedPlayer: Send + Sync {
    fn profile_id(&self) -> ProfileId;

    fn name(&self) -> Option<&str> {
        None
    }

    /// Forcibly end the session with `message`.
    async fn kick(&self, message: StyledMessage);
}

/// Kicks players that reach the joined state.
///
/// Every login is cancelled by the interceptor, so a join is always a host
/// contract violation.
#[derive(Debug, Default)]
pub struct PostCancelGuard {
    violations: AtomicU64,
}

impl PostCancelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn on_session_established(&self, player: &dyn ConnectedPlayer) {
        let profile = player.profile_id();
        let span = spans::session_guard(&profile, player.name());
        async {
            let violations = self.violations.fetch_add(1, Ordering::Relaxed) + 1;
            error!(
                violations,
                "Contract violation: session established for a cancelled login, kicking"
            );
            player
                .kick(StyledMessage::new().plain(GUARD_KICK_MESSAGE))
                .await;
        }
        .instrument(span)
        .await
    }

    /// Number of sessions kicked so far.
    pub fn violations(&self) -> u64 {
        self.violations.load(Ordering::Relaxed)
    }
}
