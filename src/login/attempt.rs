use crate::message::StyledMessage;
use crate::profile::ProfileId;

/// Progress of one connection attempt through the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttemptPhase {
    /// Observed, profile extracted.
    Idle,
    /// Verification call in flight; the host holds the connection open.
    AwaitingVerification,
    /// Message attached and attempt cancelled.
    Completed,
}

/// Host-delivered connection attempt, before a session exists.
///
/// The interceptor fills in the disconnect message and cancels it.
#[derive(Debug, Clone)]
pub struct ConnectionAttempt {
    profile: ProfileId,
    name: Option<String>,
    phase: AttemptPhase,
    cancelled: bool,
    message: Option<StyledMessage>,
}

impl ConnectionAttempt {
    /// A fresh attempt in [`AttemptPhase::Idle`], not yet cancelled.
    pub fn new(profile: ProfileId) -> Self {
        Self {
            profile,
            name: None,
            phase: AttemptPhase::Idle,
            cancelled: false,
            message: None,
        }
    }

    /// Attach the player name for log context.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn profile(&self) -> ProfileId {
        self.profile
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn message(&self) -> Option<&StyledMessage> {
        self.message.as_ref()
    }

    /// Consume the attempt, yielding `(cancelled, message)` for the host.
    pub fn into_verdict(self) -> (bool, Option<StyledMessage>) {
        (self.cancelled, self.message)
    }

    /// Move forward to `next`. Phases never go backwards.
    pub(crate) fn advance(&mut self, next: AttemptPhase) {
        if next > self.phase {
            self.phase = next;
        }
    }

    pub(crate) fn deny(&mut self, message: StyledMessage) {
        self.message = Some(message);
        self.cancelled = true;
        self.advance(AttemptPhase::Completed);
    }
}
