//! Span constructors for login observability.

/// Standardized span constructors.
pub mod spans {
    use crate::profile::ProfileId;
    use tracing::{Span, info_span};

    /// Span for one connection attempt.
    pub fn login_attempt(profile: &ProfileId, name: Option<&str>) -> Span {
        if let Some(name) = name {
            info_span!("login_attempt", profile = %profile, name = %name)
        } else {
            info_span!("login_attempt", profile = %profile)
        }
    }

    /// Span for a post-cancel guard check.
    pub fn session_guard(profile: &ProfileId, name: Option<&str>) -> Span {
        if let Some(name) = name {
            info_span!("session_guard", profile = %profile, name = %name)
        } else {
            info_span!("session_guard", profile = %profile)
        }
    }
}
