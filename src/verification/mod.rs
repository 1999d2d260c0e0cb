//! Verification code exchange with the remote Edifice service.
//!
//! ```text
//! ProfileId ──► VerificationClient ──POST /auth/verificationcode──► REST API
//!                     │
//!                     ▼ (status, body)
//!                 classify() ──► VerificationOutcome
//! ```
//!
//! One attempt produces exactly one [`VerificationOutcome`]. Nothing is
//! retried or cached: every verification state lives in the remote service.

mod classify;
mod client;
mod endpoints;
mod outcome;

pub use classify::{ALREADY_SIGNED_UP_MESSAGE, ResponseBody, classify};
pub use client::{ClientBuildError, MAX_BODY_BYTES, VerificationClient};
pub use endpoints::{Credentials, Endpoints};
pub use outcome::VerificationOutcome;

use crate::profile::ProfileId;
use async_trait::async_trait;

/// Source of verification outcomes for a connecting profile.
///
/// [`VerificationClient`] is the HTTP implementation; hosts and tests may
/// provide their own.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Issue (or look up) the verification code for `profile`.
    ///
    /// Total: always returns exactly one outcome, never an error.
    async fn issue(&self, profile: ProfileId) -> VerificationOutcome;
}
