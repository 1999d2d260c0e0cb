//! # Edifice login interception
//!
//! Diverts every connection attempt to a game server into an out-of-band
//! verification flow backed by the Edifice web service. The player is
//! disconnected with either a fresh verification code, a pointer to the
//! login page, or an error description.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      EdificeAuth                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  connection attempt                                     │
//! │   └─► LoginInterceptor ──► VerificationClient (HTTP)    │
//! │            │                    └─► classify()          │
//! │            └─► render() ──► message + cancel            │
//! │                                                         │
//! │  session established                                    │
//! │   └─► PostCancelGuard ──► kick                          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Modules:
//! - [`config`]: TOML configuration, defaults and validation
//! - [`verification`]: the request/response exchange and its classification
//! - [`message`]: styled disconnect messages
//! - [`login`]: connection-attempt interception and the post-cancel guard

pub mod config;
pub mod login;
pub mod message;
pub mod plugin;
pub mod profile;
pub mod telemetry;
pub mod verification;

pub use config::Config;
pub use login::{ConnectedPlayer, ConnectionAttempt, LoginInterceptor, PostCancelGuard};
pub use message::{StyledMessage, render};
pub use plugin::EdificeAuth;
pub use profile::ProfileId;
pub use verification::{VerificationClient, VerificationOutcome, VerificationService};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
