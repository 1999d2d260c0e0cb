//! Login interception.
//!
//! Every connection attempt is diverted to the verification flow and then
//! cancelled; a normal session never starts from here. Players finish
//! registration on the companion website and log in there.

mod attempt;
mod guard;
mod interceptor;

pub use attempt::{AttemptPhase, ConnectionAttempt};
pub use guard::{ConnectedPlayer, GUARD_KICK_MESSAGE, PostCancelGuard};
pub use interceptor::LoginInterceptor;
