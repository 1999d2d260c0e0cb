//! Mapping of raw service responses to outcomes.

use reqwest::StatusCode;
use serde::Deserialize;

use super::{Endpoints, VerificationOutcome};

/// Message the service returns (with 400) for a profile that already has an account.
///
/// Matched literally: the service exposes no machine-readable error code for
/// this case, so any rewording on its side turns the result into a `RemoteError`.
pub const ALREADY_SIGNED_UP_MESSAGE: &str = "User already signed up.";

/// JSON body of a verification response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseBody {
    /// Verification code (201 only).
    #[serde(default)]
    pub code: Option<String>,
    /// Short error identifier.
    #[serde(default)]
    pub error: Option<String>,
    /// Human-readable explanation.
    #[serde(default)]
    pub message: Option<String>,
}

/// Classify a response from its status and raw body text.
pub fn classify(status: StatusCode, raw_body: &str, endpoints: &Endpoints) -> VerificationOutcome {
    let Some(body) = parse_body(raw_body) else {
        return malformed(raw_body);
    };

    match status {
        StatusCode::CREATED => match body.code {
            Some(code) => VerificationOutcome::Issued {
                code,
                signup_url: endpoints.signup_url(),
            },
            None => malformed(raw_body),
        },
        StatusCode::BAD_REQUEST if is_already_signed_up(&body) => {
            VerificationOutcome::AlreadyRegistered {
                login_url: endpoints.login_url(),
            }
        }
        _ => VerificationOutcome::RemoteError {
            status: status.as_u16(),
            error_text: body
                .error
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string()),
            message_text: body.message,
        },
    }
}

/// Parse `raw_body` as a JSON object with the expected field types.
fn parse_body(raw_body: &str) -> Option<ResponseBody> {
    match serde_json::from_str::<serde_json::Value>(raw_body) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn is_already_signed_up(body: &ResponseBody) -> bool {
    body.message.as_deref() == Some(ALREADY_SIGNED_UP_MESSAGE)
}

fn malformed(raw_body: &str) -> VerificationOutcome {
    VerificationOutcome::MalformedResponse {
        raw_body: raw_body.to_string(),
    }
}
