/// Result of one verification exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// A fresh code was issued; the player finishes signup on the website.
    Issued { code: String, signup_url: String },
    /// The profile already has an account.
    AlreadyRegistered { login_url: String },
    /// The service answered with an error status.
    RemoteError {
        status: u16,
        error_text: String,
        message_text: Option<String>,
    },
    /// No status could be obtained (connect, TLS, timeout, body read).
    TransportFailure { cause: String },
    /// A status was obtained but the body did not have the expected shape.
    MalformedResponse { raw_body: String },
}

impl VerificationOutcome {
    /// Static label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Issued { .. } => "issued",
            Self::AlreadyRegistered { .. } => "already_registered",
            Self::RemoteError { .. } => "remote_error",
            Self::TransportFailure { .. } => "transport_failure",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }

    /// Whether this outcome is a failure of the exchange rather than a business result.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::RemoteError { .. } | Self::TransportFailure { .. } | Self::MalformedResponse { .. }
        )
    }

    pub(crate) fn transport(cause: impl Into<String>) -> Self {
        Self::TransportFailure {
            cause: cause.into(),
        }
    }
}
