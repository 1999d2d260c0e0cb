use std::fmt;

const VERIFICATION_CODE_PATH: &str = "/auth/verificationcode";
const SIGNUP_PATH: &str = "/signup";
const LOGIN_PATH: &str = "/login";

/// Remote service locations. Immutable after startup.
///
/// Paths are appended textually so a fragment-routed web base such as
/// `https://www.edificemc.com/#` yields `https://www.edificemc.com/#/signup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    rest_base: String,
    web_base: String,
}

impl Endpoints {
    /// Build from the configured REST and web base URIs.
    ///
    /// Trailing slashes are stripped from both bases; anything else,
    /// including a `#` fragment marker, is kept verbatim.
    pub fn new(rest_base: impl Into<String>, web_base: impl Into<String>) -> Self {
        Self {
            rest_base: trim_base(rest_base.into()),
            web_base: trim_base(web_base.into()),
        }
    }

    pub fn rest_base(&self) -> &str {
        &self.rest_base
    }

    pub fn verification_code_url(&self) -> String {
        format!("{}{}", self.rest_base, VERIFICATION_CODE_PATH)
    }

    pub fn signup_url(&self) -> String {
        format!("{}{}", self.web_base, SIGNUP_PATH)
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.web_base, LOGIN_PATH)
    }
}

fn trim_base(mut base: String) -> String {
    let trimmed_len = base.trim_end_matches('/').len();
    base.truncate(trimmed_len);
    base
}

/// Shared secret presented to the verification service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    secret_key: String,
}

impl Credentials {
    /// Wrap the shared secret. It is never printed by `Debug`.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
