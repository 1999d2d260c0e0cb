//! Player profile identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Globally unique identifier of a connecting player, as supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Wrap the UUID the host extracted from the login handshake.
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The `playerId` value sent to the verification service.
    ///
    /// Always the hyphenated lowercase form.
    pub fn wire_form(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for ProfileId {
    type Err = uuid::Error;

    /// Accepts both the hyphenated and the simple (32 hex digits) forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_hyphenated() {
        let id: ProfileId = "069a79f444e94726a5befca90e38aaf5".parse().unwrap();
        assert_eq!(id.wire_form(), "069a79f4-44e9-4726-a5be-fca90e38aaf5");
        assert_eq!(id.to_string(), id.wire_form());
    }

    #[test]
    fn test_parse_accepts_both_forms() {
        let hyphenated: ProfileId = "069a79f4-44e9-4726-a5be-fca90e38aaf5".parse().unwrap();
        let simple: ProfileId = "069A79F444E94726A5BEFCA90E38AAF5".parse().unwrap();
        assert_eq!(hyphenated, simple);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<ProfileId>().is_err());
    }
}
