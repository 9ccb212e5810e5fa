//! Identity - Opaque account identity
//!
//! Approvers and transfer destinations are both identified this way. The
//! engine never interprets the contents; it only compares identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum identity length in characters
pub const MAX_IDENTITY_LEN: usize = 128;

/// Errors that can occur when parsing identities
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Empty identity")]
    Empty,

    #[error("Identity too long (max 128 chars): {0}")]
    TooLong(String),

    #[error("Identity contains whitespace or control characters: {0:?}")]
    InvalidCharacter(String),
}

/// An account identity.
///
/// # Examples
/// ```
/// use multisig_core::Identity;
///
/// let alice: Identity = "0xA11CE".parse().unwrap();
/// assert_eq!(alice.as_str(), "0xA11CE");
///
/// assert!("".parse::<Identity>().is_err());
/// assert!("two words".parse::<Identity>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Parse and validate an identity
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdentityError> {
        value.as_ref().parse()
    }

    /// Returns the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(IdentityError::Empty);
        }

        if s.chars().count() > MAX_IDENTITY_LEN {
            return Err(IdentityError::TooLong(s.to_string()));
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(IdentityError::InvalidCharacter(s.to_string()));
        }

        Ok(Identity(s.to_string()))
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id: Identity = "  alice ".parse().unwrap();
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn test_identities_are_case_sensitive() {
        let lower: Identity = "alice".parse().unwrap();
        let upper: Identity = "ALICE".parse().unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!("   ".parse::<Identity>(), Err(IdentityError::Empty));
        assert!(matches!(
            "al ice".parse::<Identity>(),
            Err(IdentityError::InvalidCharacter(_))
        ));
        assert!(matches!(
            "al\u{0007}ice".parse::<Identity>(),
            Err(IdentityError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_rejects_too_long() {
        let long = "a".repeat(MAX_IDENTITY_LEN + 1);
        assert!(matches!(long.parse::<Identity>(), Err(IdentityError::TooLong(_))));

        let max = "a".repeat(MAX_IDENTITY_LEN);
        assert!(max.parse::<Identity>().is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let id: Identity = serde_json::from_str("\"0xBEEF\"").unwrap();
        assert_eq!(id.to_string(), "0xBEEF");
        assert!(serde_json::from_str::<Identity>("\"\"").is_err());
    }
}
