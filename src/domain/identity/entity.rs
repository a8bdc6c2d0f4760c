//! Identity entity supplied by the user directory

use serde::{Deserialize, Serialize};

/// Numeric identifier of an authenticated identity
///
/// Serialized into token subjects as plain decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(u64);

impl IdentityId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parse a token subject back into an identifier.
    ///
    /// Only non-empty runs of ASCII digits are accepted; signs, whitespace
    /// and values that overflow `u64` are rejected.
    pub fn from_subject(subject: &str) -> Option<Self> {
        if subject.is_empty() || !subject.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        subject.parse().ok().map(Self)
    }

    /// Subject claim representation
    pub fn to_subject(&self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for IdentityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A verified identity, read-only input to token issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: IdentityId,
    first_name: String,
    last_name: String,
}

impl Identity {
    pub fn new(
        id: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: IdentityId::new(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn id(&self) -> IdentityId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Presentation name carried in access tokens, never used for authorization
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_roundtrip() {
        let id = IdentityId::new(42);
        assert_eq!(id.to_subject(), "42");
        assert_eq!(IdentityId::from_subject("42"), Some(id));
    }

    #[test]
    fn test_from_subject_rejects_non_digits() {
        assert_eq!(IdentityId::from_subject(""), None);
        assert_eq!(IdentityId::from_subject("-1"), None);
        assert_eq!(IdentityId::from_subject("+1"), None);
        assert_eq!(IdentityId::from_subject(" 1"), None);
        assert_eq!(IdentityId::from_subject("1a"), None);
        assert_eq!(IdentityId::from_subject("user-1"), None);
    }

    #[test]
    fn test_from_subject_rejects_overflow() {
        assert_eq!(IdentityId::from_subject("18446744073709551616"), None);
        assert_eq!(
            IdentityId::from_subject("18446744073709551615"),
            Some(IdentityId::new(u64::MAX))
        );
    }

    #[test]
    fn test_display_name() {
        let identity = Identity::new(1, "Admin", "User");
        assert_eq!(identity.display_name(), "Admin User");
        assert_eq!(identity.id().value(), 1);
    }
}
