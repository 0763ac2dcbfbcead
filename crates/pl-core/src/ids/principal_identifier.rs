use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

const GROUP_PREFIX: &str = "Group:";

/// Syntactic kind of a principal, taken from the identifier prefix.
/// 主体类型（由标识符前缀决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    pub fn is_group(self) -> bool {
        matches!(self, PrincipalKind::Group)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("principal identifier must not be empty")]
    Empty,
}

/// Opaque `<Kind>:<id>` reference to a user or a group.
///
/// The value is never validated beyond being non-empty when parsed from user
/// input; anything that does not start with `Group:` is treated as a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalIdentifier(String);

impl PrincipalIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an identifier typed by a user, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn kind(&self) -> PrincipalKind {
        if self.0.starts_with(GROUP_PREFIX) {
            PrincipalKind::Group
        } else {
            PrincipalKind::User
        }
    }

    pub fn is_group(&self) -> bool {
        self.kind().is_group()
    }
}

impl Display for PrincipalIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PrincipalIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<String> for PrincipalIdentifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PrincipalIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_prefix_is_group() {
        let id = PrincipalIdentifier::from("Group:5");
        assert_eq!(id.kind(), PrincipalKind::Group);
        assert!(id.is_group());
    }

    #[test]
    fn test_user_prefix_is_user() {
        let id = PrincipalIdentifier::from("User:1");
        assert_eq!(id.kind(), PrincipalKind::User);
    }

    #[test]
    fn test_unknown_prefix_defaults_to_user() {
        assert_eq!(PrincipalIdentifier::from("ExternalUser:x").kind(), PrincipalKind::User);
        // prefix match is case sensitive
        assert_eq!(PrincipalIdentifier::from("group:5").kind(), PrincipalKind::User);
    }

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        assert_eq!(
            PrincipalIdentifier::parse("  User:1 ").unwrap().as_str(),
            "User:1"
        );
        assert_eq!(PrincipalIdentifier::parse("   "), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = PrincipalIdentifier::from("Group:5");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Group:5\"");
    }
}
