use serde::Serialize;

use crate::ids::PrincipalIdentifier;

/// Placeholder for an identifier the cache has not answered yet.
///
/// Everything here is derived from the identifier itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingEntry {
    pub identifier: PrincipalIdentifier,
    pub is_group: bool,
}

impl PendingEntry {
    pub fn from_identifier(identifier: &PrincipalIdentifier) -> Self {
        Self {
            identifier: identifier.clone(),
            is_group: identifier.is_group(),
        }
    }

    pub fn placeholder_label(&self) -> &'static str {
        if self.is_group {
            "Unknown group"
        } else {
            "Unknown user"
        }
    }
}
