use serde::{Deserialize, Serialize};

use crate::ids::{PrincipalIdentifier, UserId};

/// Display metadata for a resolved principal.
/// 已解析主体的展示信息
///
/// The same shape is returned by the lookup endpoint and handed over by the
/// search collaborators when the user picks new principals. Field names are
/// accepted in both `snake_case` and `camelCase` on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    pub identifier: PrincipalIdentifier,

    pub name: String,

    /// Secondary line (affiliation, email, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(rename = "group", alias = "isGroup", alias = "is_group", default)]
    pub is_group: bool,

    /// Only users carry one; it keys the favorite set
    #[serde(
        default,
        alias = "userId",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<UserId>,
}

impl PrincipalRecord {
    pub fn user(identifier: impl Into<PrincipalIdentifier>, name: &str, user_id: impl Into<UserId>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.to_string(),
            detail: None,
            is_group: false,
            user_id: Some(user_id.into()),
        }
    }

    pub fn group(identifier: impl Into<PrincipalIdentifier>, name: &str) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.to_string(),
            detail: None,
            is_group: true,
            user_id: None,
        }
    }

    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
