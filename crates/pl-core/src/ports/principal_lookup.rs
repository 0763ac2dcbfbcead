use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::LookupError;
use crate::ids::PrincipalIdentifier;
use crate::principal::PrincipalRecord;

/// Body of one batched lookup call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub identifiers: Vec<PrincipalIdentifier>,
}

/// Identifier -> record. Identifiers the endpoint could not resolve are absent.
pub type LookupResponse = HashMap<PrincipalIdentifier, PrincipalRecord>;

/// Batched metadata lookup.
///
/// Implementations must be cancel-safe: the caller drops the future when the
/// request is superseded and never expects a partial effect.
#[async_trait]
pub trait PrincipalLookupPort: Send + Sync {
    async fn lookup(&self, request: LookupRequest) -> Result<LookupResponse, LookupError>;
}

/// Parse a raw JSON lookup body into a response map.
pub fn parse_response(body: &str) -> Result<LookupResponse, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_keys_by_identifier() {
        let body = r#"{
            "User:1": {"identifier": "User:1", "name": "Alice", "group": false, "user_id": 1},
            "Group:5": {"identifier": "Group:5", "name": "Staff", "group": true}
        }"#;

        let response = parse_response(body).unwrap();
        assert_eq!(response.len(), 2);
        assert!(response[&PrincipalIdentifier::from("Group:5")].is_group);
        assert_eq!(response[&PrincipalIdentifier::from("User:1")].name, "Alice");
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        let err = parse_response("[1, 2]").unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let request = LookupRequest {
            identifiers: vec!["User:1".into(), "Group:5".into()],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"identifiers": ["User:1", "Group:5"]})
        );
    }
}
