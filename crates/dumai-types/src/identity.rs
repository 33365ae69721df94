use serde::{Deserialize, Serialize};

/// Credential stored for identities created through the name-only login flow.
///
/// Authentication is not implemented; the value only fills the slot.
pub const PLACEHOLDER_CREDENTIAL: &str = "placeholder";

/// Numeric identity id, assigned monotonically by the identity registry.
pub type UserId = u64;

/// A registered display name with a stable numeric id.
///
/// Usernames are unique and case-sensitive. Identities are never updated or
/// deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    /// Opaque credential. Never sent to clients.
    #[serde(skip_serializing, default)]
    pub credential: String,
}

impl Identity {
    /// Create an identity record with an already allocated id.
    pub fn new(id: UserId, username: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            credential: credential.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serialize_hides_credential() {
        let identity = Identity::new(7, "ada", "hunter2");
        let json = serde_json::to_string(&identity).unwrap();
        assert!(json.contains("\"username\":\"ada\""));
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("credential"));
    }

    #[test]
    fn test_identity_deserialize_without_credential() {
        let parsed: Identity = serde_json::from_str(r#"{"id":3,"username":"bob"}"#).unwrap();
        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.username, "bob");
        assert!(parsed.credential.is_empty());
    }
}
