//! Request attribute types for the policy evaluator.

use serde::{Deserialize, Serialize};

/// Attributes of the user making a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    /// User-id of the user making the request.
    #[serde(rename = "userID", default)]
    pub user_id: String,

    /// Group-id the user belongs to.
    #[serde(rename = "groupID", default)]
    pub group_id: String,

    /// Roles held by the user. Order is irrelevant to matching.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserAttributes {
    /// Creates user attributes with the given user-id and no group or roles.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Sets the group-id.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

/// Attributes of the resource being accessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAttributes {
    /// Name of the resource.
    #[serde(default)]
    pub resource: String,

    /// Namespace of the resource.
    #[serde(default)]
    pub namespace: String,

    /// True for read-only requests.
    #[serde(rename = "readOnly", default)]
    pub read_only: bool,
}

impl ResourceAttributes {
    /// Creates resource attributes for a write request with no namespace.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Marks the request as read-only or not.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_names() {
        let user: UserAttributes =
            serde_json::from_str(r#"{"userID": "u1", "groupID": "g1", "roles": ["admin"]}"#)
                .unwrap();
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.group_id, "g1");
        assert_eq!(user.roles, vec!["admin".to_string()]);
    }

    #[test]
    fn test_resource_wire_names() {
        let resource: ResourceAttributes =
            serde_json::from_str(r#"{"resource": "pods", "readOnly": true}"#).unwrap();
        assert_eq!(resource.resource, "pods");
        assert_eq!(resource.namespace, "");
        assert!(resource.read_only);

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["readOnly"], serde_json::json!(true));
    }

    #[test]
    fn test_builders() {
        let user = UserAttributes::new("u1").with_group("g1").with_role("dev");
        assert_eq!(user.roles, vec!["dev".to_string()]);

        let resource = ResourceAttributes::new("r1")
            .with_namespace("ns")
            .with_read_only(true);
        assert_eq!(resource.namespace, "ns");
        assert!(resource.read_only);
    }
}
