use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Permissions, User};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Full replace of the mutable fields; the password only changes when a
/// non-empty one is supplied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub login: String,
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub role: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// What the API hands out: a user with the password hash stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub login: String,
    pub role: String,
    pub permissions: Permissions,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            login: user.login,
            role: user.role,
            permissions: user.permissions,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn response_carries_no_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            login: "ana".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "FISCAL".to_string(),
            permissions: Permissions::default(),
            active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["login"], "ana");
        assert_eq!(json["permissions"]["can_view"], true);
    }

    #[test]
    fn create_payload_defaults_to_view_only_permissions() {
        let payload: CreateUserPayload = serde_json::from_str(
            r#"{"name":"Ana","login":"ana","password":"secret1","role":"HR"}"#,
        )
        .unwrap();
        assert!(payload.permissions.can_view);
        assert!(!payload.permissions.can_create);
        assert!(!payload.permissions.can_edit);
        assert!(!payload.permissions.can_delete);
    }
}
