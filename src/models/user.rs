use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_FISCAL: &str = "FISCAL";
pub const ROLE_ACCOUNTING: &str = "ACCOUNTING";
pub const ROLE_HR: &str = "HR";

pub const ROLES: [&str; 4] = [ROLE_ADMIN, ROLE_FISCAL, ROLE_ACCOUNTING, ROLE_HR];

/// Per-action grants used for every role except ADMIN, which bypasses them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Permissions {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            can_view: true,
            can_create: false,
            can_edit: false,
            can_delete: false,
        }
    }
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_delete: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub login: String,
    // Never leaves the process, even if a handler ever serializes the
    // model directly instead of going through UserResponse.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    #[sqlx(flatten)]
    pub permissions: Permissions,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
