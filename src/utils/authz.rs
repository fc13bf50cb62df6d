use crate::models::user::User;

/// The four request kinds the permission model knows about. Anything else
/// simply cannot be expressed, so unknown actions are denied by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

/// Advisory check: ADMIN passes unconditionally, everyone else needs the
/// matching permission flag. Callers turn `false` into a 403.
pub fn authorize(user: &User, action: Action) -> bool {
    if user.is_admin() {
        return true;
    }

    match action {
        Action::View => user.permissions.can_view,
        Action::Create => user.permissions.can_create,
        Action::Edit => user.permissions.can_edit,
        Action::Delete => user.permissions.can_delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Permissions, ROLE_ADMIN, ROLE_FISCAL};
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: &str, permissions: Permissions) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            login: "test.user".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            permissions,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn no_permissions() -> Permissions {
        Permissions {
            can_view: false,
            can_create: false,
            can_edit: false,
            can_delete: false,
        }
    }

    #[test]
    fn admin_bypasses_permission_flags() {
        let admin = user(ROLE_ADMIN, no_permissions());
        for action in [Action::View, Action::Create, Action::Edit, Action::Delete] {
            assert!(authorize(&admin, action));
        }
    }

    #[test]
    fn non_admin_needs_the_matching_flag() {
        let viewer = user(
            ROLE_FISCAL,
            Permissions {
                can_view: true,
                ..no_permissions()
            },
        );
        assert!(authorize(&viewer, Action::View));
        assert!(!authorize(&viewer, Action::Create));
        assert!(!authorize(&viewer, Action::Edit));
        assert!(!authorize(&viewer, Action::Delete));
    }

    #[test]
    fn flags_grant_each_action_independently() {
        let editor = user(
            ROLE_FISCAL,
            Permissions {
                can_edit: true,
                ..no_permissions()
            },
        );
        assert!(authorize(&editor, Action::Edit));
        assert!(!authorize(&editor, Action::View));
    }
}
