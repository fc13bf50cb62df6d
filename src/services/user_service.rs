use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dto::user_dto::{CreateUserPayload, UpdateUserPayload},
    error::{Error, Result},
    models::user::{Permissions, User, ROLE_ADMIN},
    utils::crypto::hash_password,
};

/// Bootstrap credentials; the operator is expected to rotate these after
/// first login.
pub const DEFAULT_ADMIN_LOGIN: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

const LIST_CAP: i64 = 1000;

const USER_COLUMNS: &str = "id, name, login, password_hash, role, \
     can_view, can_create, can_edit, can_delete, active, created_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE login = $1"
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, payload: CreateUserPayload, caller: &User) -> Result<User> {
        require_admin(caller)?;

        if self.find_by_login(&payload.login).await?.is_some() {
            return Err(Error::DuplicateLogin);
        }

        let password_hash = hash_password(&payload.password)?;
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, login, password_hash, role,
                                can_view, can_create, can_edit, can_delete)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.login)
        .bind(&password_hash)
        .bind(&payload.role)
        .bind(payload.permissions.can_view)
        .bind(payload.permissions.can_create)
        .bind(payload.permissions.can_edit)
        .bind(payload.permissions.can_delete)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list(&self, caller: &User) -> Result<Vec<User>> {
        require_admin(caller)?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at LIMIT $1"
        ))
        .bind(LIST_CAP)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Full replace of name/login/role/permissions. The password changes
    /// only when a non-empty one is supplied; `active` and `created_at`
    /// cannot be altered through this path.
    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload, caller: &User) -> Result<User> {
        require_admin(caller)?;

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let password_hash = match payload.password.as_deref() {
            Some(password) if !password.is_empty() => hash_password(password)?,
            _ => existing.password_hash,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = $2, login = $3, password_hash = $4, role = $5,
                 can_view = $6, can_create = $7, can_edit = $8, can_delete = $9
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.login)
        .bind(&password_hash)
        .bind(&payload.role)
        .bind(payload.permissions.can_view)
        .bind(payload.permissions.can_create)
        .bind(payload.permissions.can_edit)
        .bind(payload.permissions.can_delete)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid, caller: &User) -> Result<()> {
        require_admin(caller)?;

        // Applies to ADMIN as well: the last administrator must not be able
        // to lock everyone out by removing themselves.
        if id == caller.id {
            return Err(Error::SelfDeletion);
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Startup bootstrap: if no ADMIN-role user exists (any login), create
    /// the default one so the system is never inaccessible. Idempotent per
    /// process start.
    pub async fn ensure_default_admin(&self) -> Result<()> {
        let admin_exists =
            sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE role = $1 LIMIT 1")
                .bind(ROLE_ADMIN)
                .fetch_optional(&self.pool)
                .await?
                .is_some();

        if admin_exists {
            return Ok(());
        }

        let permissions = Permissions::all();
        sqlx::query(
            "INSERT INTO users (id, name, login, password_hash, role,
                                can_view, can_create, can_edit, can_delete)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(Uuid::new_v4())
        .bind(DEFAULT_ADMIN_NAME)
        .bind(DEFAULT_ADMIN_LOGIN)
        .bind(hash_password(DEFAULT_ADMIN_PASSWORD)?)
        .bind(ROLE_ADMIN)
        .bind(permissions.can_view)
        .bind(permissions.can_create)
        .bind(permissions.can_edit)
        .bind(permissions.can_delete)
        .execute(&self.pool)
        .await?;

        tracing::info!(login = DEFAULT_ADMIN_LOGIN, "default admin user created");
        Ok(())
    }
}

fn require_admin(caller: &User) -> Result<()> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Only administrators may manage users".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::ROLE_HR;
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    // Lazy pool: these tests cover the guard clauses that fail before any
    // query is issued, so no database is needed.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://unused@127.0.0.1:1/unused")
            .expect("lazy pool")
    }

    fn user(id: Uuid, role: &str) -> User {
        User {
            id,
            name: "Test".to_string(),
            login: "test".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            permissions: Permissions::default(),
            active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn non_admin_cannot_create_users() {
        let service = UserService::new(unreachable_pool());
        let caller = user(Uuid::new_v4(), ROLE_HR);
        let payload: CreateUserPayload = serde_json::from_str(
            r#"{"name":"Ana","login":"ana","password":"secret1","role":"HR"}"#,
        )
        .unwrap();

        let err = service.create(payload, &caller).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn non_admin_cannot_list_users() {
        let service = UserService::new(unreachable_pool());
        let caller = user(Uuid::new_v4(), ROLE_HR);
        let err = service.list(&caller).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn admin_cannot_delete_own_account() {
        let service = UserService::new(unreachable_pool());
        let id = Uuid::new_v4();
        let caller = user(id, ROLE_ADMIN);
        let err = service.delete(id, &caller).await.unwrap_err();
        assert!(matches!(err, Error::SelfDeletion));
    }
}
