use sqlx::PgPool;

use crate::{
    config::get_config,
    error::{Error, Result},
    models::user::User,
    utils::{crypto::verify_password, token::issue_token},
};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Credential check for POST /api/auth/login. Unknown login and wrong
    /// password return the same message, so the response does not reveal
    /// which logins exist.
    pub async fn login(&self, login: &str, password: &str) -> Result<(String, User)> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, login, password_hash, role,
                    can_view, can_create, can_edit, can_delete,
                    active, created_at
             FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        let user = user
            .filter(|u| verify_password(password, &u.password_hash))
            .ok_or_else(|| Error::Unauthenticated("Incorrect login or password".to_string()))?;

        if !user.active {
            return Err(Error::InactiveAccount);
        }

        let token = issue_token(user.id, &user.name, &get_config().jwt_secret)?;
        Ok((token, user))
    }
}
