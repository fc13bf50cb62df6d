use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Account is inactive")]
    InactiveAccount,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Login is already taken")]
    DuplicateLogin,

    #[error("A user cannot delete their own account")]
    SelfDeletion,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated(_) | Error::InactiveAccount => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateLogin | Error::SelfDeletion | Error::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Config(_) | Error::Database(_) | Error::Anyhow(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // Store and internal failures are logged in full but never echoed
        // back to the caller.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", self);
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => {
                // Unique-index violation on users.login surfaces as the
                // domain error, closing the check-then-insert race.
                if other
                    .as_database_error()
                    .and_then(|db| db.code())
                    .is_some_and(|code| code == "23505")
                {
                    Error::DuplicateLogin
                } else {
                    Error::Database(other)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            Error::Unauthenticated("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(Error::InactiveAccount.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Forbidden("no can do".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::NotFound("client".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(Error::DuplicateLogin.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::SelfDeletion.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let resp = Error::Internal("secret connection string".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
