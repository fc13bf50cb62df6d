use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    config::get_config,
    error::{Error, Result},
    utils::token::decode_token,
    AppState,
};

/// Bearer guard for every route except login and the health probe: verify
/// the token, then re-read the subject from the store so revoked or
/// deactivated accounts lose access immediately, not at token expiry.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::Unauthenticated("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthenticated("Unsupported authorization scheme".to_string()))?;

    let claims = decode_token(token, &get_config().jwt_secret)?;

    let user = state
        .user_service
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| Error::Unauthenticated("Account no longer exists".to_string()))?;

    if !user.active {
        return Err(Error::InactiveAccount);
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
