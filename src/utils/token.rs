use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Session tokens are valid for a fixed 8-hour window from issue time.
pub const TOKEN_VALIDITY_HOURS: i64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub exp: usize,
}

pub fn issue_token(user_id: Uuid, user_name: &str, secret: &str) -> Result<String> {
    let expires_at = Utc::now() + chrono::Duration::hours(TOKEN_VALIDITY_HOURS);
    let claims = Claims {
        sub: user_id,
        name: user_name.to_string(),
        exp: expires_at.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("token signing failed: {}", e)))
}

/// Nothing in the token is trusted before the signature checks out. Zero
/// leeway keeps the validity window exact at the boundary.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            Error::Unauthenticated("Token expired".to_string())
        }
        _ => Error::Unauthenticated("Invalid token".to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_decodes_with_matching_claims() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "Ana", SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.name, "Ana");
    }

    #[test]
    fn expiry_sits_eight_hours_out() {
        let token = issue_token(Uuid::new_v4(), "Ana", SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        let now = Utc::now().timestamp() as usize;
        let eight_hours = (TOKEN_VALIDITY_HOURS * 3600) as usize;
        assert!(claims.exp > now + eight_hours - 60);
        assert!(claims.exp <= now + eight_hours);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            name: "Ana".to_string(),
            exp: (Utc::now() - chrono::Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = decode_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated(ref m) if m.contains("expired")));
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "Ana", "other-secret").unwrap();
        let err = decode_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = decode_token("definitely.not.a-jwt", SECRET).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated(_)));
    }
}
