//! JWT minting and verification.
//!
//! Tokens carry `{user_id, email, exp}` and expire a fixed duration after
//! issuance; there is no sliding refresh.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::core::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: String,
    pub email: String,
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, exp_secs: i64) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            exp: (Utc::now() + Duration::seconds(exp_secs)).timestamp(),
        }
    }
}

/// Sign claims with the shared secret (HS256).
pub fn encode_claims(claims: &JwtClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Configuration(format!("Failed to sign token: {e}")))
}

/// Mint an access token for a user per the configured expiry.
pub fn create_access_token(user_id: &str, email: &str, auth: &AuthConfig) -> Result<String> {
    let claims = JwtClaims::new(user_id, email, auth.jwt_exp_secs);
    encode_claims(&claims, &auth.jwt_secret)
}

/// Verify signature and expiry; any failure collapses to Unauthorized.
pub fn decode_access_token(token: &str, secret: &str) -> Result<JwtClaims> {
    decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_round_trip() {
        let claims = JwtClaims::new("user-1", "a@b.c", 3600);
        let token = encode_claims(&claims, SECRET).unwrap();
        let decoded = decode_access_token(&token, SECRET).unwrap();
        assert_eq!(decoded.user_id, "user-1");
        assert_eq!(decoded.email, "a@b.c");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = JwtClaims::new("user-1", "a@b.c", 3600);
        let token = encode_claims(&claims, SECRET).unwrap();
        let err = decode_access_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = JwtClaims {
            user_id: "user-1".to_string(),
            email: "a@b.c".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode_claims(&claims, SECRET).unwrap();
        let err = decode_access_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
