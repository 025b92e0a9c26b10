// Token lifecycle: minting, verification, expiry and tamper rejection.

use chrono::{Duration, Utc};

use mercato::config::AuthConfig;
use mercato::core::search::RoleFilterMode;
use mercato::core::AppError;
use mercato::modules::auth::services::token::{
    create_access_token, decode_access_token, encode_claims, JwtClaims,
};

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        jwt_exp_secs: 86400,
        role_filter_mode: RoleFilterMode::Combine,
    }
}

#[test]
fn test_minted_token_round_trips() {
    let config = test_config();
    let token = create_access_token("user-42", "u@example.com", &config).unwrap();
    let claims = decode_access_token(&token, &config.jwt_secret).unwrap();
    assert_eq!(claims.user_id, "user-42");
    assert_eq!(claims.email, "u@example.com");
}

#[test]
fn test_expiry_is_fixed_duration_from_issuance() {
    let config = test_config();
    let before = Utc::now().timestamp();
    let token = create_access_token("user-42", "u@example.com", &config).unwrap();
    let claims = decode_access_token(&token, &config.jwt_secret).unwrap();
    let after = Utc::now().timestamp();

    assert!(claims.exp >= before + config.jwt_exp_secs);
    assert!(claims.exp <= after + config.jwt_exp_secs);
}

#[test]
fn test_expired_token_is_unauthorized() {
    let config = test_config();
    let claims = JwtClaims {
        user_id: "user-42".to_string(),
        email: "u@example.com".to_string(),
        exp: (Utc::now() - Duration::hours(3)).timestamp(),
    };
    let token = encode_claims(&claims, &config.jwt_secret).unwrap();
    let err = decode_access_token(&token, &config.jwt_secret).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn test_tampered_token_is_unauthorized() {
    let config = test_config();
    let token = create_access_token("user-42", "u@example.com", &config).unwrap();

    // flip a character inside the payload segment
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    assert_eq!(parts.len(), 3);
    let mut payload: Vec<char> = parts[1].chars().collect();
    let i = payload.len() / 2;
    payload[i] = if payload[i] == 'A' { 'B' } else { 'A' };
    parts[1] = payload.into_iter().collect();
    let tampered = parts.join(".");

    let err = decode_access_token(&tampered, &config.jwt_secret).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn test_token_signed_with_other_secret_is_unauthorized() {
    let config = test_config();
    let token = create_access_token("user-42", "u@example.com", &config).unwrap();
    let err = decode_access_token(&token, "some-other-secret").unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn test_garbage_token_is_unauthorized() {
    let config = test_config();
    let err = decode_access_token("not.a.jwt", &config.jwt_secret).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
