//! Password hashing and the complexity policy for new passwords.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::core::{AppError, Result};

/// Hash a password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Configuration(format!("Failed to hash password: {e}")))
}

/// Verify a candidate password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Configuration(format!("Invalid hash format: {e}")))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// New and changed passwords must be at least 8 characters with a digit,
/// an uppercase and a lowercase letter. Each violation names its rule.
pub fn validate_password_policy(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters long",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "Password must contain at least one number",
        ));
    }
    if !(password.chars().any(|c| c.is_uppercase()) && password.chars().any(|c| c.is_lowercase())) {
        return Err(AppError::validation(
            "Password must contain both uppercase and lowercase characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("Sup3rSecret").unwrap();
        assert!(verify_password("Sup3rSecret", &hash).unwrap());
        assert!(!verify_password("WrongPassw0rd", &hash).unwrap());
    }

    #[test]
    fn test_policy_accepts_compliant_password() {
        assert!(validate_password_policy("Password1").is_ok());
    }

    #[test]
    fn test_policy_rejects_short() {
        let err = validate_password_policy("Pw1").unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn test_policy_rejects_missing_digit() {
        let err = validate_password_policy("Passwords").unwrap_err();
        assert!(err.to_string().contains("at least one number"));
    }

    #[test]
    fn test_policy_rejects_single_case() {
        let err = validate_password_policy("password1").unwrap_err();
        assert!(err.to_string().contains("uppercase and lowercase"));
    }
}
