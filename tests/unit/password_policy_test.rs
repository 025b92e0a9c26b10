// Password policy and hash round-trips.

use mercato::core::AppError;
use mercato::modules::auth::services::password::{
    hash_password, validate_password_policy, verify_password,
};

#[test]
fn test_round_trip_for_policy_valid_passwords() {
    for password in ["Password1", "Tr0ubadour!", "aB3defgh", "LongerPassphrase9"] {
        validate_password_policy(password).unwrap();
        let hash = hash_password(password).unwrap();
        assert!(
            verify_password(password, &hash).unwrap(),
            "original password must verify"
        );
        assert!(
            !verify_password("Different1", &hash).unwrap(),
            "other passwords must not verify"
        );
    }
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("Password1").unwrap();
    let second = hash_password("Password1").unwrap();
    assert_ne!(first, second);
    assert!(verify_password("Password1", &first).unwrap());
    assert!(verify_password("Password1", &second).unwrap());
}

#[test]
fn test_policy_names_the_unmet_rule() {
    let cases = [
        ("Ab1", "at least 8 characters"),
        ("Abcdefgh", "at least one number"),
        ("abcdefg1", "uppercase and lowercase"),
        ("ABCDEFG1", "uppercase and lowercase"),
    ];
    for (password, expected) in cases {
        let err = validate_password_policy(password).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(_)),
            "expected validation error for {password:?}"
        );
        assert!(
            err.to_string().contains(expected),
            "message for {password:?} should name the rule: {err}"
        );
    }
}

#[test]
fn test_exact_boundary_length_passes() {
    assert!(validate_password_policy("Abcdef1x").is_ok());
}

#[test]
fn test_verify_rejects_garbage_hash() {
    assert!(verify_password("Password1", "not-a-phc-string").is_err());
}
