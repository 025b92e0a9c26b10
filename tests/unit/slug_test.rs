// Slug derivation properties.

use proptest::prelude::*;

use mercato::core::slug::slugify;

#[test]
fn test_known_derivations() {
    assert_eq!(slugify("Fresh Fruit"), "fresh-fruit");
    assert_eq!(slugify("Home & Garden"), "home-garden");
    assert_eq!(slugify("  Trimmed  "), "trimmed");
    assert_eq!(slugify("already-a-slug"), "already-a-slug");
    assert_eq!(slugify("ALLCAPS"), "allcaps");
}

proptest! {
    #[test]
    fn test_deterministic(name in ".{0,64}") {
        prop_assert_eq!(slugify(&name), slugify(&name));
    }

    #[test]
    fn test_output_alphabet_is_url_safe(name in ".{0,64}") {
        let slug = slugify(&name);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn test_idempotent_on_own_output(name in ".{0,64}") {
        let slug = slugify(&name);
        prop_assert_eq!(slugify(&slug), slug.clone());
    }
}
