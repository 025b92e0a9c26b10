//! URL-safe slug derivation from display names.

/// Derive a slug: lowercase ASCII alphanumerics, everything else collapsed
/// into single hyphens, no leading or trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Fresh Fruit"), "fresh-fruit");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn test_strips_non_ascii() {
        assert_eq!(slugify("Café & Bar"), "caf-bar");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let first = slugify("Home & Garden: Tools!");
        assert_eq!(slugify(&first), first);
    }
}
