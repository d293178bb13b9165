//! URL slugs for categories, recipes and ingredients.

use crate::error::ValidationError;
use unicode_normalization::UnicodeNormalization;

/// Turn a title into a URL slug.
///
/// Accented letters are decomposed (NFKD) and their marks dropped, so
/// "brûlée" becomes "brulee". ASCII letters and digits are kept (lowercased),
/// underscores are kept, runs of whitespace and hyphens collapse into a
/// single `-`, and everything else is dropped. Leading and trailing hyphens
/// and underscores are trimmed.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.nfkd() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Check a client-supplied slug: ASCII letters, digits, hyphens and
/// underscores only.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(slugify("Pasta 1"), "pasta-1");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("  Soups  and -- Stews "), "soups-and-stews");
    }

    #[test]
    fn test_drops_punctuation() {
        assert_eq!(slugify("Mom's Apple Pie!"), "moms-apple-pie");
    }

    #[test]
    fn test_transliterates_accents() {
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
        assert_eq!(slugify("Jalapeño Poppers"), "jalapeno-poppers");
    }

    #[test]
    fn test_trims_underscores_and_dashes_together() {
        assert_eq!(slugify("_ a"), "a");
        assert_eq!(slugify("a _"), "a");
        assert_eq!(slugify("__a__b__"), "a__b");
        assert_eq!(slugify("a _ b"), "a-_-b");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify(" - "), "");
        assert_eq!(slugify("_-_"), "");
    }

    #[test]
    fn test_validate_slug() {
        assert_eq!(validate_slug("soups_and-stews-2"), Ok(()));
        assert_eq!(
            validate_slug("Soups & Stews!"),
            Err(ValidationError::InvalidSlug("Soups & Stews!".to_string()))
        );
        assert!(validate_slug("crème").is_err());
        assert!(validate_slug("").is_err());
    }
}
