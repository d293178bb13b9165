pub mod account;
pub mod error;
pub mod image;
pub mod ingredient;
pub mod listing;
pub mod permission;
pub mod rating;
pub mod slug;

pub use account::{validate_account, AccountFields};
pub use error::ValidationError;
pub use image::{
    ensure_image_slot, image_too_large, validate_image, MAX_IMAGES_PER_RECIPE,
    MAX_PROFILE_IMAGE_SIZE, MAX_RECIPE_IMAGE_SIZE,
};
pub use ingredient::{describe, normalize_name, IngredientName, Quantity, Unit};
pub use listing::{like_pattern, parse_ordering, search_terms, Direction, OrderTerm, SortField};
pub use permission::{check_all, Actor, Denial, Operation, Policy};
pub use rating::{validate_rating, MAX_RATING, MIN_RATING};
pub use slug::{slugify, validate_slug};

/// Maximum length of category titles and slugs and recipe titles.
pub const MAX_TITLE_LEN: usize = 155;

/// Trim a required text field and check it is non-blank and within `max`
/// characters.
pub fn require_text(
    field: &'static str,
    value: &str,
    max: Option<usize>,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    if let Some(max) = max {
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Title", "  Soups ", Some(10)), Ok("Soups".to_string()));
        assert_eq!(require_text("Title", "   ", None), Err(ValidationError::Blank("Title")));
        assert_eq!(
            require_text("Title", "abcdef", Some(3)),
            Err(ValidationError::TooLong {
                field: "Title",
                max: 3
            })
        );
    }
}
