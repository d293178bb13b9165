use crate::error::ValidationError;

pub const MIN_RATING: i16 = 0;
pub const MAX_RATING: i16 = 10;

/// Check a submitted rating value and narrow it to the stored column type.
pub fn validate_rating(value: i64) -> Result<i16, ValidationError> {
    if value < i64::from(MIN_RATING) || value > i64::from(MAX_RATING) {
        return Err(ValidationError::RatingOutOfRange {
            value,
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }
    Ok(value as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        assert_eq!(validate_rating(0), Ok(0));
        assert_eq!(validate_rating(10), Ok(10));
    }

    #[test]
    fn test_out_of_range() {
        assert!(validate_rating(-1).is_err());
        assert!(validate_rating(11).is_err());
        assert!(validate_rating(i64::MAX).is_err());
    }
}
