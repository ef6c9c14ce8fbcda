//! Field validation shared by the store and the CLI.

use crate::errors::CoreError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Reject empty or whitespace-only values.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Check that a rating is one of 1..=5 and narrow it to `u8`.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the rating is out of range.
pub fn validate_rating(rating: i64) -> Result<u8, CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    u8::try_from(rating).map_err(|e| CoreError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_ratings_in_range(#[case] rating: i64) {
        assert_eq!(i64::from(validate_rating(rating).unwrap()), rating);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(i64::MAX)]
    fn rejects_ratings_out_of_range(#[case] rating: i64) {
        assert!(matches!(
            validate_rating(rating),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn blank_values_are_rejected() {
        assert!(require_non_empty("name", "deal").is_ok());
        let err = require_non_empty("comment", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: comment is required");
    }
}
