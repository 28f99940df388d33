//! Validation helpers for DTOs.

use validator::ValidationError;

/// Highest rating a game can receive.
pub const MAX_RATING: f64 = 5.0;

/// Validates that a rating lies in `[0, 5]` and is a whole number of half stars.
///
/// # Examples
///
/// ```ignore
/// validate_rating(&4.5) // Ok
/// validate_rating(&5.5) // Err - above maximum
/// validate_rating(&2.25) // Err - not a half step
/// ```
pub fn validate_rating(rating: impl std::borrow::Borrow<f64>) -> Result<(), ValidationError> {
    let rating = *rating.borrow();
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        let mut err = ValidationError::new("rating_range");
        err.message =
            Some(format!("rating must be between 0 and {MAX_RATING} (got {rating})").into());
        return Err(err);
    }

    if (rating * 2.0).fract() != 0.0 {
        let mut err = ValidationError::new("rating_step");
        err.message = Some(format!("rating must be a multiple of 0.5 (got {rating})").into());
        return Err(err);
    }

    Ok(())
}
