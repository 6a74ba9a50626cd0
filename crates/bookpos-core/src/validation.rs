//! # Validation & Input Coercion
//!
//! Field-level checks and the documented coercion rules for raw operator
//! input. Drafts run their own commit validation (see [`crate::draft`]);
//! this module is the layer UI collaborators call while a value is still a
//! string in a text box.
//!
//! ## Coercion Rules
//! Raw input is coerced, not rejected, where the original card UI did the
//! same: an unparsable price becomes 0.0, which the engine treats as "not
//! yet a real line item". The rule lives here, explicit and tested, rather
//! than as an inline swallow at the parse site.

use crate::error::ValidationError;
use crate::{MAX_MANAGER_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book title: non-empty after trimming, bounded length.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::Required { field: "title" });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }
    Ok(())
}

/// Validates a manager display name: non-empty after trimming, bounded
/// length. Used both for line-item attribution and registry additions.
pub fn validate_manager_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "manager" });
    }
    if name.chars().count() > MAX_MANAGER_LEN {
        return Err(ValidationError::TooLong {
            field: "manager",
            max: MAX_MANAGER_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Coercion
// =============================================================================

/// Coerces a raw price string to a number.
///
/// Unparsable input (including empty) coerces to `0.0`; the engine then
/// prices it as a zero quote and commit validation blocks it. Parsable
/// negatives are passed through so validation can name the real problem.
pub fn coerce_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_must_be_non_empty() {
        assert!(validate_title("Kokoro").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"あ".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_manager_names_are_bounded() {
        assert!(validate_manager_name("Kelly").is_ok());
        assert!(validate_manager_name(" ").is_err());
        assert!(validate_manager_name(&"x".repeat(MAX_MANAGER_LEN + 1)).is_err());
    }

    #[test]
    fn test_unparsable_prices_coerce_to_zero() {
        assert_eq!(coerce_price(""), 0.0);
        assert_eq!(coerce_price("abc"), 0.0);
        assert_eq!(coerce_price("12.5.1"), 0.0);
        assert_eq!(coerce_price(" 1000 "), 1000.0);
        assert_eq!(coerce_price("12.5"), 12.5);
        // Negatives parse; commit validation names the real problem.
        assert_eq!(coerce_price("-3"), -3.0);
    }
}
