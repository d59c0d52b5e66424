//! # Validation Module
//!
//! Input checks that run before any totals arithmetic.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  └── `min` hints only, raw numeric input gets through                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Types: quantity must be a whole number                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── quantity ≥ 1, never coerced                                       │
//! │  ├── price / tax rate / discount ≥ 0                                   │
//! │  └── description present                                               │
//! │                                                                         │
//! │  A discount LARGER than the line is not an error here: the engine      │
//! │  clamps it and flags the result.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{LineItem, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted line description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line item description.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_DESCRIPTION_LEN` characters
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_description;
///
/// assert!(validate_description("Char kuey teow").is_ok());
/// assert!(validate_description("   ").is_err());
/// ```
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0). Zero and negatives are rejected, not coerced to 1,
///   so data-entry mistakes surface on the form.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates that a decimal amount is zero or greater.
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_non_negative;
/// use rust_decimal::Decimal;
///
/// assert!(validate_non_negative("unit_price", Decimal::ZERO).is_ok());     // free item
/// assert!(validate_non_negative("unit_price", Decimal::new(-1, 2)).is_err());
/// ```
pub fn validate_non_negative(field: &str, amount: Decimal) -> ValidationResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate. Any non-negative percentage is accepted.
pub fn validate_tax_rate(field: &str, rate: TaxRate) -> ValidationResult<()> {
    validate_non_negative(field, rate.percent())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a line item, first failure wins.
///
/// Checks run in form order: description, quantity, unit price, tax rate,
/// discount.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_description(&item.description)?;
    validate_quantity(item.quantity)?;
    validate_non_negative("unit_price", item.unit_price)?;
    validate_tax_rate("tax_rate", item.tax_rate)?;
    validate_non_negative("discount", item.discount)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
