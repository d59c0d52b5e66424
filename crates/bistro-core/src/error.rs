//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Totals engine failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bistro-cli errors (host binary)                                       │
//! │  └── anyhow::Error    - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow → stderr / exit code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line index, field name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a form-level message in the UI

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Totals engine errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item failed validation.
    ///
    /// ## When This Occurs
    /// - Quantity is zero or negative
    /// - Unit price, tax rate or discount is negative
    /// - Description is empty
    ///
    /// ## User Workflow
    /// ```text
    /// Invoice form: row 3 has quantity 0
    ///      │
    ///      ▼
    /// compute_invoice_totals(items)
    ///      │
    ///      ▼
    /// InvalidLineItem { index: 2, source: MustBePositive { "quantity" } }
    ///      │
    ///      ▼
    /// UI highlights row 3: "quantity must be positive"
    /// ```
    #[error("Line item {index}: {source}")]
    InvalidLineItem {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// An order-level parameter (discount, service tax rate) failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The aggregate no longer satisfies
    /// `grand_total == subtotal - total_discount + total_tax`.
    ///
    /// This is a defect signal, never a user error.
    #[error("Totals out of balance: expected {expected}, got {actual} (tolerance {tolerance})")]
    RoundingToleranceExceeded {
        expected: Decimal,
        actual: Decimal,
        tolerance: Decimal,
    },

    /// A multiplication or sum left the representable decimal range.
    #[error("Arithmetic overflow while computing {context}")]
    ArithmeticOverflow { context: String },
}

impl CoreError {
    /// Attaches a line index to a bare validation error.
    ///
    /// Other variants pass through untouched.
    pub fn at_line(self, index: usize) -> Self {
        match self {
            CoreError::Validation(source) => CoreError::InvalidLineItem { index, source },
            other => other,
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        CoreError::ArithmeticOverflow {
            context: context.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any arithmetic runs, so no partial result ever escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
