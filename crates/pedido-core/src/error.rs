//! # Error Types
//!
//! Typed errors for the order-entry core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pedido-core errors (this file)                                        │
//! │  ├── OrderError       - Draft mutation failures                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  The CALCULATION functions never error: zero prices, empty             │
//! │  selections, and odd quantities all flow through arithmetically        │
//! │  (see pricing.rs). Errors exist only on the mutation/validation        │
//! │  surface the form calls before the arithmetic runs.                    │
//! │                                                                         │
//! │  Flow: ValidationError → OrderError → bridge layer → form message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Order Error
// =============================================================================

/// Errors from mutating an order draft.
///
/// These are surfaced to the form as field-level messages; they never
/// abort a recalculation.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The referenced item is not in the current selection.
    ///
    /// ## When This Occurs
    /// - Setting a quantity/price/rate for an item that was deselected
    /// - A stale row callback firing after the selection changed
    #[error("Item not selected: {0}")]
    ItemNotSelected(String),

    /// The draft has reached the maximum number of distinct lines.
    #[error("Order cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet requirements; they are raised
/// before any override lands in the draft.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g. invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with OrderError.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OrderError::ItemNotSelected("abc-123".to_string());
        assert_eq!(err.to_string(), "Item not selected: abc-123");

        let err = OrderError::TooManyItems { max: 100 };
        assert_eq!(err.to_string(), "Order cannot have more than 100 items");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "icms rate".to_string(),
            min: 0,
            max: 10000,
        };
        assert_eq!(err.to_string(), "icms rate must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_order_error() {
        let validation_err = ValidationError::Required {
            field: "item id".to_string(),
        };
        let order_err: OrderError = validation_err.into();
        assert!(matches!(order_err, OrderError::Validation(_)));
    }
}
