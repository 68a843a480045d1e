//! # Validation Module
//!
//! Input validation for order-form fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (React Native / react-hook-form)                        │
//! │  ├── Basic format checks (empty, keyboard type)                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, called by the bridge before mutating a draft    │
//! │  ├── Range/finiteness checks                                           │
//! │  └── Typed errors the form maps to field messages                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend re-validation on submit                              │
//! │                                                                         │
//! │  The CALCULATOR runs regardless: validation gates what lands in the    │
//! │  draft, never whether totals recompute (pricing.rs is total).          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pedido_core::validation::{validate_quantity, validate_rate_bps};
//!
//! validate_quantity(2.5).unwrap();
//! validate_rate_bps(1800).unwrap(); // ICMS 18%
//! ```

use crate::error::ValidationError;
use crate::{MAX_INPUT_CENTS, MAX_LINE_QUANTITY, MAX_RATE_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an item identifier.
///
/// ## Rules
/// - Must not be empty
/// - Must be a backend-issued UUID
///
/// ## Example
/// ```rust
/// use pedido_core::validation::validate_item_id;
///
/// assert!(validate_item_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_item_id("not-a-uuid").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "item id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be finite
/// - Must be positive (> 0); quantities may be fractional (2.5 kg)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        // Fractional quantities below 1 are fine; the real lower bound
        // is "positive", checked above
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative (zero means "no price yet", which is reported
///   downstream via `has_valid_price`, not rejected here)
/// - Must not exceed the currency-input cap
///
/// ## Example
/// ```rust
/// use pedido_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok()); // R$ 10,99
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_INPUT_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_INPUT_CENTS,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Typical ICMS rates are 400-2000 bps, IPI 0-2000 bps
pub fn validate_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: MAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
