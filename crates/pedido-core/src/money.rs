//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The order form recomputes totals on every keystroke. If each           │
//! │  recomputation carries fractional centavos forward, the displayed       │
//! │  grand total drifts away from what the backend will invoice.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    Every arithmetic step that can produce a fraction rounds to a        │
//! │    whole centavo immediately. Nothing unrounded ever crosses a          │
//! │    function boundary.                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pedido_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_cents(1099); // R$ 10,99
//!
//! // Arithmetic operations
//! let doubled = price * 2;             // R$ 21,98
//! let total = price + Money::from_cents(500); // R$ 15,99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for adjustments and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for bridge payloads
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.price_cents ──┬──► resolve_price ──► LineCalculation.subtotal    │
/// │                     │                                                   │
/// │                     └──► Displayed as "R$ 10,99" in the form            │
/// │                                                                         │
/// │  subtotal ──► ICMS/IPI amounts ──► line total ──► OrderTotals           │
/// │                                                                         │
/// │  EVERY monetary value in the order form flows through this type        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use pedido_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Centavos?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The backend, calculations, and bridge payloads all use centavos.
    /// Only the rendered string carries the `R$ x,yy` shape.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// ## Example
    /// ```rust
    /// use pedido_core::money::Money;
    ///
    /// let price = Money::from_reais(10, 99); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the reais part should be negative.
    /// `from_reais(-5, 50)` = -R$ 5,50, not -R$ 4,50.
    #[inline]
    pub const fn from_reais(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-real portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a tax rate, rounding half-up on the scaled integer.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF-UP ON CENTAVOS                                          │
    /// │                                                                     │
    /// │  R$ 10,00 × 8,25%  =  82,5 centavos  →  83 centavos                 │
    /// │  R$ 10,00 × 8,24%  =  82,4 centavos  →  82 centavos                 │
    /// │                                                                     │
    /// │  The ERP backend rounds each tax amount to the nearest centavo      │
    /// │  (half-up) before summing, and the form must agree with the         │
    /// │  invoice to the centavo.                                            │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides the half-up rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use pedido_core::money::Money;
    /// use pedido_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(30000); // R$ 300,00
    /// let icms = TaxRate::from_percentage(10.0);
    ///
    /// assert_eq!(subtotal.apply_rate(icms).cents(), 3000); // R$ 30,00
    /// ```
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        // i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 825 = 8.25%
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies by a possibly-fractional quantity, rounding half-up.
    ///
    /// Quantities on the order form may be decimal (e.g. 2.5 kg), so this is
    /// the one place float math enters. The product is rounded to a whole
    /// centavo immediately; the fraction never escapes.
    ///
    /// ## Example
    /// ```rust
    /// use pedido_core::money::Money;
    ///
    /// let unit = Money::from_cents(333); // R$ 3,33
    /// assert_eq!(unit.scale_by(2.5).cents(), 833); // 832,5 → 833
    /// ```
    pub fn scale_by(&self, quantity: f64) -> Money {
        if !quantity.is_finite() {
            return Money::zero();
        }
        // f64::round is half-away-from-zero, which is half-up for the
        // non-negative amounts the order form produces
        Money::from_cents((self.0 as f64 * quantity).round() as i64)
    }

    /// Multiplies money by a whole quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pedido_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // R$ 2,99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // R$ 8,97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation renders the Brazilian convention:
/// `.` as thousands separator, `,` as decimal separator.
///
/// ## Note
/// `Money::zero()` still renders as "R$ 0,00" here; the currency input's
/// empty-for-zero behavior lives in [`crate::input::format_cents`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            group_thousands(self.reais().abs()),
            self.centavos_part()
        )
    }
}

/// Formats a non-negative integer with `.` between every group of three
/// digits, e.g. `1234567` → `"1.234.567"`.
pub(crate) fn group_thousands(mut value: i64) -> String {
    debug_assert!(value >= 0);
    if value < 1000 {
        return value.to_string();
    }
    let mut groups = Vec::new();
    while value >= 1000 {
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.push(value.to_string());
    groups.reverse();
    groups.join(".")
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line amounts (aggregation is plain centavo addition).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
