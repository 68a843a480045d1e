//! # Domain Types
//!
//! Core domain types for the order-entry form.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │     Item        │   │ LineCalculation  │   │   OrderTotals    │     │
//! │  │  ────────────── │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  id (UUID)      │   │  subtotal        │   │  subtotal        │     │
//! │  │  name           │──►│  icms_amount     │──►│  total_icms      │     │
//! │  │  price_cents    │   │  ipi_amount      │   │  grand_total     │     │
//! │  │  latest_price   │   │  total           │   │  average rates   │     │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────┘     │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    TaxRate      │   825 bps = 8,25%                                 │
//! │  │  bps (u32)      │   ICMS and IPI both use this type                 │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived vs. Owned
//! `Item` is owned by the form session and read-only here.
//! `LineCalculation` and `OrderTotals` are derived on every call and never
//! cached; the form recomputes them on each keystroke.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25%. ICMS/IPI rates arrive from the form as percentages
/// with up to two decimal places, which map exactly onto basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (0–100 scale).
    ///
    /// Non-finite or negative percentages become zero, matching the
    /// substitute-with-default policy everywhere else in this crate.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate(0);
        }
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Derives the rate `part` represents of `whole`, rounded half-up to the
    /// nearest basis point. Used for the aggregate average rates:
    /// `average_icms = total_icms / subtotal`.
    ///
    /// A non-positive `whole` yields the zero rate.
    pub fn ratio_of(part: Money, whole: Money) -> Self {
        if !whole.is_positive() {
            return TaxRate(0);
        }
        let bps = (part.cents() as i128 * 10000 + whole.cents() as i128 / 2)
            / whole.cents() as i128;
        TaxRate(bps.max(0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if the tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog item selectable on the order form.
///
/// Items come from the backend REST API and are read-only to this crate;
/// the form session owns them for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (backend-issued UUID).
    pub id: String,

    /// Display name shown on the form and the order summary.
    pub name: String,

    /// Base unit price in centavos.
    pub price_cents: i64,

    /// Most recent observed price in centavos, when the backend has one
    /// (e.g. from the latest confirmed order for this item).
    pub latest_price_cents: Option<i64>,

    /// Unit of measure for display ("un", "kg", "cx").
    pub unit: Option<String>,
}

impl Item {
    /// Returns the base price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the latest observed price as Money, if present.
    #[inline]
    pub fn latest_price(&self) -> Option<Money> {
        self.latest_price_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Line Calculation
// =============================================================================

/// The fully-derived calculation for one order line.
///
/// Recomputed from scratch on every input change; holds no mutable state.
/// Uses the snapshot pattern: the `item` is copied in so the line renders
/// consistently even if the selection map changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineCalculation {
    /// Item this line was computed for.
    pub item_id: String,

    /// Item snapshot at calculation time.
    pub item: Item,

    /// Quantity used (defaulted to 1 when the form has no entry).
    pub quantity: f64,

    /// Effective unit price after the resolution chain
    /// (manual override → latest price → base price → zero).
    pub unit_price: Money,

    /// ICMS rate applied to this line.
    pub icms_rate: TaxRate,

    /// IPI rate applied to this line.
    pub ipi_rate: TaxRate,

    /// quantity × unit_price, rounded to whole centavos.
    pub subtotal: Money,

    /// ICMS amount for this line.
    pub icms_amount: Money,

    /// IPI amount for this line.
    pub ipi_amount: Money,

    /// icms_amount + ipi_amount.
    pub tax_amount: Money,

    /// subtotal + tax_amount.
    pub total: Money,

    /// Whether the resolved unit price is positive. A zero price is still
    /// computed (amounts all zero), only flagged.
    pub has_valid_price: bool,
}

// =============================================================================
// Order Totals
// =============================================================================

/// Order-level totals folded over every line calculation.
///
/// Derived and recomputed on every call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Number of distinct selected items.
    pub total_items: usize,

    /// Sum of all line quantities.
    pub total_quantity: f64,

    /// Sum of line subtotals.
    pub subtotal: Money,

    /// Sum of line ICMS amounts.
    pub total_icms: Money,

    /// Sum of line IPI amounts.
    pub total_ipi: Money,

    /// total_icms + total_ipi.
    pub total_tax: Money,

    /// subtotal + total_tax.
    pub grand_total: Money,

    /// Every per-line calculation, sorted by item id so the form renders
    /// a stable list. Map iteration order never affects the totals above.
    pub lines: Vec<LineCalculation>,

    /// True when any line lacks a positive resolved price; the form uses
    /// this to block submission. This crate only reports the condition.
    pub has_items_without_price: bool,

    /// total_icms / subtotal, as a rate (zero when subtotal is zero).
    pub average_icms_rate: TaxRate,

    /// total_ipi / subtotal, as a rate (zero when subtotal is zero).
    pub average_ipi_rate: TaxRate,

    /// total_tax / subtotal, as a rate (zero when subtotal is zero).
    pub average_tax_rate: TaxRate,
}

impl OrderTotals {
    /// The all-zero totals an empty selection yields.
    pub fn empty() -> Self {
        OrderTotals {
            total_items: 0,
            total_quantity: 0.0,
            subtotal: Money::zero(),
            total_icms: Money::zero(),
            total_ipi: Money::zero(),
            total_tax: Money::zero(),
            grand_total: Money::zero(),
            lines: Vec::new(),
            has_items_without_price: false,
            average_icms_rate: TaxRate::zero(),
            average_ipi_rate: TaxRate::zero(),
            average_tax_rate: TaxRate::zero(),
        }
    }
}

impl Default for OrderTotals {
    fn default() -> Self {
        OrderTotals::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(100.0).bps(), 10000);
        assert_eq!(TaxRate::from_percentage(0.0).bps(), 0);
        assert_eq!(TaxRate::from_percentage(-3.0).bps(), 0);
        assert_eq!(TaxRate::from_percentage(f64::NAN).bps(), 0);
    }

    #[test]
    fn test_tax_rate_ratio_of() {
        // R$ 45,00 of R$ 300,00 = 15,00%
        let rate = TaxRate::ratio_of(Money::from_cents(4500), Money::from_cents(30000));
        assert_eq!(rate.bps(), 1500);

        // Zero denominator yields the zero rate, never a panic
        let rate = TaxRate::ratio_of(Money::from_cents(4500), Money::zero());
        assert!(rate.is_zero());
    }

    #[test]
    fn test_tax_rate_ratio_of_rounds_half_up() {
        // 1 of 3: 3333,33... bps → 3333
        let rate = TaxRate::ratio_of(Money::from_cents(100), Money::from_cents(300));
        assert_eq!(rate.bps(), 3333);

        // 1 of 16: 625 bps exactly
        let rate = TaxRate::ratio_of(Money::from_cents(100), Money::from_cents(1600));
        assert_eq!(rate.bps(), 625);
    }

    #[test]
    fn test_item_accessors() {
        let item = Item {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            name: "Parafuso 6mm".to_string(),
            price_cents: 1250,
            latest_price_cents: Some(1300),
            unit: Some("cx".to_string()),
        };
        assert_eq!(item.price().cents(), 1250);
        assert_eq!(item.latest_price().map(|p| p.cents()), Some(1300));
    }

    #[test]
    fn test_order_totals_empty() {
        let totals = OrderTotals::empty();
        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.total_quantity, 0.0);
        assert!(totals.grand_total.is_zero());
        assert!(totals.lines.is_empty());
        assert!(!totals.has_items_without_price);
        assert!(totals.average_tax_rate.is_zero());
    }

    #[test]
    fn test_bridge_payload_uses_camel_case() {
        let item = Item {
            id: "a".to_string(),
            name: "b".to_string(),
            price_cents: 100,
            latest_price_cents: None,
            unit: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("priceCents"));
        assert!(json.contains("latestPriceCents"));
    }
}
