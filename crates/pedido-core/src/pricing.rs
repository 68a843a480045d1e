//! # Pricing Module
//!
//! Price resolution, per-line tax math, and order-level aggregation.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Form Recalculation                            │
//! │                                                                         │
//! │  Selection maps (item, qty, manual price, ICMS, IPI)                   │
//! │       │                                                                 │
//! │       ▼  per item                                                       │
//! │  resolve_price ──► calculate_line ──► LineCalculation                  │
//! │       │                  │                                              │
//! │       │                  │  subtotal = round(qty × price)              │
//! │       │                  │  icms     = round(subtotal × rate)          │
//! │       │                  │  ipi      = round(subtotal × rate)          │
//! │       │                  │  total    = subtotal + icms + ipi           │
//! │       ▼                  ▼                                              │
//! │  aggregate ─────────────────────────► OrderTotals                      │
//! │       (exact centavo sums over already-rounded lines)                  │
//! │                                                                         │
//! │  PURE • SYNCHRONOUS • O(selected items) • runs on every keystroke      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Authority
//! Each line's amounts are rounded to whole centavos the moment they are
//! produced (half-up on the scaled integer). Aggregate totals are exact
//! integer sums of those rounded lines, which is the strategy the backend
//! applies when it re-prices the submitted order.
//!
//! ## Totality
//! Nothing in this module errors or panics. Zero prices, zero or negative
//! quantities, and empty selections all flow through arithmetically; the
//! only failure signal is the `has_valid_price` / `has_items_without_price`
//! pair, which the form turns into a submission block.

use std::collections::HashMap;

use crate::money::Money;
use crate::types::{Item, LineCalculation, OrderTotals, TaxRate};

// =============================================================================
// Price Resolution
// =============================================================================

/// Resolves the effective unit price for an item.
///
/// ## Priority Chain (first positive wins)
/// ```text
/// manual override  ──►  latest observed price  ──►  base price  ──►  R$ 0,00
/// ```
///
/// A fully-zero result is reported, never rejected: callers read
/// `price > 0` as the `has_valid_price` flag.
///
/// ## Example
/// ```rust
/// use pedido_core::pricing::resolve_price;
/// use pedido_core::types::Item;
///
/// let item = Item {
///     id: "i1".to_string(),
///     name: "Cimento 50kg".to_string(),
///     price_cents: 3000,
///     latest_price_cents: Some(2000),
///     unit: None,
/// };
///
/// assert_eq!(resolve_price(&item, Some(1000)).cents(), 1000); // manual wins
/// assert_eq!(resolve_price(&item, None).cents(), 2000);       // then latest
/// ```
pub fn resolve_price(item: &Item, manual_price_cents: Option<i64>) -> Money {
    if let Some(manual) = manual_price_cents {
        if manual > 0 {
            return Money::from_cents(manual);
        }
    }
    if let Some(latest) = item.latest_price_cents {
        if latest > 0 {
            return Money::from_cents(latest);
        }
    }
    // Base price, clamped: a negative price from a bad payload is treated
    // as absent rather than producing negative line totals
    Money::from_cents(item.price_cents.max(0))
}

// =============================================================================
// Line Calculation
// =============================================================================

/// Computes the full calculation for one order line.
///
/// Steps (each producing whole centavos before the next runs):
/// 1. price   = [`resolve_price`]
/// 2. subtotal = quantity × price, rounded half-up
/// 3. ICMS and IPI amounts = subtotal × rate, rounded half-up
/// 4. tax amount = ICMS + IPI (exact)
/// 5. total = subtotal + tax (exact)
///
/// Quantity validation is the caller's concern; zero and negative
/// quantities pass straight through the arithmetic.
pub fn calculate_line(
    item: &Item,
    quantity: f64,
    manual_price_cents: Option<i64>,
    icms_rate: TaxRate,
    ipi_rate: TaxRate,
) -> LineCalculation {
    let unit_price = resolve_price(item, manual_price_cents);
    let subtotal = unit_price.scale_by(quantity);
    let icms_amount = subtotal.apply_rate(icms_rate);
    let ipi_amount = subtotal.apply_rate(ipi_rate);
    let tax_amount = icms_amount + ipi_amount;
    let total = subtotal + tax_amount;

    LineCalculation {
        item_id: item.id.clone(),
        item: item.clone(),
        quantity,
        unit_price,
        icms_rate,
        ipi_rate,
        subtotal,
        icms_amount,
        ipi_amount,
        tax_amount,
        total,
        has_valid_price: unit_price.is_positive(),
    }
}

// =============================================================================
// Order Aggregation
// =============================================================================

/// Folds every selected line into order-level totals.
///
/// ## Defaults
/// - Missing quantity entry: `1`
/// - Missing manual price entry: no override (resolution chain applies)
/// - Missing rate entry: `0%`
///
/// ## Guarantees
/// - An empty selection yields [`OrderTotals::empty`], not an error.
/// - Map iteration order never affects the totals (centavo sums commute);
///   the returned `lines` are sorted by item id so the form renders a
///   stable list.
/// - `average_*_rate` is the aggregate amount over the aggregate subtotal,
///   expressed to the nearest basis point, or zero when the subtotal is.
pub fn aggregate(
    selections: &HashMap<String, Item>,
    quantities: &HashMap<String, f64>,
    manual_prices: &HashMap<String, i64>,
    icms_rates: &HashMap<String, TaxRate>,
    ipi_rates: &HashMap<String, TaxRate>,
) -> OrderTotals {
    if selections.is_empty() {
        return OrderTotals::empty();
    }

    let mut lines: Vec<LineCalculation> = selections
        .iter()
        .map(|(id, item)| {
            calculate_line(
                item,
                quantities.get(id).copied().unwrap_or(1.0),
                manual_prices.get(id).copied(),
                icms_rates.get(id).copied().unwrap_or_default(),
                ipi_rates.get(id).copied().unwrap_or_default(),
            )
        })
        .collect();
    lines.sort_by(|a, b| a.item_id.cmp(&b.item_id));

    let total_quantity = lines
        .iter()
        .map(|l| if l.quantity.is_finite() { l.quantity } else { 0.0 })
        .sum();
    let subtotal: Money = lines.iter().map(|l| l.subtotal).sum();
    let total_icms: Money = lines.iter().map(|l| l.icms_amount).sum();
    let total_ipi: Money = lines.iter().map(|l| l.ipi_amount).sum();
    let total_tax = total_icms + total_ipi;
    let grand_total = subtotal + total_tax;
    let has_items_without_price = lines.iter().any(|l| !l.has_valid_price);

    let totals = OrderTotals {
        total_items: lines.len(),
        total_quantity,
        subtotal,
        total_icms,
        total_ipi,
        total_tax,
        grand_total,
        has_items_without_price,
        average_icms_rate: TaxRate::ratio_of(total_icms, subtotal),
        average_ipi_rate: TaxRate::ratio_of(total_ipi, subtotal),
        average_tax_rate: TaxRate::ratio_of(total_tax, subtotal),
        lines,
    };

    tracing::debug!(
        total_items = totals.total_items,
        subtotal = totals.subtotal.cents(),
        grand_total = totals.grand_total.cents(),
        has_items_without_price = totals.has_items_without_price,
        "order totals recomputed"
    );
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: &str, price_cents: i64) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            price_cents,
            latest_price_cents: None,
            unit: None,
        }
    }

    fn pct(p: f64) -> TaxRate {
        TaxRate::from_percentage(p)
    }

    #[test]
    fn test_resolve_price_priority_chain() {
        let mut item = test_item("1", 3000); // base R$ 30,00
        item.latest_price_cents = Some(2000); // latest R$ 20,00

        // Manual override wins
        assert_eq!(resolve_price(&item, Some(1000)).cents(), 1000);
        // Then the latest observed price
        assert_eq!(resolve_price(&item, None).cents(), 2000);
        // Then the base price
        item.latest_price_cents = None;
        assert_eq!(resolve_price(&item, None).cents(), 3000);
        // All absent/zero resolves to zero, not an error
        item.price_cents = 0;
        assert_eq!(resolve_price(&item, None).cents(), 0);
    }

    #[test]
    fn test_resolve_price_skips_non_positive_overrides() {
        let mut item = test_item("1", 3000);
        item.latest_price_cents = Some(0); // a zero latest price is "absent"

        assert_eq!(resolve_price(&item, Some(0)).cents(), 3000);
        assert_eq!(resolve_price(&item, Some(-500)).cents(), 3000);
    }

    #[test]
    fn test_resolve_price_clamps_negative_base() {
        let item = test_item("1", -100);
        assert_eq!(resolve_price(&item, None).cents(), 0);
    }

    #[test]
    fn test_calculate_line_end_to_end() {
        // qty 3 × R$ 100,00, ICMS 10%, IPI 5%
        let item = test_item("1", 10000);
        let line = calculate_line(&item, 3.0, None, pct(10.0), pct(5.0));

        assert_eq!(line.subtotal.cents(), 30000); // R$ 300,00
        assert_eq!(line.icms_amount.cents(), 3000); // R$ 30,00
        assert_eq!(line.ipi_amount.cents(), 1500); // R$ 15,00
        assert_eq!(line.tax_amount.cents(), 4500); // R$ 45,00
        assert_eq!(line.total.cents(), 34500); // R$ 345,00
        assert!(line.has_valid_price);
    }

    #[test]
    fn test_calculate_line_rounds_each_step() {
        // 1.5 × R$ 0,33 = 49,5 centavos → 50; ICMS 7% of 50 = 3,5 → 4
        let item = test_item("1", 33);
        let line = calculate_line(&item, 1.5, None, pct(7.0), TaxRate::zero());

        assert_eq!(line.subtotal.cents(), 50);
        assert_eq!(line.icms_amount.cents(), 4);
        assert_eq!(line.total.cents(), 54);
    }

    #[test]
    fn test_calculate_line_zero_price_still_computes() {
        let item = test_item("1", 0);
        let line = calculate_line(&item, 5.0, None, pct(18.0), pct(10.0));

        assert!(!line.has_valid_price);
        assert!(line.subtotal.is_zero());
        assert!(line.tax_amount.is_zero());
        assert!(line.total.is_zero());
    }

    #[test]
    fn test_calculate_line_tolerates_zero_and_negative_quantity() {
        let item = test_item("1", 1000);

        let line = calculate_line(&item, 0.0, None, pct(10.0), TaxRate::zero());
        assert!(line.subtotal.is_zero());

        // Negative quantities are the caller's problem; arithmetic still holds
        let line = calculate_line(&item, -2.0, None, TaxRate::zero(), TaxRate::zero());
        assert_eq!(line.subtotal.cents(), -2000);
    }

    #[test]
    fn test_aggregate_empty_selection_is_all_zero() {
        let totals = aggregate(
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );
        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.total_quantity, 0.0);
        assert!(totals.grand_total.is_zero());
        assert!(!totals.has_items_without_price);
        assert!(totals.average_tax_rate.is_zero());
    }

    #[test]
    fn test_aggregate_single_line_scenario() {
        let mut selections = HashMap::new();
        selections.insert("1".to_string(), test_item("1", 10000));
        let mut quantities = HashMap::new();
        quantities.insert("1".to_string(), 3.0);
        let mut icms = HashMap::new();
        icms.insert("1".to_string(), pct(10.0));
        let mut ipi = HashMap::new();
        ipi.insert("1".to_string(), pct(5.0));

        let totals = aggregate(&selections, &quantities, &HashMap::new(), &icms, &ipi);

        assert_eq!(totals.total_items, 1);
        assert_eq!(totals.total_quantity, 3.0);
        assert_eq!(totals.subtotal.cents(), 30000);
        assert_eq!(totals.total_icms.cents(), 3000);
        assert_eq!(totals.total_ipi.cents(), 1500);
        assert_eq!(totals.total_tax.cents(), 4500);
        assert_eq!(totals.grand_total.cents(), 34500);
        // Average tax rate: 45/300 = 15,00%
        assert_eq!(totals.average_tax_rate.bps(), 1500);
        assert_eq!(totals.average_icms_rate.bps(), 1000);
        assert_eq!(totals.average_ipi_rate.bps(), 500);
    }

    #[test]
    fn test_aggregate_defaults_quantity_to_one_and_rates_to_zero() {
        let mut selections = HashMap::new();
        selections.insert("1".to_string(), test_item("1", 2500));

        let totals = aggregate(
            &selections,
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        assert_eq!(totals.total_quantity, 1.0);
        assert_eq!(totals.subtotal.cents(), 2500);
        assert!(totals.total_tax.is_zero());
        assert_eq!(totals.grand_total.cents(), 2500);
    }

    #[test]
    fn test_aggregate_flags_missing_prices_without_omitting_lines() {
        let mut selections = HashMap::new();
        selections.insert("1".to_string(), test_item("1", 1000));
        selections.insert("2".to_string(), test_item("2", 0)); // no price

        let totals = aggregate(
            &selections,
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        assert!(totals.has_items_without_price);
        assert_eq!(totals.total_items, 2); // the zero line is counted, not dropped
        assert_eq!(totals.lines.len(), 2);
        assert_eq!(totals.subtotal.cents(), 1000);
    }

    #[test]
    fn test_aggregate_lines_sorted_by_item_id() {
        let mut selections = HashMap::new();
        for id in ["c", "a", "b"] {
            selections.insert(id.to_string(), test_item(id, 100));
        }

        let totals = aggregate(
            &selections,
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        let order: Vec<&str> = totals.lines.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_aggregate_sums_already_rounded_lines_exactly() {
        // Two lines whose ICMS amounts each round individually:
        // R$ 0,50 at 7% = 3,5 → 4 centavos, twice = 8 centavos.
        // (Summing before rounding would give 7 centavos.)
        let mut selections = HashMap::new();
        selections.insert("1".to_string(), test_item("1", 50));
        selections.insert("2".to_string(), test_item("2", 50));
        let mut icms = HashMap::new();
        icms.insert("1".to_string(), pct(7.0));
        icms.insert("2".to_string(), pct(7.0));

        let totals = aggregate(
            &selections,
            &HashMap::new(),
            &HashMap::new(),
            &icms,
            &HashMap::new(),
        );

        assert_eq!(totals.total_icms.cents(), 8);
    }

    #[test]
    fn test_aggregate_manual_price_override_applies() {
        let mut item = test_item("1", 3000);
        item.latest_price_cents = Some(2000);
        let mut selections = HashMap::new();
        selections.insert("1".to_string(), item);
        let mut manual = HashMap::new();
        manual.insert("1".to_string(), 1000i64);

        let totals = aggregate(
            &selections,
            &HashMap::new(),
            &manual,
            &HashMap::new(),
            &HashMap::new(),
        );

        assert_eq!(totals.subtotal.cents(), 1000);
    }
}
