//! # Order Draft
//!
//! Mutable selection state for one order-form session.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Draft Operations                               │
//! │                                                                         │
//! │  Form Action               Draft Call              State Change         │
//! │  ───────────               ──────────              ────────────         │
//! │                                                                         │
//! │  Tap item row ───────────► select(item) ─────────► selections[id]      │
//! │                                                                         │
//! │  Edit quantity ──────────► set_quantity(id, q) ──► quantities[id]      │
//! │                                                                         │
//! │  Edit price field ───────► set_manual_price() ───► manual_prices[id]   │
//! │                                                                         │
//! │  Edit ICMS/IPI field ────► set_*_rate(id, r) ────► *_rates[id]         │
//! │                                                                         │
//! │  Untap item row ─────────► deselect(id) ─────────► all overrides gone  │
//! │                                                                         │
//! │  Any change ─────────────► totals() ─────────────► (pure recompute)    │
//! │                                                                         │
//! │  NOTE: totals() derives everything from scratch on every call; the     │
//! │        draft caches no calculation state whatsoever.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every override key refers to a currently-selected item
//! - Deselecting an item removes its quantity/price/rate overrides
//! - Maximum distinct lines: [`crate::MAX_ORDER_ITEMS`]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{OrderError, OrderResult};
use crate::pricing;
use crate::types::{Item, OrderTotals, TaxRate};
use crate::validation::{validate_price_cents, validate_quantity, validate_rate_bps};
use crate::MAX_ORDER_ITEMS;

/// The in-progress item selection for one order form.
///
/// Owned and serialized by the bridge layer; all mutation happens through
/// the validated methods below. The calculator never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Selected items by id.
    selections: HashMap<String, Item>,

    /// Per-item quantity overrides (absent = 1).
    quantities: HashMap<String, f64>,

    /// Per-item manual price overrides in centavos.
    manual_prices: HashMap<String, i64>,

    /// Per-item ICMS rate overrides (absent = 0%).
    icms_rates: HashMap<String, TaxRate>,

    /// Per-item IPI rate overrides (absent = 0%).
    ipi_rates: HashMap<String, TaxRate>,
}

impl OrderDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selects an item for the order.
    ///
    /// Re-selecting an already-selected item refreshes its snapshot (name,
    /// prices) and keeps the overrides the user already entered.
    pub fn select(&mut self, item: Item) -> OrderResult<()> {
        if !self.selections.contains_key(&item.id) && self.selections.len() >= MAX_ORDER_ITEMS {
            return Err(OrderError::TooManyItems {
                max: MAX_ORDER_ITEMS,
            });
        }
        self.selections.insert(item.id.clone(), item);
        Ok(())
    }

    /// Deselects an item, clearing all of its overrides.
    pub fn deselect(&mut self, item_id: &str) -> OrderResult<()> {
        if self.selections.remove(item_id).is_none() {
            return Err(OrderError::ItemNotSelected(item_id.to_string()));
        }
        self.quantities.remove(item_id);
        self.manual_prices.remove(item_id);
        self.icms_rates.remove(item_id);
        self.ipi_rates.remove(item_id);
        Ok(())
    }

    /// Toggles an item's selection (the list rows behave as checkboxes).
    ///
    /// Returns `true` when the item ends up selected.
    pub fn toggle(&mut self, item: Item) -> OrderResult<bool> {
        if self.selections.contains_key(&item.id) {
            self.deselect(&item.id)?;
            Ok(false)
        } else {
            self.select(item)?;
            Ok(true)
        }
    }

    /// Checks whether an item is currently selected.
    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selections.contains_key(item_id)
    }

    /// Returns the number of distinct selected items.
    pub fn selected_count(&self) -> usize {
        self.selections.len()
    }

    /// Checks whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Clears the whole draft (new-order action).
    pub fn clear(&mut self) {
        self.selections.clear();
        self.quantities.clear();
        self.manual_prices.clear();
        self.icms_rates.clear();
        self.ipi_rates.clear();
    }

    // -------------------------------------------------------------------------
    // Overrides
    // -------------------------------------------------------------------------

    /// Sets the quantity for a selected item.
    pub fn set_quantity(&mut self, item_id: &str, quantity: f64) -> OrderResult<()> {
        self.ensure_selected(item_id)?;
        validate_quantity(quantity)?;
        self.quantities.insert(item_id.to_string(), quantity);
        Ok(())
    }

    /// Sets a manual price override in centavos for a selected item.
    ///
    /// A zero price is stored but does not win the resolution chain, so the
    /// line falls back to the latest/base price (see `pricing::resolve_price`).
    pub fn set_manual_price(&mut self, item_id: &str, cents: i64) -> OrderResult<()> {
        self.ensure_selected(item_id)?;
        validate_price_cents(cents)?;
        self.manual_prices.insert(item_id.to_string(), cents);
        Ok(())
    }

    /// Removes a manual price override (the currency input was cleared).
    pub fn clear_manual_price(&mut self, item_id: &str) -> OrderResult<()> {
        self.ensure_selected(item_id)?;
        self.manual_prices.remove(item_id);
        Ok(())
    }

    /// Sets the ICMS rate for a selected item.
    pub fn set_icms_rate(&mut self, item_id: &str, rate: TaxRate) -> OrderResult<()> {
        self.ensure_selected(item_id)?;
        validate_rate_bps(rate.bps())?;
        self.icms_rates.insert(item_id.to_string(), rate);
        Ok(())
    }

    /// Sets the IPI rate for a selected item.
    pub fn set_ipi_rate(&mut self, item_id: &str, rate: TaxRate) -> OrderResult<()> {
        self.ensure_selected(item_id)?;
        validate_rate_bps(rate.bps())?;
        self.ipi_rates.insert(item_id.to_string(), rate);
        Ok(())
    }

    fn ensure_selected(&self, item_id: &str) -> OrderResult<()> {
        if self.selections.contains_key(item_id) {
            Ok(())
        } else {
            Err(OrderError::ItemNotSelected(item_id.to_string()))
        }
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Recomputes the full order totals from the current selection.
    ///
    /// Pure and O(selected items); called on every relevant input change.
    pub fn totals(&self) -> OrderTotals {
        pricing::aggregate(
            &self.selections,
            &self.quantities,
            &self.manual_prices,
            &self.icms_rates,
            &self.ipi_rates,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
