//! # pedido-core: Pure Business Logic for the Pedido Order Client
//!
//! This crate is the calculation heart of the Pedido order-entry client.
//! It contains all pricing, tax, and currency-input logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pedido Client Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (React Native)                         │   │
//! │  │   Item list ──► Order form ──► Summary card ──► Submit          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ bridge (JSON payloads, TS bindings)    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pedido-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │   input   │  │   │
//! │  │   │   Item    │  │   Money   │  │ resolve / │  │ keystroke │  │   │
//! │  │   │  Totals   │  │  TaxMath  │  │ aggregate │  │  parser   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO ASYNC • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Backend REST API (out of scope)                │   │
//! │  │        re-prices and re-validates every submitted order         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, TaxRate, LineCalculation, OrderTotals)
//! - [`money`] - Money type with integer arithmetic (no floating point drift!)
//! - [`pricing`] - Price resolution, line calculation, order aggregation
//! - [`input`] - Digit-stream currency input parser
//! - [`order`] - OrderDraft, the mutable selection state for one form session
//! - [`error`] - Domain error types
//! - [`validation`] - Form-field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and async are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are centavos (i64); every step rounds immediately
//! 4. **Total Calculations**: The calculator never errors; missing/invalid input
//!    substitutes safe defaults and bad prices surface as a flag, not a failure
//!
//! ## Example Usage
//!
//! ```rust
//! use pedido_core::order::OrderDraft;
//! use pedido_core::types::{Item, TaxRate};
//!
//! let mut draft = OrderDraft::new();
//! draft.select(Item {
//!     id: "item-1".to_string(),
//!     name: "Cimento CP-II 50kg".to_string(),
//!     price_cents: 10_000, // R$ 100,00
//!     latest_price_cents: None,
//!     unit: Some("sc".to_string()),
//! }).unwrap();
//! draft.set_quantity("item-1", 3.0).unwrap();
//! draft.set_icms_rate("item-1", TaxRate::from_percentage(10.0)).unwrap();
//! draft.set_ipi_rate("item-1", TaxRate::from_percentage(5.0)).unwrap();
//!
//! let totals = draft.totals();
//! assert_eq!(totals.grand_total.cents(), 34_500); // R$ 345,00
//! assert_eq!(totals.average_tax_rate.percentage(), 15.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod input;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pedido_core::Money` instead of
// `use pedido_core::money::Money`

pub use error::{OrderError, ValidationError};
pub use input::{apply_edit, format_cents, CentsEdit};
pub use money::Money;
pub use order::OrderDraft;
pub use pricing::{aggregate, calculate_line, resolve_price};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum value the currency input will accumulate, in centavos.
///
/// ## Business Reason
/// Eleven digits (R$ 999.999.999,99) is far beyond any plausible order line;
/// digits typed past this cap simply stop registering, which is how the
/// native inputs behave for overlong values.
pub const MAX_INPUT_CENTS: i64 = 99_999_999_999;

/// Maximum distinct items on a single order.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps per-keystroke recomputation O(items)
/// with a small constant. Can be made configurable per-tenant later.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity for a single order line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: f64 = 9_999.0;

/// Maximum tax rate in basis points (100%).
pub const MAX_RATE_BPS: u32 = 10_000;
