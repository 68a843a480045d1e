//! # Currency Input Module
//!
//! Translates raw text-box edits into an integer centavo amount.
//!
//! ## Why a Digit-Stream Parser?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │           "Type digits, see currency" UX, no cursor tracking            │
//! │                                                                         │
//! │  Keystroke   Raw text in box    Digits    New value    Rendered        │
//! │  ─────────   ────────────────   ──────    ─────────    ─────────       │
//! │  "4"         "4"                1         4            "R$ 0,04"       │
//! │  "2"         "R$ 0,042"         3         42           "R$ 0,42"       │
//! │  "0"         "R$ 0,420"         4         420          "R$ 4,20"       │
//! │  ⌫           "R$ 4,2"           2         42           "R$ 0,42"       │
//! │                                                                         │
//! │  The text box always re-renders from the parsed value, so the parser   │
//! │  only needs to compare DIGIT COUNTS between the previous rendering     │
//! │  and the edited text. Fewer digits = backspace, more = appended.       │
//! │  No cursor position, no locale-aware re-parsing of the full string.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Statelessness
//! The parser is a pure function of `(previous_cents, edited_text)`. The
//! form holds the previous centavo value; nothing else is remembered.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::MAX_INPUT_CENTS;

// =============================================================================
// Edit Outcome
// =============================================================================

/// The outcome of applying one text-box edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CentsEdit {
    /// The updated amount in centavos (always >= 0).
    pub cents: i64,

    /// True when the box was emptied entirely. The form treats this as
    /// "value absent" (placeholder shows), not as zero currency.
    pub cleared: bool,
}

// =============================================================================
// Parsing
// =============================================================================

/// Applies one raw text-box edit to the previous centavo value.
///
/// ## Rules
/// - Empty text clears the value (`cents = 0`, `cleared = true`).
/// - Fewer digits than the previous rendering: backspace, value `/ 10`.
/// - Same or more digits: the trailing new digits are appended in order
///   (`value × 10 + d`), so pasting a run of digits behaves exactly like
///   typing them quickly.
/// - Appending stops at [`MAX_INPUT_CENTS`]: a digit that would push past
///   the cap clamps the value to the cap, and every digit after it is
///   discarded.
///
/// ## Example
/// ```rust
/// use pedido_core::input::apply_edit;
///
/// let edit = apply_edit(42, "R$ 0,420");
/// assert_eq!(edit.cents, 420);
/// assert!(!edit.cleared);
///
/// let edit = apply_edit(420, "R$ 4,2"); // backspace
/// assert_eq!(edit.cents, 42);
///
/// let edit = apply_edit(420, "");
/// assert!(edit.cleared);
/// ```
pub fn apply_edit(previous_cents: i64, edited_text: &str) -> CentsEdit {
    // Negative previous values cannot come from this parser; treat as zero
    // rather than propagating a caller bug into the digit math
    let previous = previous_cents.max(0);

    if edited_text.is_empty() {
        tracing::trace!(previous, "currency input cleared");
        return CentsEdit {
            cents: 0,
            cleared: true,
        };
    }

    let new_digits = count_digits(edited_text);
    let old_digits = count_digits(&format_cents(previous));

    let cents = if new_digits < old_digits {
        // Backspace: drop the last digit
        previous / 10
    } else {
        // Append: fold the trailing new digits into the value
        let appended = new_digits - old_digits;
        let mut value = previous;
        for d in edited_text
            .chars()
            .filter_map(|c| c.to_digit(10))
            .skip(new_digits - appended)
        {
            let next = value * 10 + d as i64;
            if next > MAX_INPUT_CENTS {
                // Cap reached: clamp, and drop every remaining digit
                value = MAX_INPUT_CENTS;
                break;
            }
            value = next;
        }
        value
    };

    tracing::trace!(previous, cents, "currency input edited");
    CentsEdit {
        cents,
        cleared: false,
    }
}

/// Renders a centavo amount for the text box.
///
/// Zero renders as the empty string so the input placeholder shows;
/// anything else renders in the Brazilian convention via [`Money`]
/// (`R$ 1.234,56`).
pub fn format_cents(cents: i64) -> String {
    if cents == 0 {
        return String::new();
    }
    Money::from_cents(cents).to_string()
}

/// Counts the numeric digits in a rendered string, ignoring the currency
/// prefix and separators.
fn count_digits(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulates the form's feedback loop: render the current value, splice
    /// the typed digit onto the end, feed the result back through the parser.
    fn type_digit(cents: i64, digit: char) -> i64 {
        let text = format!("{}{}", format_cents(cents), digit);
        apply_edit(cents, &text).cents
    }

    #[test]
    fn test_typing_digits_one_at_a_time() {
        // "4", "2", "0" from zero: 4 → 42 → 420 centavos
        let mut cents = 0;
        for d in ['4', '2', '0'] {
            cents = type_digit(cents, d);
        }
        assert_eq!(cents, 420);
        assert_eq!(format_cents(cents), "R$ 4,20");
    }

    #[test]
    fn test_typing_reproduces_digit_string() {
        let mut cents = 0;
        for d in "123456".chars() {
            cents = type_digit(cents, d);
        }
        assert_eq!(cents, 123456);
        assert_eq!(format_cents(cents), "R$ 1.234,56");
    }

    #[test]
    fn test_backspace_drops_last_digit() {
        // "R$ 4,20" has digits "420"; removing the trailing "0" leaves two
        let edit = apply_edit(420, "R$ 4,2");
        assert_eq!(edit.cents, 42);
        assert!(!edit.cleared);
    }

    #[test]
    fn test_backspace_is_floor_div_ten() {
        for cents in [0, 1, 9, 10, 42, 420, 999, 123456] {
            let rendered = format_cents(cents);
            let digits: String = rendered.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                continue;
            }
            let shorter = &digits[..digits.len() - 1];
            // Any text with one fewer digit triggers the backspace path
            assert_eq!(apply_edit(cents, shorter).cents, cents / 10);
        }
    }

    #[test]
    fn test_empty_text_clears() {
        let edit = apply_edit(420, "");
        assert_eq!(edit.cents, 0);
        assert!(edit.cleared);

        // Clearing an already-empty input is still a clear, not an error
        let edit = apply_edit(0, "");
        assert!(edit.cleared);
    }

    #[test]
    fn test_paste_behaves_like_fast_typing() {
        // Pasting "150000" into an empty box = typing the six digits
        let edit = apply_edit(0, "150000");
        assert_eq!(edit.cents, 150_000);
        assert_eq!(format_cents(edit.cents), "R$ 1.500,00");

        // Pasting extra digits onto an existing value appends them in order
        let edit = apply_edit(42, "R$ 0,4275");
        assert_eq!(edit.cents, 4275);
    }

    #[test]
    fn test_same_digit_count_is_noop() {
        // Separator-only edits (same digits) leave the value unchanged
        let edit = apply_edit(420, "4,20");
        assert_eq!(edit.cents, 420);
    }

    #[test]
    fn test_overflowing_digit_clamps_to_cap() {
        // R$ 599.999.999,99 already has eleven digits; one more digit
        // overflows and the value snaps to the cap instead of growing
        let below_cap = 59_999_999_999;
        let rendered = format_cents(below_cap);
        let edit = apply_edit(below_cap, &format!("{}9", rendered));
        assert_eq!(edit.cents, MAX_INPUT_CENTS);
    }

    #[test]
    fn test_digits_after_the_cap_are_discarded() {
        let at_cap = MAX_INPUT_CENTS;
        let rendered = format_cents(at_cap);
        let edit = apply_edit(at_cap, &format!("{}9", rendered));
        assert_eq!(edit.cents, at_cap);

        // Once clamped, later digits in the same edit change nothing
        let edit = apply_edit(at_cap, &format!("{}90", rendered));
        assert_eq!(edit.cents, at_cap);

        let edit = apply_edit(59_999_999_999, &format!("{}1234", format_cents(59_999_999_999)));
        assert_eq!(edit.cents, MAX_INPUT_CENTS);
    }

    #[test]
    fn test_append_up_to_cap_still_registers() {
        let below = MAX_INPUT_CENTS / 10; // 9_999_999_999
        let rendered = format_cents(below);
        let edit = apply_edit(below, &format!("{}9", rendered));
        assert_eq!(edit.cents, MAX_INPUT_CENTS);
    }

    #[test]
    fn test_negative_previous_treated_as_zero() {
        let edit = apply_edit(-500, "7");
        assert_eq!(edit.cents, 7);
    }

    #[test]
    fn test_format_cents_zero_is_empty() {
        assert_eq!(format_cents(0), "");
        assert_eq!(format_cents(5), "R$ 0,05");
        assert_eq!(format_cents(1099), "R$ 10,99");
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let a = apply_edit(42, "R$ 0,421");
        let b = apply_edit(42, "R$ 0,421");
        assert_eq!(a, b);
    }
}
