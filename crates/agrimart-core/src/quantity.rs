//! # Quantity Module
//!
//! Validates order quantities typed into a quantity field, separating hard
//! range errors (auto-corrected) from soft minimum-order advisories (left as
//! entered).
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input n                    value      feedback                         │
//! │  ─────────────────────────  ─────────  ───────────────────────────────  │
//! │  not a number, or n < min   min        Error    "Minimum quantity is …" │
//! │  n > max                    max        Error    "Maximum quantity is …" │
//! │  moq set and n < moq        n          Advisory "Minimum order …"       │
//! │  otherwise                  n          none                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A below-MOQ quantity is accepted here so the checkout step can decide
//! whether to block; see [`crate::Cart::moq_violations`].

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::QuantityUnit;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Feedback
// =============================================================================

/// Message attached to the current quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuantityFeedback {
    /// Hard error: value was clamped up to `min`.
    BelowMinimum { min: i64 },
    /// Hard error: value was clamped down to `max`.
    AboveMaximum { max: i64 },
    /// Soft advisory: value kept, but below the minimum order quantity.
    BelowMoq { moq: i64, unit: QuantityUnit },
}

impl QuantityFeedback {
    /// Whether this is a hard validation error rather than an advisory.
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            QuantityFeedback::BelowMinimum { .. } | QuantityFeedback::AboveMaximum { .. }
        )
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuantityFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityFeedback::BelowMinimum { min } => write!(f, "Minimum quantity is {}", min),
            QuantityFeedback::AboveMaximum { max } => write!(f, "Maximum quantity is {}", max),
            QuantityFeedback::BelowMoq { moq, unit } => {
                write!(f, "Minimum order quantity is {} {}", moq, unit)
            }
        }
    }
}

// =============================================================================
// Pure Check
// =============================================================================

/// Validates `n` against `[min, max]` and an optional MOQ.
///
/// `None` stands for input that is not a number. Returns the value to keep
/// and the feedback to show.
///
/// ```rust
/// use agrimart_core::quantity::check_quantity;
/// use agrimart_core::QuantityUnit;
///
/// let (value, feedback) = check_quantity(Some(-5), 1, 999_999, None, QuantityUnit::Kg);
/// assert_eq!(value, 1);
/// assert_eq!(feedback.unwrap().to_string(), "Minimum quantity is 1");
/// ```
pub fn check_quantity(
    n: Option<i64>,
    min: i64,
    max: i64,
    moq: Option<i64>,
    unit: QuantityUnit,
) -> (i64, Option<QuantityFeedback>) {
    match n {
        None => (min, Some(QuantityFeedback::BelowMinimum { min })),
        Some(n) if n < min => (min, Some(QuantityFeedback::BelowMinimum { min })),
        Some(n) if n > max => (max, Some(QuantityFeedback::AboveMaximum { max })),
        Some(n) => match moq {
            Some(moq) if n < moq => (n, Some(QuantityFeedback::BelowMoq { moq, unit })),
            _ => (n, None),
        },
    }
}

/// Parses raw field text the way the quantity field does.
///
/// Leading integer digits are taken (`"12.7"` → 12). Anything unparsable,
/// including an empty field, becomes `None`.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

// =============================================================================
// Quantity Input State
// =============================================================================

/// State behind one quantity field: constraints, current value, feedback.
///
/// ## Update Flow
/// ```text
/// keystroke ──► handle_input("12") ──► parse ──► validate_and_update(Some(12))
/// [+] / [-] ──► increment() / decrement() ─────► validate_and_update(value ± step)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityInput {
    min: i64,
    max: i64,
    moq: Option<i64>,
    step: i64,
    unit: QuantityUnit,
    value: i64,
    feedback: Option<QuantityFeedback>,
}

impl Default for QuantityInput {
    fn default() -> Self {
        QuantityInput::new(QuantityUnit::default())
    }
}

impl QuantityInput {
    /// Creates a field with `min = 1`, `max = MAX_ITEM_QUANTITY`, `step = 1`,
    /// no MOQ, holding `min`.
    pub fn new(unit: QuantityUnit) -> Self {
        QuantityInput {
            min: 1,
            max: MAX_ITEM_QUANTITY,
            moq: None,
            step: 1,
            unit,
            value: 1,
            feedback: None,
        }
    }

    /// Sets the lower bound and moves the held value up to it if needed.
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = min;
        self.value = self.value.max(min);
        self
    }

    pub fn with_max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    pub fn with_moq(mut self, moq: i64) -> Self {
        self.moq = Some(moq);
        self
    }

    /// Non-positive steps are treated as 1.
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn feedback(&self) -> Option<QuantityFeedback> {
        self.feedback
    }

    /// The hard error, if any.
    pub fn error(&self) -> Option<QuantityFeedback> {
        self.feedback.filter(QuantityFeedback::is_error)
    }

    /// The MOQ advisory, if any.
    pub fn advisory(&self) -> Option<QuantityFeedback> {
        self.feedback.filter(|f| !f.is_error())
    }

    /// Validates `n` and stores the resulting value and feedback.
    ///
    /// `None` means the input was not a number.
    pub fn validate_and_update(&mut self, n: Option<i64>) -> i64 {
        let (value, feedback) = check_quantity(n, self.min, self.max, self.moq, self.unit);
        self.value = value;
        self.feedback = feedback;
        value
    }

    /// Handles raw field text. Unparsable text is replaced by `min` before
    /// validation, so it does not raise an error.
    pub fn handle_input(&mut self, raw: &str) -> i64 {
        let n = parse_quantity(raw).unwrap_or(self.min);
        self.validate_and_update(Some(n))
    }

    pub fn increment(&mut self) -> i64 {
        let next = self.value.saturating_add(self.step);
        self.validate_and_update(Some(next))
    }

    pub fn decrement(&mut self) -> i64 {
        let next = self.value.saturating_sub(self.step);
        self.validate_and_update(Some(next))
    }

    pub fn can_increment(&self) -> bool {
        self.value.saturating_add(self.step) <= self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value.saturating_sub(self.step) >= self.min
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_clamps_to_min_with_error() {
        let mut input = QuantityInput::new(QuantityUnit::Kg);
        assert_eq!(input.validate_and_update(Some(-5)), 1);
        let err = input.error().unwrap();
        assert_eq!(err.message(), "Minimum quantity is 1");
        assert!(input.advisory().is_none());
    }

    #[test]
    fn test_not_a_number_clamps_to_min_with_error() {
        let mut input = QuantityInput::new(QuantityUnit::Kg).with_min(5);
        assert_eq!(input.validate_and_update(None), 5);
        assert_eq!(input.error(), Some(QuantityFeedback::BelowMinimum { min: 5 }));
    }

    #[test]
    fn test_above_max_clamps_with_error() {
        let mut input = QuantityInput::new(QuantityUnit::Kg).with_max(500);
        assert_eq!(input.validate_and_update(Some(501)), 500);
        assert_eq!(input.error().unwrap().to_string(), "Maximum quantity is 500");
    }

    #[test]
    fn test_below_moq_keeps_value_with_advisory() {
        let mut input = QuantityInput::new(QuantityUnit::Kg).with_moq(10);
        assert_eq!(input.validate_and_update(Some(3)), 3);
        assert!(input.error().is_none());
        assert_eq!(
            input.advisory().unwrap().to_string(),
            "Minimum order quantity is 10 kg"
        );
    }

    #[test]
    fn test_min_check_runs_before_moq() {
        let mut input = QuantityInput::new(QuantityUnit::Bag).with_min(2).with_moq(10);
        assert_eq!(input.validate_and_update(Some(1)), 2);
        assert_eq!(input.feedback(), Some(QuantityFeedback::BelowMinimum { min: 2 }));
    }

    #[test]
    fn test_valid_value_clears_feedback() {
        let mut input = QuantityInput::new(QuantityUnit::Kg).with_moq(10);
        input.validate_and_update(Some(3));
        assert!(input.feedback().is_some());

        assert_eq!(input.validate_and_update(Some(10)), 10);
        assert!(input.feedback().is_none());
    }

    #[test]
    fn test_handle_input_coerces_garbage_silently() {
        let mut input = QuantityInput::new(QuantityUnit::Kg);
        input.validate_and_update(Some(40));

        assert_eq!(input.handle_input("abc"), 1);
        assert!(input.feedback().is_none());

        assert_eq!(input.handle_input(""), 1);
        assert!(input.feedback().is_none());
    }

    #[test]
    fn test_handle_input_parses_numbers() {
        let mut input = QuantityInput::new(QuantityUnit::Kg);
        assert_eq!(input.handle_input(" 25 "), 25);
        assert_eq!(input.handle_input("12.7"), 12);
        assert_eq!(input.handle_input("-3"), 1);
        assert!(input.error().is_some());
    }

    #[test]
    fn test_step_buttons() {
        let mut input = QuantityInput::new(QuantityUnit::Crate).with_step(5).with_max(12);
        assert_eq!(input.increment(), 6);
        assert_eq!(input.increment(), 11);
        assert!(!input.can_increment());
        assert_eq!(input.increment(), 12);
        assert!(input.error().is_some());

        assert_eq!(input.decrement(), 7);
        assert!(input.feedback().is_none());
        assert!(input.can_decrement());
    }

    #[test]
    fn test_decrement_at_min_clamps() {
        let mut input = QuantityInput::new(QuantityUnit::Kg);
        assert!(!input.can_decrement());
        assert_eq!(input.decrement(), 1);
        assert!(input.error().is_some());
    }

    #[test]
    fn test_zero_step_treated_as_one() {
        let mut input = QuantityInput::new(QuantityUnit::Kg).with_step(0);
        assert_eq!(input.increment(), 2);
    }

    #[test]
    fn test_feedback_serializes_tagged() {
        let json = serde_json::to_value(QuantityFeedback::BelowMoq {
            moq: 10,
            unit: QuantityUnit::Kg,
        })
        .unwrap();
        assert_eq!(json["kind"], "belowMoq");
        assert_eq!(json["moq"], 10);
        assert_eq!(json["unit"], "kg");
    }
}
