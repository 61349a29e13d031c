//! # Error Types
//!
//! Domain-specific error types for agrimart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  agrimart-core errors (this file)                                       │
//! │  ├── CoreError        - Cart, tier and freight rule violations          │
//! │  └── ValidationError  - Field-level input failures                      │
//! │                                                                         │
//! │  quote CLI (apps/quote-cli)                                             │
//! │  ├── ConfigError      - Bad agrimart.toml / AGRIMART_* values           │
//! │  └── anyhow::Error    - Binary boundary, with context                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow → stderr                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither the tier resolver nor the quantity validator return errors: a
//! missing tier match falls back to the base price, and quantity problems are
//! reported as [`crate::QuantityFeedback`] values.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Variant is not present in the cart.
    #[error("Variant not in cart: {0}")]
    VariantNotInCart(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A tier in a seller's schedule is malformed.
    ///
    /// ## When This Occurs
    /// Only from [`crate::validation::validate_tiers`], which the tier editor
    /// runs before saving. The resolver itself never rejects a schedule.
    /// ```text
    /// Tier 0: 1-10    @ 12.00
    /// Tier 1: 5-20    @ 10.00   ← overlaps tier 0
    ///      │
    ///      ▼
    /// InvalidTier { index: 1, reason: "overlaps previous tier ..." }
    /// ```
    #[error("Tier {index} is invalid: {reason}")]
    InvalidTier { index: usize, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
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

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
