//! # Validation Module
//!
//! Input validation for seller-entered schedules and catalog fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Checks Run                                   │
//! │                                                                         │
//! │  Tier editor (seller portal)                                            │
//! │  └── validate_tiers()  ← before a schedule is saved                     │
//! │                                                                         │
//! │  Cart / quote requests                                                  │
//! │  ├── validate_variant_id(), validate_product_name()                     │
//! │  └── validate_quantity(), validate_price()                              │
//! │                                                                         │
//! │  Price resolution                                                       │
//! │  └── NO checks: saved schedules are priced first-match, as-is           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::PriceTier;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Tier Schedules
// =============================================================================

/// Checks that a tier schedule is well formed.
///
/// ## Rules
/// - every `min_quantity` is at least 1
/// - `min_quantity <= max_quantity` for bounded tiers
/// - prices are non-negative
/// - tiers ascend by `min_quantity` and do not overlap
/// - only the last tier may be unbounded
///
/// An empty schedule is valid (everything sells at base price).
///
/// ```rust
/// use agrimart_core::validation::validate_tiers;
/// use agrimart_core::{Money, PriceTier};
///
/// let ok = [
///     PriceTier::bounded(1, 9, Money::from_minor(1000)),
///     PriceTier::unbounded(10, Money::from_minor(800)),
/// ];
/// assert!(validate_tiers(&ok).is_ok());
///
/// let overlapping = [
///     PriceTier::bounded(1, 100, Money::from_minor(1000)),
///     PriceTier::bounded(50, 200, Money::from_minor(900)),
/// ];
/// assert!(validate_tiers(&overlapping).is_err());
/// ```
pub fn validate_tiers(tiers: &[PriceTier]) -> CoreResult<()> {
    let last = tiers.len().saturating_sub(1);
    let mut previous: Option<&PriceTier> = None;

    for (index, tier) in tiers.iter().enumerate() {
        let invalid = |reason: String| CoreError::InvalidTier { index, reason };

        if tier.min_quantity < 1 {
            return Err(invalid("minimum quantity must be at least 1".to_string()));
        }

        if let Some(max) = tier.max_quantity {
            if max < tier.min_quantity {
                return Err(invalid(format!(
                    "maximum quantity {} is below minimum {}",
                    max, tier.min_quantity
                )));
            }
        } else if index != last {
            return Err(invalid("only the last tier may be unbounded".to_string()));
        }

        if tier.price_per_unit.is_negative() {
            return Err(invalid("price per unit cannot be negative".to_string()));
        }

        if let Some(prev) = previous {
            if tier.min_quantity <= prev.min_quantity {
                return Err(invalid(format!(
                    "tiers must ascend by minimum quantity ({} after {})",
                    tier.min_quantity, prev.min_quantity
                )));
            }
            // prev is bounded here: an unbounded tier is only allowed last.
            if let Some(prev_max) = prev.max_quantity {
                if tier.min_quantity <= prev_max {
                    return Err(invalid(format!(
                        "overlaps previous tier ending at {}",
                        prev_max
                    )));
                }
            }
        }

        previous = Some(tier);
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a variant identifier (UUID).
///
/// ```rust
/// use agrimart_core::validation::validate_variant_id;
///
/// assert!(validate_variant_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_variant_id("not-a-uuid").is_err());
/// ```
pub fn validate_variant_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "variant id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "variant id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "product name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a cart line quantity: `1..=MAX_ITEM_QUANTITY`.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free samples).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
