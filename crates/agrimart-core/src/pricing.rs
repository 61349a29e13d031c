//! # Pricing Module
//!
//! Tiered quantity pricing: maps a requested quantity to a unit price using a
//! seller's bracket schedule, falling back to the list price.
//!
//! ## Resolution Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tiers (in the order given)          quantity = 75                      │
//! │                                                                         │
//! │  [0]  1 - 100   @ 12.00   ◄── first tier containing 75: WINS            │
//! │  [1] 50 - 200   @ 10.00       (also contains 75, never consulted)       │
//! │  [2] 201+       @  9.00                                                 │
//! │                                                                         │
//! │  no tier contains quantity ──► base price                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! First match in list order is the contract, including for overlapping or
//! unsorted schedules that sellers may have saved. A cheaper later tier is
//! never searched for. Schedules can be checked separately with
//! [`crate::validation::validate_tiers`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PriceTier, ProductVariant, QuantityUnit, Rate};

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the unit price for `quantity`.
///
/// Returns the `price_per_unit` of the first tier (in list order) whose
/// inclusive `[min_quantity, max_quantity]` range contains `quantity`, or
/// `base_price` when none does. Never fails.
///
/// ```rust
/// use agrimart_core::{resolve_unit_price, Money, PriceTier};
///
/// let tiers = [PriceTier::bounded(10, 49, Money::from_minor(900))];
/// let base = Money::from_minor(1000);
///
/// assert_eq!(resolve_unit_price(10, &tiers, base).minor(), 900);
/// assert_eq!(resolve_unit_price(49, &tiers, base).minor(), 900);
/// assert_eq!(resolve_unit_price(50, &tiers, base).minor(), 1000);
/// ```
pub fn resolve_unit_price(quantity: i64, tiers: &[PriceTier], base_price: Money) -> Money {
    matching_tier(quantity, tiers)
        .map(|(_, tier)| tier.price_per_unit)
        .unwrap_or(base_price)
}

/// Returns the first tier containing `quantity`, with its index.
///
/// Same scan as [`resolve_unit_price`]; the cart card uses the index to
/// highlight the active row of the tier table.
pub fn matching_tier(quantity: i64, tiers: &[PriceTier]) -> Option<(usize, &PriceTier)> {
    tiers.iter().enumerate().find(|(_, tier)| tier.contains(quantity))
}

// =============================================================================
// Priced Item
// =============================================================================

/// A quantity priced against a tier schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub quantity: i64,
    pub base_price: Money,
    #[serde(default)]
    pub tiers: Vec<PriceTier>,
}

impl PricedItem {
    pub fn new(quantity: i64, base_price: Money, tiers: Vec<PriceTier>) -> Self {
        PricedItem {
            quantity,
            base_price,
            tiers,
        }
    }

    /// Builds a priced item from a catalog variant.
    pub fn from_variant(variant: &ProductVariant, quantity: i64) -> Self {
        PricedItem::new(quantity, variant.base_price, variant.tiers.clone())
    }

    pub fn unit_price(&self) -> Money {
        resolve_unit_price(self.quantity, &self.tiers, self.base_price)
    }

    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Amount saved against list price. A tier priced above the base price
    /// yields zero, not a negative saving.
    pub fn savings(&self) -> Money {
        self.base_price
            .saturating_sub_floor(self.unit_price())
            .multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Next-Tier Hint
// =============================================================================

/// Upsell hint: how much more to order to reach a cheaper tier.
///
/// Carries no text; callers render it with their own currency formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierHint {
    pub tier_index: usize,
    pub additional_quantity: i64,
    pub price_per_unit: Money,
}

/// Finds the first tier (list order) that starts above `quantity` and is
/// cheaper than `current_price`.
pub fn next_tier_hint(
    quantity: i64,
    tiers: &[PriceTier],
    current_price: Money,
) -> Option<TierHint> {
    tiers
        .iter()
        .enumerate()
        .find(|(_, tier)| tier.min_quantity > quantity && tier.price_per_unit < current_price)
        .map(|(tier_index, tier)| TierHint {
            tier_index,
            additional_quantity: tier.min_quantity - quantity,
            price_per_unit: tier.price_per_unit,
        })
}

// =============================================================================
// Tier Table
// =============================================================================

/// One display row of a tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    /// `"10-49 kg"` or `"50+ kg"`.
    pub label: String,
    pub price_per_unit: Money,
    /// Discount relative to the first row's price.
    pub savings: Rate,
}

/// Renders a schedule as table rows, in the order given.
///
/// ```rust
/// use agrimart_core::{tier_rows, Money, PriceTier, QuantityUnit};
///
/// let rows = tier_rows(
///     &[
///         PriceTier::bounded(1, 49, Money::from_minor(1000)),
///         PriceTier::unbounded(50, Money::from_minor(900)),
///     ],
///     QuantityUnit::Kg,
/// );
/// assert_eq!(rows[1].label, "50+ kg");
/// assert_eq!(rows[1].savings.bps(), 1000);
/// ```
pub fn tier_rows(tiers: &[PriceTier], unit: QuantityUnit) -> Vec<TierRow> {
    let reference = tiers.first().map(|t| t.price_per_unit);

    tiers
        .iter()
        .map(|tier| {
            let label = match tier.max_quantity {
                Some(max) => format!("{}-{} {}", tier.min_quantity, max, unit),
                None => format!("{}+ {}", tier.min_quantity, unit),
            };
            TierRow {
                label,
                price_per_unit: tier.price_per_unit,
                savings: reference
                    .map_or(Rate::from_bps(0), |r| discount_between(r, tier.price_per_unit)),
            }
        })
        .collect()
}

fn discount_between(reference: Money, price: Money) -> Rate {
    if reference.minor() <= 0 || price >= reference {
        return Rate::from_bps(0);
    }
    let bps = (reference - price).minor() as i128 * 10_000 / reference.minor() as i128;
    Rate::from_bps(bps as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
