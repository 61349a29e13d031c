//! # Domain Types
//!
//! Core domain types shared by the pricing, cart and freight modules.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌─────────────────┐                   │
//! │  │   ProductVariant     │        │    PriceTier    │                   │
//! │  │  ──────────────────  │  0..n  │  ─────────────  │                   │
//! │  │  id (UUID)           │───────►│  min_quantity   │                   │
//! │  │  label               │        │  max_quantity?  │                   │
//! │  │  unit                │        │  price_per_unit │                   │
//! │  │  base_price          │        └─────────────────┘                   │
//! │  │  moq?                │                                               │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  QuantityUnit   │   │      Rate       │                             │
//! │  │  kg, ton, bag.. │   │  bps (u32)      │                             │
//! │  └─────────────────┘   │  15000 = 1.5x   │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are transient view values rebuilt from catalog data whenever
//! a price is needed. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A ratio in basis points (1 bps = 0.01%).
///
/// Used both for percentages (50 bps = 0.5% insurance) and multipliers
/// (15000 bps = 1.5x express surcharge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// The identity multiplier (1.0x).
    pub const ONE: Rate = Rate(10_000);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Combines two multipliers: `1.5x ∘ 2.0x = 3.0x`.
    pub fn compose(&self, other: Rate) -> Rate {
        let bps = (self.0 as u64 * other.0 as u64 + 5000) / 10_000;
        Rate(bps.min(u32::MAX as u64) as u32)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::ONE
    }
}

// =============================================================================
// Quantity Unit
// =============================================================================

/// Unit a variant is sold in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    #[default]
    Kg,
    Ton,
    Quintal,
    Crate,
    Bag,
    Piece,
    Litre,
}

impl QuantityUnit {
    /// Short label used in tier tables and MOQ advisories.
    pub const fn label(&self) -> &'static str {
        match self {
            QuantityUnit::Kg => "kg",
            QuantityUnit::Ton => "ton",
            QuantityUnit::Quintal => "quintal",
            QuantityUnit::Crate => "crate",
            QuantityUnit::Bag => "bag",
            QuantityUnit::Piece => "piece",
            QuantityUnit::Litre => "litre",
        }
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// One quantity bracket of a tiered price schedule.
///
/// Both bounds are inclusive; `max_quantity: None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub min_quantity: i64,
    pub max_quantity: Option<i64>,
    pub price_per_unit: Money,
}

impl PriceTier {
    pub const fn bounded(min_quantity: i64, max_quantity: i64, price_per_unit: Money) -> Self {
        PriceTier {
            min_quantity,
            max_quantity: Some(max_quantity),
            price_per_unit,
        }
    }

    pub const fn unbounded(min_quantity: i64, price_per_unit: Money) -> Self {
        PriceTier {
            min_quantity,
            max_quantity: None,
            price_per_unit,
        }
    }

    /// Checks whether `quantity` falls inside this bracket.
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    #[inline]
    pub const fn is_unbounded(&self) -> bool {
        self.max_quantity.is_none()
    }
}

// =============================================================================
// Product Variant
// =============================================================================

/// A sellable variant of a catalog product (e.g. "Basmati 1121, 25 kg bag").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display label shown on the cart card.
    pub label: String,

    #[serde(default)]
    pub unit: QuantityUnit,

    /// List price used when no tier applies.
    pub base_price: Money,

    /// Quantity brackets, in the order the seller entered them.
    #[serde(default)]
    pub tiers: Vec<PriceTier>,

    /// Minimum order quantity; enforced as an advisory, not a clamp.
    #[serde(default)]
    pub moq: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================
