//! # agrimart-core: Pure Pricing Logic for AgriMart
//!
//! This crate holds the pricing rules shared by the AgriMart marketplace,
//! seller portal and logistics dashboards, as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AgriMart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboards (web)                             │   │
//! │  │   Cart card ──► Tier editor ──► Quantity input ──► Cost calc   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated TS types / quote CLI         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ agrimart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐         │   │
//! │  │   │ pricing  │ │ quantity │ │   cart   │ │logistics │         │   │
//! │  │   │  tiers   │ │   MOQ    │ │  totals  │ │ freight  │         │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PriceTier, ProductVariant, QuantityUnit, Rate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Tiered unit-price resolution and tier-table helpers
//! - [`quantity`] - Quantity input validation with MOQ advisories
//! - [`cart`] - Marketplace cart priced through the tier resolver
//! - [`logistics`] - Delivery cost estimation
//! - [`validation`] - Tier-list and field validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use agrimart_core::{resolve_unit_price, Money, PriceTier};
//!
//! let tiers = vec![
//!     PriceTier::bounded(1, 9, Money::from_minor(1000)),
//!     PriceTier::unbounded(10, Money::from_minor(800)),
//! ];
//!
//! let price = resolve_unit_price(25, &tiers, Money::from_minor(1200));
//! assert_eq!(price.minor(), 800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod logistics;
pub mod money;
pub mod pricing;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals, MoqViolation};
pub use error::{CoreError, CoreResult, ValidationError};
pub use logistics::{
    estimate_delivery_cost, CostBreakdown, RateCard, ShipmentRequest, Urgency, VehicleType,
};
pub use money::Money;
pub use pricing::{
    matching_tier, next_tier_hint, resolve_unit_price, tier_rows, PricedItem, TierHint, TierRow,
};
pub use quantity::{QuantityFeedback, QuantityInput};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Ceiling for a single line's quantity.
///
/// Also the default `max` of [`QuantityInput`]. Bulk grain orders are
/// counted in kilograms, so this is far larger than a retail ceiling.
pub const MAX_ITEM_QUANTITY: i64 = 999_999;
