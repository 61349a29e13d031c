//! # Cart Module
//!
//! The marketplace cart. Each line keeps a snapshot of the variant it was
//! added from and is re-priced through the tier resolver whenever its
//! quantity changes.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Buyer Action             Cart Method              Effect               │
//! │  ────────────             ───────────              ──────               │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ────────────► push / merge qty     │
//! │  Change quantity ───────► update_quantity() ─────► re-resolve tier      │
//! │  Remove ────────────────► remove_item() ─────────► line dropped         │
//! │  Checkout button ───────► checkout_ready() ──────► blocked below MOQ    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Below-MOQ lines are allowed into the cart; they are reported by
//! [`Cart::moq_violations`] and block [`Cart::checkout_ready`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{matching_tier, next_tier_hint, PricedItem, TierHint};
use crate::quantity::QuantityFeedback;
use crate::types::ProductVariant;
use crate::validation::{
    validate_price, validate_product_name, validate_quantity, validate_variant_id,
};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// `variant` is a frozen copy of the catalog variant at the time it was
/// added, so a seller editing tiers does not reprice an open cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_name: String,
    pub variant: ProductVariant,
    pub quantity: i64,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(variant: &ProductVariant, product_name: &str, quantity: i64) -> Self {
        CartItem {
            product_name: product_name.trim().to_string(),
            variant: variant.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    pub fn variant_id(&self) -> &str {
        &self.variant.id
    }

    pub fn priced(&self) -> PricedItem {
        PricedItem::from_variant(&self.variant, self.quantity)
    }

    pub fn unit_price(&self) -> Money {
        self.priced().unit_price()
    }

    pub fn line_total(&self) -> Money {
        self.priced().line_total()
    }

    pub fn savings(&self) -> Money {
        self.priced().savings()
    }

    /// Index of the tier currently applied, if any.
    pub fn active_tier(&self) -> Option<usize> {
        matching_tier(self.quantity, &self.variant.tiers).map(|(index, _)| index)
    }

    pub fn next_tier(&self) -> Option<TierHint> {
        next_tier_hint(self.quantity, &self.variant.tiers, self.unit_price())
    }

    /// MOQ advisory for this line, if its quantity is below the MOQ.
    pub fn moq_advisory(&self) -> Option<QuantityFeedback> {
        match self.variant.moq {
            Some(moq) if self.quantity < moq => Some(QuantityFeedback::BelowMoq {
                moq,
                unit: self.variant.unit,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The buyer's cart.
///
/// ## Invariants
/// - lines are unique by variant id (adding the same variant merges)
/// - every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - at most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a variant or increases the quantity of an existing line.
    ///
    /// ## Errors
    /// - invalid variant id, product name, base price or quantity
    /// - a tier with a negative price (`CoreError::InvalidTier`)
    /// - merged quantity above `MAX_ITEM_QUANTITY`
    /// - a new line beyond `MAX_CART_ITEMS`
    ///
    /// Overlapping or unsorted schedules are accepted and priced first-match.
    pub fn add_item(
        &mut self,
        variant: &ProductVariant,
        product_name: &str,
        quantity: i64,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.variant.id == variant.id) {
            let new_qty = item.quantity.saturating_add(quantity);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS });
        }

        validate_variant_id(&variant.id)?;
        validate_product_name(product_name)?;
        validate_price(variant.base_price)?;
        if let Some(index) = variant.tiers.iter().position(|t| t.price_per_unit.is_negative()) {
            return Err(CoreError::InvalidTier {
                index,
                reason: "price per unit cannot be negative".to_string(),
            });
        }

        self.items.push(CartItem::new(variant, product_name, quantity));
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, variant_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(variant_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.variant.id == variant_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::VariantNotInCart(variant_id.to_string())),
        }
    }

    pub fn remove_item(&mut self, variant_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.variant.id != variant_id);

        if self.items.len() == initial_len {
            Err(CoreError::VariantNotInCart(variant_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of tier-resolved line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of savings against list price.
    pub fn savings(&self) -> Money {
        self.items.iter().map(CartItem::savings).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines below their variant's minimum order quantity.
    pub fn moq_violations(&self) -> Vec<MoqViolation> {
        self.items
            .iter()
            .filter_map(|item| {
                item.moq_advisory().map(|advisory| MoqViolation {
                    variant_id: item.variant.id.clone(),
                    quantity: item.quantity,
                    message: advisory.message(),
                    advisory,
                })
            })
            .collect()
    }

    /// Non-empty and every line meets its MOQ.
    pub fn checkout_ready(&self) -> bool {
        !self.is_empty() && self.items.iter().all(|i| i.moq_advisory().is_none())
    }
}

/// A cart line that does not meet its minimum order quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MoqViolation {
    pub variant_id: String,
    pub quantity: i64,
    pub advisory: QuantityFeedback,
    pub message: String,
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub savings: Money,
    pub checkout_ready: bool,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            savings: cart.savings(),
            checkout_ready: cart.checkout_ready(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PriceTier, QuantityUnit};

    const RICE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
    const ONION_ID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    fn rice() -> ProductVariant {
        ProductVariant {
            id: RICE_ID.to_string(),
            label: "Basmati 1121".to_string(),
            unit: QuantityUnit::Kg,
            base_price: Money::from_minor(9_000),
            tiers: vec![
                PriceTier::bounded(1, 99, Money::from_minor(8_500)),
                PriceTier::bounded(100, 499, Money::from_minor(8_000)),
                PriceTier::unbounded(500, Money::from_minor(7_500)),
            ],
            moq: Some(25),
        }
    }

    fn onion() -> ProductVariant {
        ProductVariant {
            id: ONION_ID.to_string(),
            label: "Nashik red".to_string(),
            unit: QuantityUnit::Quintal,
            base_price: Money::from_minor(250_000),
            tiers: Vec::new(),
            moq: None,
        }
    }

    #[test]
    fn test_add_and_merge() {
        let mut cart = Cart::new();
        cart.add_item(&rice(), "Rice", 60).unwrap();
        cart.add_item(&rice(), "Rice", 60).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 120);
        // 120 kg crosses into the 100-499 tier.
        assert_eq!(cart.items[0].unit_price(), Money::from_minor(8_000));
        assert_eq!(cart.items[0].active_tier(), Some(1));
    }

    #[test]
    fn test_update_quantity_reprices() {
        let mut cart = Cart::new();
        cart.add_item(&rice(), "Rice", 50).unwrap();
        assert_eq!(cart.subtotal(), Money::from_minor(8_500 * 50));

        cart.update_quantity(RICE_ID, 500).unwrap();
        assert_eq!(cart.subtotal(), Money::from_minor(7_500 * 500));
        assert_eq!(cart.savings(), Money::from_minor(1_500 * 500));
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(&onion(), "Onion", 3).unwrap();
        cart.update_quantity(ONION_ID, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_variant_errors() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.update_quantity(RICE_ID, 5),
            Err(CoreError::VariantNotInCart(_))
        ));
        assert!(matches!(
            cart.remove_item(RICE_ID),
            Err(CoreError::VariantNotInCart(_))
        ));
    }

    #[test]
    fn test_quantity_limits() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&onion(), "Onion", 0),
            Err(CoreError::Validation(_))
        ));

        cart.add_item(&onion(), "Onion", MAX_ITEM_QUANTITY).unwrap();
        assert!(matches!(
            cart.add_item(&onion(), "Onion", 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            cart.update_quantity(ONION_ID, MAX_ITEM_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_variant_rejected() {
        let mut cart = Cart::new();
        let mut bad = onion();
        bad.id = "onion-1".to_string();
        assert!(cart.add_item(&bad, "Onion", 1).is_err());

        let mut negative = onion();
        negative.base_price = Money::from_minor(-1);
        assert!(cart.add_item(&negative, "Onion", 1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_tier_price_rejected() {
        let mut cart = Cart::new();
        let mut refund = onion();
        refund.base_price = Money::from_minor(1_000);
        refund.tiers = vec![PriceTier::unbounded(1, Money::from_minor(-5_000))];

        assert!(matches!(
            cart.add_item(&refund, "Onion", 10),
            Err(CoreError::InvalidTier { index: 0, .. })
        ));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
        assert!(!cart.checkout_ready());
    }

    #[test]
    fn test_overlapping_tiers_still_accepted() {
        let mut cart = Cart::new();
        let mut overlapping = onion();
        overlapping.tiers = vec![
            PriceTier::bounded(1, 100, Money::from_minor(240_000)),
            PriceTier::bounded(50, 200, Money::from_minor(220_000)),
        ];

        cart.add_item(&overlapping, "Onion", 75).unwrap();
        assert_eq!(cart.items[0].unit_price(), Money::from_minor(240_000));
    }

    #[test]
    fn test_huge_lines_saturate_subtotal() {
        let mut cart = Cart::new();
        for _ in 0..2 {
            let mut bulk = onion();
            bulk.id = uuid::Uuid::new_v4().to_string();
            bulk.base_price = Money::from_minor(10_000_000_000_000);
            cart.add_item(&bulk, "Onion", MAX_ITEM_QUANTITY).unwrap();
        }

        assert_eq!(cart.subtotal(), Money::from_minor(i64::MAX));
        assert_eq!(CartTotals::from(&cart).subtotal.minor(), i64::MAX);
    }

    #[test]
    fn test_cart_size_limit() {
        let mut cart = Cart::new();
        for _ in 0..MAX_CART_ITEMS {
            let mut variant = onion();
            variant.id = uuid::Uuid::new_v4().to_string();
            cart.add_item(&variant, "Onion", 1).unwrap();
        }
        let mut one_more = onion();
        one_more.id = uuid::Uuid::new_v4().to_string();
        assert!(matches!(
            cart.add_item(&one_more, "Onion", 1),
            Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS })
        ));
    }

    #[test]
    fn test_moq_blocks_checkout() {
        let mut cart = Cart::new();
        assert!(!cart.checkout_ready());

        cart.add_item(&rice(), "Rice", 10).unwrap();
        cart.add_item(&onion(), "Onion", 1).unwrap();

        let violations = cart.moq_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].variant_id, RICE_ID);
        assert_eq!(violations[0].message, "Minimum order quantity is 25 kg");
        assert!(!cart.checkout_ready());

        cart.update_quantity(RICE_ID, 25).unwrap();
        assert!(cart.moq_violations().is_empty());
        assert!(cart.checkout_ready());
    }

    #[test]
    fn test_next_tier_hint_for_line() {
        let mut cart = Cart::new();
        cart.add_item(&rice(), "Rice", 90).unwrap();
        let hint = cart.items[0].next_tier().unwrap();
        assert_eq!(hint.additional_quantity, 10);
        assert_eq!(hint.price_per_unit, Money::from_minor(8_000));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(&rice(), "Rice", 100).unwrap();
        cart.add_item(&onion(), "Onion", 2).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 102);
        assert_eq!(totals.subtotal, Money::from_minor(800_000 + 500_000));
        assert_eq!(totals.savings, Money::from_minor(100_000));
        assert!(totals.checkout_ready);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&onion(), "Onion", 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }
}
