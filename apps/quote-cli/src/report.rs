//! # Reports
//!
//! Serializable views of priced results, plus their text rendering.
//!
//! ```text
//! Cart ──► CartReport ──┬──► --json : serde_json
//!                       └──► text   : render_cart()
//! ```

use std::fmt::Write as _;

use agrimart_core::validation::validate_tiers;
use agrimart_core::{
    tier_rows, Cart, CartTotals, CostBreakdown, Money, MoqViolation, ProductVariant, TierHint,
    TierRow,
};
use serde::Serialize;

use crate::config::QuoteConfig;

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReport {
    pub product_name: String,
    pub variant_label: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_price: Money,
    pub line_total: Money,
    pub savings: Money,
    pub active_tier: Option<usize>,
    pub next_tier: Option<TierHint>,
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartReport {
    pub lines: Vec<LineReport>,
    pub moq_violations: Vec<MoqViolation>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartReport {
    fn from(cart: &Cart) -> Self {
        let lines = cart
            .items
            .iter()
            .map(|item| LineReport {
                product_name: item.product_name.clone(),
                variant_label: item.variant.label.clone(),
                quantity: item.quantity,
                unit: item.variant.unit.to_string(),
                unit_price: item.unit_price(),
                line_total: item.line_total(),
                savings: item.savings(),
                active_tier: item.active_tier(),
                next_tier: item.next_tier(),
                advisory: item.moq_advisory().map(|a| a.message()),
            })
            .collect();

        CartReport {
            lines,
            moq_violations: cart.moq_violations(),
            totals: CartTotals::from(cart),
        }
    }
}

pub fn render_cart(report: &CartReport, config: &QuoteConfig) -> String {
    let mut out = String::new();

    for line in &report.lines {
        let _ = writeln!(
            out,
            "{} ({}) x{} {} @ {} = {}",
            line.product_name,
            line.variant_label,
            line.quantity,
            line.unit,
            config.format_money(line.unit_price),
            config.format_money(line.line_total),
        );
        if !line.savings.is_zero() {
            let _ = writeln!(out, "    saves {}", config.format_money(line.savings));
        }
        if let Some(hint) = &line.next_tier {
            let _ = writeln!(
                out,
                "    Buy {} more {} for {}/{}",
                hint.additional_quantity,
                line.unit,
                config.format_money(hint.price_per_unit),
                line.unit,
            );
        }
        if let Some(advisory) = &line.advisory {
            let _ = writeln!(out, "    ! {}", advisory);
        }
    }

    let totals = &report.totals;
    let _ = writeln!(out, "Items: {} ({} units)", totals.item_count, totals.total_quantity);
    let _ = writeln!(out, "Subtotal: {}", config.format_money(totals.subtotal));
    if !totals.savings.is_zero() {
        let _ = writeln!(out, "You save: {}", config.format_money(totals.savings));
    }
    let _ = writeln!(
        out,
        "Checkout: {}",
        if totals.checkout_ready { "ready" } else { "blocked" }
    );

    out
}

// =============================================================================
// Freight
// =============================================================================

pub fn render_freight(cost: &CostBreakdown, config: &QuoteConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Base fee:   {}", config.format_money(cost.base_fee));
    let _ = writeln!(out, "Distance:   {}", config.format_money(cost.distance_charge));
    let _ = writeln!(out, "Weight:     {}", config.format_money(cost.weight_charge));
    let _ = writeln!(
        out,
        "Multiplier: {:.2}x ({})",
        cost.multiplier.bps() as f64 / 10_000.0,
        config.format_money(cost.adjustment)
    );
    if !cost.insurance.is_zero() {
        let _ = writeln!(out, "Insurance:  {}", config.format_money(cost.insurance));
    }
    let _ = writeln!(out, "Total:      {}", config.format_money(cost.total));
    out
}

// =============================================================================
// Tier Table
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierReport {
    pub label: String,
    pub base_price: Money,
    pub rows: Vec<TierRow>,
    /// Present when the schedule is malformed. It is still priced first-match.
    pub problem: Option<String>,
}

impl From<&ProductVariant> for TierReport {
    fn from(variant: &ProductVariant) -> Self {
        TierReport {
            label: variant.label.clone(),
            base_price: variant.base_price,
            rows: tier_rows(&variant.tiers, variant.unit),
            problem: validate_tiers(&variant.tiers).err().map(|e| e.to_string()),
        }
    }
}

pub fn render_tiers(report: &TierReport, config: &QuoteConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (list {})", report.label, config.format_money(report.base_price));
    for row in &report.rows {
        let _ = write!(out, "  {:<16} {}", row.label, config.format_money(row.price_per_unit));
        if row.savings.bps() > 0 {
            let _ = write!(out, "  (-{:.1}%)", row.savings.percentage());
        }
        out.push('\n');
    }
    if let Some(problem) = &report.problem {
        let _ = writeln!(out, "! {}", problem);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimart_core::{PriceTier, QuantityUnit};

    fn variant() -> ProductVariant {
        ProductVariant {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            label: "Tomato, hybrid".to_string(),
            unit: QuantityUnit::Crate,
            base_price: Money::from_minor(60_000),
            tiers: vec![
                PriceTier::bounded(1, 9, Money::from_minor(55_000)),
                PriceTier::unbounded(10, Money::from_minor(50_000)),
            ],
            moq: Some(5),
        }
    }

    #[test]
    fn test_cart_report_text() {
        let mut cart = Cart::new();
        cart.add_item(&variant(), "Tomato", 3).unwrap();

        let report = CartReport::from(&cart);
        assert_eq!(report.lines[0].active_tier, Some(0));
        assert_eq!(report.moq_violations.len(), 1);

        let text = render_cart(&report, &QuoteConfig::default());
        assert!(text.contains("Tomato (Tomato, hybrid) x3 crate @ ₹550.00 = ₹1650.00"));
        assert!(text.contains("Buy 7 more crate for ₹500.00/crate"));
        assert!(text.contains("! Minimum order quantity is 5 crate"));
        assert!(text.contains("Checkout: blocked"));
    }

    #[test]
    fn test_cart_report_json_shape() {
        let mut cart = Cart::new();
        cart.add_item(&variant(), "Tomato", 12).unwrap();

        let json = serde_json::to_value(CartReport::from(&cart)).unwrap();
        assert_eq!(json["lines"][0]["unitPrice"], 50_000);
        assert_eq!(json["totals"]["subtotal"], 600_000);
        assert_eq!(json["totals"]["checkoutReady"], true);
    }

    #[test]
    fn test_next_tier_hint_uses_configured_currency() {
        let mut cart = Cart::new();
        cart.add_item(&variant(), "Tomato", 3).unwrap();

        let config = QuoteConfig {
            currency_symbol: "KSh ".to_string(),
            currency_decimals: 0,
            ..QuoteConfig::default()
        };
        let text = render_cart(&CartReport::from(&cart), &config);
        assert!(text.contains("Buy 7 more crate for KSh 50000/crate"));
        assert!(!text.contains("500.00"));
    }

    #[test]
    fn test_tier_report_flags_malformed_schedule() {
        let mut v = variant();
        v.tiers.push(PriceTier::bounded(5, 20, Money::from_minor(45_000)));

        let report = TierReport::from(&v);
        assert_eq!(report.rows.len(), 3);
        assert!(report.problem.is_some());

        let text = render_tiers(&report, &QuoteConfig::default());
        assert!(text.contains("10+ crate"));
        assert!(text.contains("! Tier"));
    }
}
