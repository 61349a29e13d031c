//! JSON request documents accepted by the CLI.

use std::fs;
use std::path::Path;

use agrimart_core::{Cart, ProductVariant};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `cart` subcommand input.
///
/// ```json
/// { "items": [{ "productName": "Basmati rice", "variant": { ... }, "quantity": 40 }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub items: Vec<CartLineRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub product_name: String,
    pub variant: ProductVariant,
    pub quantity: i64,
}

impl CartRequest {
    /// Builds a cart from the request lines, in order.
    pub fn into_cart(self) -> Result<Cart> {
        let mut cart = Cart::new();
        for (index, line) in self.items.into_iter().enumerate() {
            cart.add_item(&line.variant, &line.product_name, line.quantity)
                .with_context(|| format!("line {} ({})", index + 1, line.product_name))?;
            debug!(
                line = index + 1,
                variant = %line.variant.id,
                quantity = line.quantity,
                "line added"
            );
        }
        Ok(cart)
    }
}

/// Reads and parses a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
