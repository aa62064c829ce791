//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │          │     │ handed off│      │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                  │             │
//! │       │           add_to_cart                        submit_order      │
//! │       │           update_cart_item                   (order.rs)        │
//! │       │           remove_from_cart                        │             │
//! │       │                │                                  │             │
//! │       └──── clear_cart ┴──────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use harvest_core::validation::{validate_cart_line, validate_cart_size};
use harvest_core::{Cart, CartLine, CartTotals, CoreError, ProductRecord, VolumeTier};

use crate::error::ApiError;
use crate::state::{CartState, StorefrontConfig};

/// "Add N more items for X% off" hint for the cart drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTierHint {
    pub tier: VolumeTier,
    pub items_needed: i64,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub next_tier: Option<NextTierHint>,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().to_vec(),
            totals: *cart.totals(),
            next_tier: cart
                .items_to_next_tier()
                .map(|(tier, items_needed)| NextTierHint { tier, items_needed }),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current lines in insertion order, with all derived totals.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Gets a single cart line by product id.
pub fn get_cart_line(cart: &CartState, product_id: &str) -> Result<CartLine, ApiError> {
    debug!(product_id = %product_id, "get_cart_line command");
    cart.with_cart(|c| c.line(product_id).cloned())
        .ok_or_else(|| ApiError::not_found("Cart line", product_id))
}

/// Adds a line to the cart.
///
/// ## Behavior
/// - Same id already in cart: quantities merge, the existing line's price
///   and schedule are kept
/// - New id: appended after existing lines
///
/// ## Errors
/// - malformed line (id, name, price, quantity, schedule)
/// - new line would exceed `limits.max_cart_lines`
/// - merged quantity would exceed `limits.max_line_quantity`
pub fn add_to_cart(
    cart: &CartState,
    config: &StorefrontConfig,
    line: CartLine,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %line.id, quantity = line.quantity, "add_to_cart command");

    let limits = config.limits;
    validate_cart_line(&line, limits.max_line_quantity)?;

    cart.with_cart_mut(|c| -> Result<CartResponse, CoreError> {
        match c.line(&line.id) {
            Some(existing) => {
                let merged = existing.quantity + line.quantity;
                if merged > limits.max_line_quantity {
                    return Err(CoreError::QuantityTooLarge {
                        requested: merged,
                        max: limits.max_line_quantity,
                    });
                }
            }
            None => validate_cart_size(c.len(), limits.max_cart_lines).map_err(|_| {
                CoreError::CartTooLarge {
                    max: limits.max_cart_lines,
                }
            })?,
        }

        c.add_line(line);
        Ok(CartResponse::from(&*c))
    })
    .map_err(ApiError::from)
}

/// Adds a catalog product to the cart.
///
/// ## Arguments
/// * `product` - record from the catalog provider
/// * `quantity` - units to add (default: 1)
pub fn add_product_to_cart(
    cart: &CartState,
    config: &StorefrontConfig,
    product: &ProductRecord,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product.id, quantity = quantity, "add_product_to_cart command");

    if !product.is_active {
        return Err(ApiError::validation(format!(
            "{} is not available for ordering",
            product.name
        )));
    }

    add_to_cart(cart, config, CartLine::from_product(product, quantity))
}

/// Updates the quantity of a line.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the line
/// - Unknown product id: no change
/// - Quantity above `limits.max_line_quantity`: error, cart untouched
pub fn update_cart_item(
    cart: &CartState,
    config: &StorefrontConfig,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = quantity, "update_cart_item command");

    let max = config.limits.max_line_quantity;
    if quantity > max {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max,
        }
        .into());
    }

    Ok(cart.with_cart_mut(|c| {
        c.set_quantity(product_id, quantity);
        CartResponse::from(&*c)
    }))
}

/// Removes a line from the cart. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_line(product_id);
        CartResponse::from(&*c)
    })
}

/// Clears all lines from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}
