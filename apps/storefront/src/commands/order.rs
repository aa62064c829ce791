//! # Order Commands
//!
//! Checkout: freeze the cart into an [`OrderSubmission`] and hand it to the
//! order submission service.
//!
//! ```text
//! submit_order()
//!   ├── validate addresses
//!   ├── lock cart ─────────────────────────────────────────┐
//!   │     OrderSubmission::from_cart(cart, shipping, ...)  │
//!   │     sink.submit(&order)                              │ one critical
//!   │       ├── Ok(receipt) ──► cart.clear()               │ section
//!   │       └── Err(e) ───────► cart untouched             │
//!   └── unlock ────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use harvest_core::validation::validate_address;
use harvest_core::{Address, OrderSubmission};

use crate::error::{ApiError, OrderSinkError};
use crate::state::{CartState, StorefrontConfig};

/// Acknowledgement returned by the order submission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,

    /// Service-side reference, if the service issues one.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Destination for finalized orders.
pub trait OrderSink {
    fn submit(&mut self, order: &OrderSubmission) -> Result<OrderReceipt, OrderSinkError>;
}

/// Addresses collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub billing_address: Address,

    /// Ships to the billing address when absent.
    #[serde(default)]
    pub shipping_address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order: OrderSubmission,
    pub receipt: OrderReceipt,
}

/// Submits the current cart as an order.
///
/// The cart is cleared only after the sink accepts the order. A rejected
/// or failed handoff leaves every line in place so the customer can retry.
///
/// ## Errors
/// - invalid billing or shipping address
/// - empty cart
/// - sink rejection or failure
pub fn submit_order<S>(
    cart: &CartState,
    config: &StorefrontConfig,
    sink: &mut S,
    request: CheckoutRequest,
) -> Result<CheckoutResponse, ApiError>
where
    S: OrderSink + ?Sized,
{
    debug!("submit_order command");

    let billing_address = request.billing_address;
    let shipping_address = request
        .shipping_address
        .unwrap_or_else(|| billing_address.clone());

    validate_address(&billing_address)?;
    validate_address(&shipping_address)?;

    let shipping = config.shipping_policy();

    cart.with_cart_mut(|c| -> Result<CheckoutResponse, ApiError> {
        let order = OrderSubmission::from_cart(c, &shipping, billing_address, shipping_address)?;

        match sink.submit(&order) {
            Ok(receipt) => {
                c.clear();
                info!(
                    order_id = %order.id,
                    items = order.total_items(),
                    tier = order.volume_tier.tier,
                    total = %order.total,
                    "Order submitted"
                );
                Ok(CheckoutResponse { order, receipt })
            }
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Order handoff failed, cart kept");
                Err(e.into())
            }
        }
    })
}
