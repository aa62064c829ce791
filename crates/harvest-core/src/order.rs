//! # Order Handoff
//!
//! The frozen snapshot passed to the order submission service once the
//! customer checks out. After the handoff the cart's job is done.
//!
//! ```text
//! Cart ──► OrderSubmission::from_cart ──► { items, subtotal, shipping_cost,
//!                                           total, billing_address,
//!                                           shipping_address }
//! ```
//!
//! Transport (HTTP, JSON encoding, auth) is not this crate's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::discount::VolumeTier;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Address;

// =============================================================================
// Shipping
// =============================================================================

/// How shipping is charged on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Flat delivery charge per order.
    pub flat_rate: Money,

    /// Orders whose final total reaches this amount ship free.
    pub free_threshold: Option<Money>,
}

impl ShippingPolicy {
    /// Shipping cost for an order with the given payable amount.
    pub fn cost_for(&self, final_total: Money) -> Money {
        match self.free_threshold {
            Some(threshold) if final_total >= threshold => Money::zero(),
            _ => self.flat_rate,
        }
    }
}

// =============================================================================
// Order Submission
// =============================================================================

/// Snapshot of a finalized cart, ready for the order submission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    /// Client-generated id (UUID v4), usable as an idempotency key.
    pub id: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Lines exactly as priced in the cart.
    pub items: Vec<CartLine>,

    /// Line-discounted subtotal.
    pub subtotal: Money,

    /// Volume tier applied to the subtotal.
    pub volume_tier: VolumeTier,

    /// Subtotal after the volume tier.
    pub discounted_subtotal: Money,

    pub shipping_cost: Money,

    /// `discounted_subtotal + shipping_cost`.
    pub total: Money,

    pub billing_address: Address,
    pub shipping_address: Address,
}

impl OrderSubmission {
    /// Freezes `cart` into a submission.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to order
    pub fn from_cart(
        cart: &Cart,
        shipping: &ShippingPolicy,
        billing_address: Address,
        shipping_address: Address,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = cart.totals();
        let shipping_cost = shipping.cost_for(totals.final_total);

        Ok(OrderSubmission {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            items: cart.lines().to_vec(),
            subtotal: totals.subtotal,
            volume_tier: totals.volume_tier,
            discounted_subtotal: totals.final_total,
            shipping_cost,
            total: totals.final_total + shipping_cost,
            billing_address,
            shipping_address,
        })
    }

    /// Total units across all lines.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}
