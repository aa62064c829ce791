//! # harvest-core: Pure Cart Pricing for the Harvest Storefront
//!
//! This crate holds the storefront's pricing rules as plain values and pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Storefront frontend (cart drawer, product pages)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (session layer)                 │   │
//! │  │     add_to_cart, update_cart_item, submit_order, config, CLI    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ harvest-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │  money  │ │ discount │ │  cart   │ │  order  │ │validate │ │   │
//! │  │   │ Money   │ │ bulk +   │ │ Cart    │ │ handoff │ │ rules   │ │   │
//! │  │   │ Percent │ │ volume   │ │ totals  │ │ snapshot│ │         │ │   │
//! │  │   └─────────┘ └──────────┘ └─────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money (integer cents) and Percent (basis points)
//! - [`discount`] - bulk-discount resolution and volume tiers
//! - [`cart`] - the cart store and its derived totals
//! - [`order`] - checkout snapshot for the order submission service
//! - [`types`] - catalog product and address types
//! - [`validation`] - input checks for the session boundary
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use harvest_core::{BulkDiscountTier, Cart, CartLine, Money, Percent};
//!
//! let mut cart = Cart::new();
//! cart.add_line(
//!     CartLine::new("p1", "Roma Tomatoes", "Vegetables", Money::from_cents(1000), 25)
//!         .with_bulk_discounts(vec![BulkDiscountTier::new(20, Percent::from_whole(5))]),
//! );
//!
//! assert_eq!(cart.subtotal().cents(), 23750); // 5% bulk discount
//! assert_eq!(cart.discount_tier().tier, 1); // 25 items -> 10% volume tier
//! assert_eq!(cart.final_total().cents(), 21375);
//! ```

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use discount::{resolve_discount, VolumeSchedule, VolumeStep, VolumeTier};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percent};
pub use order::{OrderSubmission, ShippingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of distinct lines in one cart.
///
/// Wholesale buyers order wide; the storefront config can lower or raise it.
pub const MAX_CART_LINES: usize = 250;

/// Default maximum quantity on a single line.
///
/// Catches fat-finger entries (100000 instead of 100) on case-priced goods.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

/// Highest accepted unit price: $1,000,000.00.
///
/// At the default limits the largest possible subtotal is
/// `MAX_UNIT_PRICE_CENTS × MAX_LINE_QUANTITY × MAX_CART_LINES`
/// (2.5 × 10^14 cents), far inside `i64`.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;
