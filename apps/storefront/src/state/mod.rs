//! # State Module
//!
//! Session state for the storefront.
//!
//! ```text
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │        CartState         │   │     StorefrontConfig     │
//! │                          │   │                          │
//! │  Arc<Mutex<Cart>>        │   │  store, limits, pricing, │
//! │  one cart per session    │   │  shipping (read-only)    │
//! └──────────────────────────┘   └──────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

mod cart;
mod config;

pub use cart::CartState;
pub use config::{
    LimitSettings, PricingSettings, ShippingSettings, StoreSettings, StorefrontConfig,
};
