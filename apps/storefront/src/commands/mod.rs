//! # Commands Module
//!
//! Everything a storefront client can ask of the cart session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── order.rs    ◄─── Checkout and order handoff
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs cart and limits
//! fn add_to_cart(cart: &CartState, config: &StorefrontConfig, line: CartLine)
//!
//! // Needs cart, config, and somewhere to send the order
//! fn submit_order(cart: &CartState, config: &StorefrontConfig, sink: &mut S, ...)
//! ```
//!
//! Every fallible command returns `Result<T, ApiError>`; `T` and `ApiError`
//! both serialize to camelCase JSON.

pub mod cart;
pub mod config;
pub mod order;
