//! # Cart State
//!
//! Holds the session's single active cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` so that:
//! 1. only one command mutates the cart at a time
//! 2. each mutation, including the totals recompute, finishes before any
//!    other command reads the cart
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                  Lock          Cart call                       │
//! │  ───────                  ────          ─────────                       │
//! │  add_to_cart() ─────────► exclusive ──► cart.add_line(line)             │
//! │  update_cart_item() ────► exclusive ──► cart.set_quantity(id, n)        │
//! │  remove_from_cart() ────► exclusive ──► cart.remove_line(id)            │
//! │  clear_cart() ──────────► exclusive ──► cart.clear()                    │
//! │  submit_order() ────────► exclusive ──► snapshot, hand off, clear       │
//! │  get_cart() ────────────► exclusive ──► (read only, released quickly)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use harvest_core::{Cart, VolumeSchedule};

/// Session-managed cart state.
///
/// ## Why Not RwLock?
/// Most cart commands write, and every one of them is short.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state priced with the standard volume table.
    pub fn new() -> Self {
        Self::with_volume_schedule(VolumeSchedule::standard())
    }

    /// Creates a new empty cart state priced with `schedule`.
    pub fn with_volume_schedule(schedule: VolumeSchedule) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::with_volume_schedule(schedule))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| *cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.set_quantity("p1", 4));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Cart mutators never leave it half-updated, so a poisoned lock still
    /// guards a consistent cart.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::{CartLine, Money};
    use std::thread;

    fn line(id: &str, qty: i64) -> CartLine {
        CartLine::new(id, "Yellow Onions", "Vegetables", Money::from_cents(250), qty)
    }

    #[test]
    fn test_with_cart_mut_then_read() {
        let state = CartState::new();
        state.with_cart_mut(|c| c.add_line(line("p1", 3)));

        let total_items = state.with_cart(|c| c.total_items());
        assert_eq!(total_items, 3);
    }

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let other = state.clone();
        other.with_cart_mut(|c| c.add_line(line("p1", 2)));

        assert!(state.with_cart(|c| c.contains("p1")));
    }

    #[test]
    fn test_concurrent_adds_serialize() {
        let state = CartState::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        state.with_cart_mut(|c| c.add_line(line("p1", 1)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        state.with_cart(|c| {
            assert_eq!(c.len(), 1);
            assert_eq!(c.total_items(), 80);
            assert_eq!(c.subtotal(), c.compute_subtotal());
        });
    }
}
