//! # Cart Store
//!
//! The storefront cart and its pricing. Every mutation recomputes all
//! derived totals before returning, so a reader never sees a quantity
//! next to a stale discount or subtotal.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User Action            Cart Method           Effect                    │
//! │  ───────────            ───────────           ──────                    │
//! │                                                                         │
//! │  Add to cart ──────────► add_line() ─────────► merge qty or append      │
//! │  Change quantity ──────► set_quantity() ─────► qty + discount together  │
//! │                                               (qty ≤ 0 → remove)        │
//! │  Click remove ─────────► remove_line() ──────► drop line (absent: no-op)│
//! │  Clear / order placed ─► clear() ────────────► empty, totals zeroed     │
//! │                                                                         │
//! │                       every mutation                                    │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                       recompute() ──► CartTotals                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Contract
//! `Cart` is a plain value with `&mut self` mutators. It does no locking;
//! hosts that share one cart between callers wrap it themselves.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::{resolve_discount, VolumeSchedule, VolumeTier};
use crate::money::{Money, Percent};
use crate::types::{BulkDiscountTier, ProductRecord};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart.
///
/// ## Derived Discount
/// `discount_bps` is owned by the cart: it is overwritten from
/// `bulk_discounts` whenever the line enters the cart or its quantity
/// changes. Whatever a caller puts there is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier, unique within a cart.
    pub id: String,

    /// Display name (opaque to pricing).
    pub name: String,

    /// Catalog category (opaque to pricing).
    #[serde(default)]
    pub category: String,

    /// Selling unit, if the catalog has one.
    #[serde(default)]
    pub unit: Option<String>,

    /// Price per unit in cents, before any discount.
    pub unit_price_cents: i64,

    /// Units on this line; always > 0 inside a cart.
    pub quantity: i64,

    /// Bulk-discount schedule for this product.
    #[serde(default)]
    pub bulk_discounts: Vec<BulkDiscountTier>,

    /// Currently applicable bulk discount in basis points.
    #[serde(default)]
    pub discount_bps: Option<u32>,
}

impl CartLine {
    /// Creates a line without a bulk-discount schedule.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        CartLine {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit: None,
            unit_price_cents: unit_price.cents(),
            quantity,
            bulk_discounts: Vec::new(),
            discount_bps: None,
        }
    }

    /// Attaches a bulk-discount schedule.
    pub fn with_bulk_discounts(mut self, schedule: Vec<BulkDiscountTier>) -> Self {
        self.bulk_discounts = schedule;
        self
    }

    /// Creates a line from a catalog product.
    ///
    /// ## Price Freezing
    /// The price and schedule are captured now. Later catalog updates do not
    /// reprice a line already in the cart.
    pub fn from_product(product: &ProductRecord, quantity: i64) -> Self {
        CartLine {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            unit: product.unit.clone(),
            unit_price_cents: product.price_cents,
            quantity,
            bulk_discounts: product.bulk_discounts.clone(),
            discount_bps: None,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// The bulk discount currently applied to this line, if any.
    #[inline]
    pub fn discount(&self) -> Option<Percent> {
        self.discount_bps.map(Percent::from_bps)
    }

    /// Unit price after the bulk discount (for display).
    pub fn discounted_unit_price(&self) -> Money {
        match self.discount() {
            Some(pct) => self.unit_price().apply_percentage_discount(pct),
            None => self.unit_price(),
        }
    }

    /// Unit price × quantity, ignoring discounts.
    pub fn original_line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Line total after the bulk discount.
    ///
    /// The discount is taken on the whole line and rounded once, so a
    /// 5% discount on 25 × $10.00 is exactly $237.50.
    pub fn line_total(&self) -> Money {
        match self.discount() {
            Some(pct) => self.original_line_total().apply_percentage_discount(pct),
            None => self.original_line_total(),
        }
    }

    /// Amount saved on this line by its bulk discount.
    pub fn line_savings(&self) -> Money {
        self.original_line_total() - self.line_total()
    }

    /// Re-derives the discount from the schedule at the current quantity.
    fn refresh_discount(&mut self) {
        self.discount_bps = resolve_discount(&self.bulk_discounts, self.quantity).map(|p| p.bps());
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart figures, recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,

    /// Sum of quantities.
    pub total_items: i64,

    /// Sum of unit price × quantity, ignoring all discounts.
    pub original_total: Money,

    /// Sum of line totals after bulk discounts.
    pub subtotal: Money,

    /// `original_total - subtotal`.
    pub total_savings: Money,

    /// `total_savings / original_total`, 0 for an empty cart.
    pub savings_bps: u32,

    /// Volume tier reached by `total_items`.
    pub volume_tier: VolumeTier,

    /// `subtotal - final_total`.
    pub volume_discount: Money,

    /// Subtotal after the volume tier discount.
    pub final_total: Money,
}

impl CartTotals {
    #[inline]
    pub fn savings_percentage(&self) -> Percent {
        Percent::from_bps(self.savings_bps)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The storefront cart.
///
/// ## Invariants
/// - lines are unique by `id` and kept in insertion order
/// - every line has `quantity > 0`
/// - every line's discount matches its schedule at its quantity
/// - `totals()` always reflects the current lines
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    volume_schedule: VolumeSchedule,
    totals: CartTotals,
}

impl Cart {
    /// Creates an empty cart priced with the standard volume table.
    pub fn new() -> Self {
        Self::with_volume_schedule(VolumeSchedule::standard())
    }

    /// Creates an empty cart priced with a custom volume table.
    pub fn with_volume_schedule(volume_schedule: VolumeSchedule) -> Self {
        Cart {
            lines: Vec::new(),
            volume_schedule,
            totals: CartTotals::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a line, or merges it into the existing line with the same id.
    ///
    /// ## Merge Semantics
    /// Only the quantity accumulates. The existing line keeps its price,
    /// name and schedule; its discount is re-derived at the new quantity.
    ///
    /// Callers pass a positive quantity. A line that would end up at zero
    /// or below is dropped rather than stored.
    pub fn add_line(&mut self, mut line: CartLine) {
        match self.lines.iter().position(|l| l.id == line.id) {
            Some(index) => {
                let existing = &mut self.lines[index];
                existing.quantity += line.quantity;
                if existing.quantity <= 0 {
                    self.lines.remove(index);
                } else {
                    existing.refresh_discount();
                }
            }
            None if line.quantity > 0 => {
                line.refresh_discount();
                self.lines.push(line);
            }
            None => {}
        }
        self.recompute();
    }

    /// Removes the line with `id`. Absent ids are a no-op.
    pub fn remove_line(&mut self, id: &str) {
        self.lines.retain(|l| l.id != id);
        self.recompute();
    }

    /// Sets a line's quantity and re-derives its discount in one step.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_line`]
    /// - unknown `id`: no-op
    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity;
            line.refresh_discount();
        }
        self.recompute();
    }

    /// Empties the cart; all totals return to zero.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        let total_items = self.lines.iter().map(|l| l.quantity).sum();
        let original_total = self.compute_original_total();
        let subtotal = self.compute_subtotal();
        let total_savings = original_total - subtotal;
        let volume_tier = self.volume_schedule.tier_for(total_items);
        let final_total = volume_tier.apply(subtotal);

        self.totals = CartTotals {
            line_count: self.lines.len(),
            total_items,
            original_total,
            subtotal,
            total_savings,
            savings_bps: Percent::ratio(total_savings, original_total).bps(),
            volume_tier,
            volume_discount: subtotal - final_total,
            final_total,
        };
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Sum of line totals after bulk discounts.
    pub fn compute_subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of unit price × quantity, ignoring discounts.
    pub fn compute_original_total(&self) -> Money {
        self.lines.iter().map(CartLine::original_line_total).sum()
    }

    /// The volume tier for the current item count.
    pub fn discount_tier(&self) -> VolumeTier {
        self.totals.volume_tier
    }

    /// Applies the current volume tier discount to `amount`.
    pub fn apply_volume_discount(&self, amount: Money) -> Money {
        self.totals.volume_tier.apply(amount)
    }

    /// Next volume tier and the number of additional items that reach it.
    pub fn items_to_next_tier(&self) -> Option<(VolumeTier, i64)> {
        self.volume_schedule.next_tier(self.totals.total_items)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All derived figures at once.
    #[inline]
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    #[inline]
    pub fn total_items(&self) -> i64 {
        self.totals.total_items
    }

    #[inline]
    pub fn original_total(&self) -> Money {
        self.totals.original_total
    }

    #[inline]
    pub fn total_savings(&self) -> Money {
        self.totals.total_savings
    }

    #[inline]
    pub fn savings_percentage(&self) -> Percent {
        self.totals.savings_percentage()
    }

    #[inline]
    pub fn final_total(&self) -> Money {
        self.totals.final_total
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.line(id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn volume_schedule(&self) -> &VolumeSchedule {
        &self.volume_schedule
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::BPS_PER_WHOLE;
    use proptest::prelude::*;

    fn line(id: &str, price_cents: i64, qty: i64) -> CartLine {
        CartLine::new(id, format!("Product {}", id), "Vegetables", Money::from_cents(price_cents), qty)
    }

    fn tiered(id: &str, price_cents: i64, qty: i64, min: i64, pct: u32) -> CartLine {
        line(id, price_cents, qty)
            .with_bulk_discounts(vec![BulkDiscountTier::new(min, Percent::from_whole(pct))])
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 999, 2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
        assert_eq!(cart.final_total().cents(), 1998);
    }

    #[test]
    fn test_add_same_id_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 500, 3));
        cart.add_line(line("p1", 500, 4));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line("p1").unwrap().quantity, 7);
    }

    #[test]
    fn test_merge_ignores_incoming_metadata() {
        let mut cart = Cart::new();
        cart.add_line(tiered("p1", 500, 10, 20, 5));

        let mut incoming = line("p1", 9_999, 15);
        incoming.name = "Renamed".to_string();
        cart.add_line(incoming);

        let merged = cart.line("p1").unwrap();
        assert_eq!(merged.quantity, 25);
        assert_eq!(merged.unit_price_cents, 500);
        assert_eq!(merged.name, "Product p1");
        // Existing schedule now qualifies at the merged quantity
        assert_eq!(merged.discount(), Some(Percent::from_whole(5)));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_line(line("c", 100, 1));
        cart.add_line(line("a", 100, 1));
        cart.add_line(line("b", 100, 1));
        cart.add_line(line("a", 100, 1));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_caller_supplied_discount_is_overwritten() {
        let mut cart = Cart::new();
        let mut bogus = line("p1", 1000, 1);
        bogus.discount_bps = Some(5000);
        cart.add_line(bogus);

        assert_eq!(cart.line("p1").unwrap().discount(), None);
        assert_eq!(cart.subtotal().cents(), 1000);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 1000, 3));
        cart.set_quantity("p1", 0);

        assert!(!cart.contains("p1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 1000, 3));
        cart.add_line(line("p2", 1000, 3));
        cart.set_quantity("p1", -4);

        assert!(!cart.contains("p1"));
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_set_quantity_updates_discount_with_quantity() {
        let mut cart = Cart::new();
        cart.add_line(tiered("p1", 1000, 5, 20, 5));
        assert_eq!(cart.line("p1").unwrap().discount(), None);

        cart.set_quantity("p1", 20);
        let updated = cart.line("p1").unwrap();
        assert_eq!(updated.quantity, 20);
        assert_eq!(updated.discount(), Some(Percent::from_whole(5)));

        cart.set_quantity("p1", 19);
        assert_eq!(cart.line("p1").unwrap().discount(), None);
    }

    #[test]
    fn test_set_quantity_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.set_quantity("missing-id", 5);

        assert!(cart.is_empty());
        assert_eq!(cart.totals(), &CartTotals::default());
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 1000, 1));
        cart.remove_line("nope");

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_resets_totals() {
        let mut cart = Cart::new();
        cart.add_line(tiered("p1", 1000, 30, 20, 5));
        assert!(cart.final_total().is_positive());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), &CartTotals::default());
    }

    #[test]
    fn test_empty_cart_is_safe() {
        let cart = Cart::new();

        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.savings_percentage(), Percent::zero());
        assert_eq!(cart.discount_tier(), VolumeTier::base());
        assert_eq!(cart.final_total(), Money::zero());
    }

    #[test]
    fn test_tier_boundaries_through_cart() {
        let cases = [(19, 0, 0), (20, 1, 10), (39, 1, 10), (40, 2, 15), (59, 2, 15), (60, 3, 25)];

        for (qty, tier, pct) in cases {
            let mut cart = Cart::new();
            cart.add_line(line("p1", 100, qty));
            let reached = cart.discount_tier();
            assert_eq!(reached.tier, tier, "tier at {} items", qty);
            assert_eq!(reached.percent(), Percent::from_whole(pct), "percent at {} items", qty);
        }
    }

    /// 25 cases at $10.00 with 5% off from 20 units.
    #[test]
    fn test_single_line_bulk_and_volume_discount() {
        let mut cart = Cart::new();
        cart.add_line(tiered("p1", 1000, 25, 20, 5));

        let p1 = cart.line("p1").unwrap();
        assert_eq!(p1.discount(), Some(Percent::from_whole(5)));
        assert_eq!(p1.line_total().cents(), 23750);

        assert_eq!(cart.total_items(), 25);
        assert_eq!(cart.discount_tier().tier, 1);
        assert_eq!(cart.discount_tier().percent(), Percent::from_whole(10));
        assert_eq!(cart.final_total().cents(), 21375);
    }

    /// Undiscounted line plus a bulk-discounted line reaching tier 3.
    #[test]
    fn test_two_lines_reach_top_tier() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 500, 10));
        cart.add_line(tiered("p2", 200, 50, 40, 15));

        let p2 = cart.line("p2").unwrap();
        assert_eq!(p2.discount(), Some(Percent::from_whole(15)));
        assert_eq!(p2.line_total().cents(), 8500);

        assert_eq!(cart.subtotal().cents(), 13500);
        assert_eq!(cart.total_items(), 60);
        assert_eq!(cart.discount_tier().tier, 3);
        assert_eq!(cart.final_total().cents(), 10125);
    }

    #[test]
    fn test_savings_figures() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 500, 10));
        cart.add_line(tiered("p2", 200, 50, 40, 15));

        // original 5000 + 10000, subtotal 13500
        assert_eq!(cart.original_total().cents(), 15000);
        assert_eq!(cart.total_savings().cents(), 1500);
        assert_eq!(cart.savings_percentage(), Percent::from_whole(10));
        assert_eq!(cart.totals().volume_discount.cents(), 3375);
    }

    #[test]
    fn test_apply_volume_discount_matches_final_total() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 333, 45));

        assert_eq!(cart.apply_volume_discount(cart.compute_subtotal()), cart.final_total());
        assert_eq!(
            cart.apply_volume_discount(Money::from_cents(10000)).cents(),
            8500
        );
    }

    #[test]
    fn test_items_to_next_tier() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", 100, 15));

        let (next, needed) = cart.items_to_next_tier().unwrap();
        assert_eq!(next.tier, 1);
        assert_eq!(needed, 5);

        cart.set_quantity("p1", 75);
        assert!(cart.items_to_next_tier().is_none());
    }

    #[test]
    fn test_custom_volume_schedule() {
        use crate::discount::VolumeStep;

        let schedule = VolumeSchedule::new(vec![
            VolumeStep::new(0, Percent::zero()),
            VolumeStep::new(5, Percent::from_whole(50)),
        ])
        .unwrap();
        let mut cart = Cart::with_volume_schedule(schedule);
        cart.add_line(line("p1", 1000, 5));

        assert_eq!(cart.final_total().cents(), 2500);
    }

    #[test]
    fn test_from_product_freezes_catalog_data() {
        let mut product = ProductRecord {
            id: "apl-gala".to_string(),
            name: "Gala Apples".to_string(),
            category: "Fruit".to_string(),
            unit: Some("case".to_string()),
            price_cents: 3200,
            bulk_discounts: vec![BulkDiscountTier::new(10, Percent::from_whole(8))],
            is_active: true,
        };
        let mut cart = Cart::new();
        cart.add_line(CartLine::from_product(&product, 10));

        product.price_cents = 9900;
        let line = cart.line("apl-gala").unwrap();
        assert_eq!(line.unit_price_cents, 3200);
        assert_eq!(line.unit.as_deref(), Some("case"));
        assert_eq!(line.line_total().cents(), 29440);
        assert_eq!(line.line_savings().cents(), 2560);
    }

    // -------------------------------------------------------------------------
    // Property tests
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Add { id: usize, qty: i64 },
        Set { id: usize, qty: i64 },
        Remove { id: usize },
        Clear,
    }

    const IDS: [&str; 4] = ["kale", "leek", "plum", "yam"];

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0..IDS.len(), 1i64..40).prop_map(|(id, qty)| Op::Add { id, qty }),
            3 => (0..IDS.len(), -5i64..80).prop_map(|(id, qty)| Op::Set { id, qty }),
            2 => (0..IDS.len()).prop_map(|id| Op::Remove { id }),
            1 => Just(Op::Clear),
        ]
    }

    /// Each product has a fixed price and schedule, as a catalog would.
    fn catalog_line(id: usize, qty: i64) -> CartLine {
        let price = [1250, 399, 2075, 88][id];
        let schedule = match id {
            0 => vec![BulkDiscountTier::new(10, Percent::from_whole(5))],
            1 => vec![
                BulkDiscountTier::new(30, Percent::from_bps(1250)),
                BulkDiscountTier::new(12, Percent::from_whole(4)),
            ],
            2 => Vec::new(),
            _ => vec![BulkDiscountTier::new(1, Percent::from_bps(333))],
        };
        line(IDS[id], price, qty).with_bulk_discounts(schedule)
    }

    fn apply(cart: &mut Cart, op: &Op) {
        match *op {
            Op::Add { id, qty } => cart.add_line(catalog_line(id, qty)),
            Op::Set { id, qty } => cart.set_quantity(IDS[id], qty),
            Op::Remove { id } => cart.remove_line(IDS[id]),
            Op::Clear => cart.clear(),
        }
    }

    proptest! {
        #[test]
        fn prop_merge_accumulates(q1 in 1i64..500, q2 in 1i64..500) {
            let mut cart = Cart::new();
            cart.add_line(catalog_line(0, q1));
            cart.add_line(catalog_line(0, q2));
            prop_assert_eq!(cart.len(), 1);
            prop_assert_eq!(cart.line(IDS[0]).map(|l| l.quantity), Some(q1 + q2));
        }

        #[test]
        fn prop_cart_identities_hold(ops in prop::collection::vec(op(), 0..30)) {
            let mut cart = Cart::new();
            for op in &ops {
                apply(&mut cart, op);

                let totals = *cart.totals();
                prop_assert_eq!(totals.original_total - totals.subtotal, totals.total_savings);
                prop_assert_eq!(totals.subtotal, cart.compute_subtotal());
                prop_assert_eq!(totals.original_total, cart.compute_original_total());
                prop_assert_eq!(
                    totals.final_total,
                    totals.subtotal.apply_percentage_discount(totals.volume_tier.percent())
                );
                // Exact product within half a cent
                let exact = totals.subtotal.cents() as i128
                    * (BPS_PER_WHOLE - totals.volume_tier.percent_bps) as i128;
                let scaled = totals.final_total.cents() as i128 * BPS_PER_WHOLE as i128;
                prop_assert!((scaled - exact).abs() <= BPS_PER_WHOLE as i128 / 2);

                prop_assert_eq!(totals.total_items, cart.lines().iter().map(|l| l.quantity).sum::<i64>());
                prop_assert_eq!(totals.volume_tier, cart.volume_schedule().tier_for(totals.total_items));
            }
        }

        #[test]
        fn prop_line_invariants_hold(ops in prop::collection::vec(op(), 0..30)) {
            let mut cart = Cart::new();
            for op in &ops {
                apply(&mut cart, op);

                for (i, line) in cart.lines().iter().enumerate() {
                    prop_assert!(line.quantity > 0);
                    prop_assert_eq!(line.discount(), resolve_discount(&line.bulk_discounts, line.quantity));
                    prop_assert!(cart.lines()[i + 1..].iter().all(|other| other.id != line.id));
                }
            }
        }
    }
}
