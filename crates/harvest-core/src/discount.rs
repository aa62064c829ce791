//! # Discount Rules
//!
//! The two discount mechanisms of the storefront cart:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PER-LINE BULK DISCOUNT               ORDER-WIDE VOLUME TIER            │
//! │  ──────────────────────               ──────────────────────            │
//! │  product schedule × line quantity     step function over total items    │
//! │                                                                         │
//! │  [{20, 5%}, {50, 12%}]                 0-19  → tier 0,  0%              │
//! │   qty 25 → 5%                          20-39 → tier 1, 10%              │
//! │   qty 60 → 12%                         40-59 → tier 2, 15%              │
//! │   qty 10 → none                        ≥60   → tier 3, 25%              │
//! │                                                                         │
//! │  resolve_discount()                    VolumeSchedule::tier_for()       │
//! │           │                                      │                      │
//! │           ▼                                      ▼                      │
//! │   line totals ──► subtotal ──────────► final total (multiplicative)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percent, BPS_PER_WHOLE};
use crate::types::BulkDiscountTier;

// =============================================================================
// Bulk Discount Resolution
// =============================================================================

/// Picks the bulk discount a line of `quantity` units qualifies for.
///
/// The best qualifying tier is the one with the highest `min_quantity` not
/// exceeding `quantity`. When two tiers share a minimum the larger discount
/// wins, so the result never depends on the order of `schedule`.
///
/// ```rust
/// use harvest_core::discount::resolve_discount;
/// use harvest_core::money::Percent;
/// use harvest_core::types::BulkDiscountTier;
///
/// let schedule = [
///     BulkDiscountTier::new(50, Percent::from_whole(12)),
///     BulkDiscountTier::new(20, Percent::from_whole(5)),
/// ];
/// assert_eq!(resolve_discount(&schedule, 10), None);
/// assert_eq!(resolve_discount(&schedule, 20), Some(Percent::from_whole(5)));
/// assert_eq!(resolve_discount(&schedule, 75), Some(Percent::from_whole(12)));
/// ```
pub fn resolve_discount(schedule: &[BulkDiscountTier], quantity: i64) -> Option<Percent> {
    schedule
        .iter()
        .filter(|tier| tier.min_quantity <= quantity)
        .max_by_key(|tier| (tier.min_quantity, tier.discount_bps))
        .map(BulkDiscountTier::discount)
}

// =============================================================================
// Volume Tiers
// =============================================================================

/// One step of the order-wide volume schedule.
///
/// Field names stay snake_case: this type is read straight from
/// `storefront.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VolumeStep {
    /// Smallest total item count that reaches this step.
    pub min_items: i64,

    /// Discount in basis points applied to the subtotal.
    pub percent_bps: u32,
}

impl VolumeStep {
    pub const fn new(min_items: i64, percent: Percent) -> Self {
        VolumeStep {
            min_items,
            percent_bps: percent.bps(),
        }
    }
}

/// The volume tier a cart currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTier {
    /// Tier number; 0 is the undiscounted base tier.
    pub tier: u32,

    /// Discount in basis points.
    pub percent_bps: u32,
}

impl VolumeTier {
    /// The undiscounted base tier.
    pub const fn base() -> Self {
        VolumeTier {
            tier: 0,
            percent_bps: 0,
        }
    }

    #[inline]
    pub const fn percent(&self) -> Percent {
        Percent::from_bps(self.percent_bps)
    }

    /// Applies this tier's discount to `amount`. Identity at 0%.
    pub fn apply(&self, amount: Money) -> Money {
        if self.percent_bps == 0 {
            return amount;
        }
        amount.apply_percentage_discount(self.percent())
    }
}

/// A step function from total item count to volume discount.
///
/// ## Invariants
/// - at least one step, the first starting at 0 items
/// - `min_items` strictly ascending
/// - every percentage within 0-100%
///
/// Boundaries are inclusive-lower: with the standard table, 60 items is
/// tier 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct VolumeSchedule {
    steps: Vec<VolumeStep>,
}

impl VolumeSchedule {
    /// The storefront's standard table: 0/10/15/25% at 0/20/40/60 items.
    pub fn standard() -> Self {
        VolumeSchedule {
            steps: vec![
                VolumeStep::new(0, Percent::zero()),
                VolumeStep::new(20, Percent::from_whole(10)),
                VolumeStep::new(40, Percent::from_whole(15)),
                VolumeStep::new(60, Percent::from_whole(25)),
            ],
        }
    }

    /// Builds a schedule from custom steps, checking the invariants.
    pub fn new(steps: Vec<VolumeStep>) -> CoreResult<Self> {
        let first = steps.first().ok_or_else(|| CoreError::InvalidVolumeSchedule {
            reason: "at least one step is required".to_string(),
        })?;

        if first.min_items != 0 {
            return Err(CoreError::InvalidVolumeSchedule {
                reason: format!("first step must start at 0 items, got {}", first.min_items),
            });
        }

        if let Some(pair) = steps.windows(2).find(|w| w[1].min_items <= w[0].min_items) {
            return Err(CoreError::InvalidVolumeSchedule {
                reason: format!(
                    "min_items must be strictly ascending ({} then {})",
                    pair[0].min_items, pair[1].min_items
                ),
            });
        }

        if let Some(step) = steps.iter().find(|s| s.percent_bps > BPS_PER_WHOLE) {
            return Err(CoreError::InvalidVolumeSchedule {
                reason: format!("{} exceeds 100%", Percent::from_bps(step.percent_bps)),
            });
        }

        Ok(VolumeSchedule { steps })
    }

    pub fn steps(&self) -> &[VolumeStep] {
        &self.steps
    }

    /// Returns the tier reached by `total_items`.
    pub fn tier_for(&self, total_items: i64) -> VolumeTier {
        self.steps
            .iter()
            .enumerate()
            .rev()
            .find(|(_, step)| total_items >= step.min_items)
            .map(|(index, step)| VolumeTier {
                tier: index as u32,
                percent_bps: step.percent_bps,
            })
            .unwrap_or_else(VolumeTier::base)
    }

    /// Returns the next tier above `total_items` and how many more items
    /// reach it, or `None` at the top tier.
    pub fn next_tier(&self, total_items: i64) -> Option<(VolumeTier, i64)> {
        self.steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.min_items > total_items)
            .map(|(index, step)| {
                (
                    VolumeTier {
                        tier: index as u32,
                        percent_bps: step.percent_bps,
                    },
                    step.min_items - total_items,
                )
            })
    }
}

impl Default for VolumeSchedule {
    fn default() -> Self {
        VolumeSchedule::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
