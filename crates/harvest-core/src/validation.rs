//! # Validation Module
//!
//! Input checks run at the session boundary, before the cart is touched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Frontend                                                      │
//! │  └── Basic format checks, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (THIS MODULE)                              │
//! │  └── Reject malformed lines, schedules, addresses                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart store                                                    │
//! │  └── Assumes well-formed input; never "fixes" it                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that a non-positive quantity on *update* is not an error: the cart
//! treats it as a removal. Only additions require a positive quantity.

use std::collections::HashSet;

use crate::cart::CartLine;
use crate::error::ValidationError;
use crate::money::BPS_PER_WHOLE;
use crate::types::{Address, BulkDiscountTier};
use crate::MAX_UNIT_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ID_LEN: usize = 64;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens, underscores only (no surrounding
///   whitespace: the id is the cart key as given)
///
/// ```rust
/// use harvest_core::validation::validate_product_id;
///
/// assert!(validate_product_id("tom-roma-25lb").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("has space").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "only letters, digits, '-' and '_' are allowed".to_string(),
        });
    }

    Ok(())
}

/// Validates a required free-text field such as a product or street name.
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity being added to the cart.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
pub fn validate_quantity(qty: i64, max: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

/// Validates a unit price in cents. Zero is allowed (samples, promos).
///
/// Prices above [`MAX_UNIT_PRICE_CENTS`] are rejected so line totals and
/// the subtotal stay within `i64`.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_UNIT_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a percentage in basis points (0% to 100%).
pub fn validate_percent_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > BPS_PER_WHOLE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_PER_WHOLE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Schedule Validators
// =============================================================================

/// Validates a product's bulk-discount schedule.
///
/// ## Rules
/// - every `min_quantity` is positive
/// - every discount is within 0-100%
/// - no two tiers share a `min_quantity`
///
/// Tiers may arrive in any order.
pub fn validate_bulk_schedule(schedule: &[BulkDiscountTier]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(schedule.len());

    for tier in schedule {
        if tier.min_quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "min_quantity".to_string(),
            });
        }

        validate_percent_bps("discount", tier.discount_bps)?;

        if !seen.insert(tier.min_quantity) {
            return Err(ValidationError::Duplicate {
                field: "min_quantity".to_string(),
                value: tier.min_quantity.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a line about to be added to the cart.
pub fn validate_cart_line(line: &CartLine, max_quantity: i64) -> ValidationResult<()> {
    validate_product_id(&line.id)?;
    validate_required_text("name", &line.name)?;
    validate_price_cents(line.unit_price_cents)?;
    validate_quantity(line.quantity, max_quantity)?;
    validate_bulk_schedule(&line.bulk_discounts)
}

/// Validates cart size before a new distinct line is added.
pub fn validate_cart_size(current_lines: usize, max: usize) -> ValidationResult<()> {
    if current_lines >= max {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: max as i64,
        });
    }

    Ok(())
}

/// Validates a billing or shipping address.
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    validate_required_text("name", &address.name)?;
    validate_required_text("street", &address.street)?;
    validate_required_text("city", &address.city)?;
    validate_required_text("postal_code", &address.postal_code)?;

    if address.country.trim().len() != 2 {
        return Err(ValidationError::InvalidFormat {
            field: "country".to_string(),
            reason: "must be a two-letter ISO 3166 code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
