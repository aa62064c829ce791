//! # Error Types
//!
//! Domain-specific error types for harvest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  harvest-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations at the cart boundary   │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront errors (app)                                                │
//! │  ├── ConfigError      - storefront.toml / env problems                  │
//! │  └── ApiError         - What callers see (serialized)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart store itself never fails: removals of missing lines are no-ops
//! and non-positive quantities turn into removals. These errors come from
//! the checks the session layer runs *before* it touches the cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart has reached its maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the configured maximum.
    #[error("Quantity {requested} is over the per-line limit of {max}")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was attempted on an empty cart.
    #[error("Cannot submit an order from an empty cart")]
    EmptyCart,

    /// A volume tier table is not a proper step function.
    #[error("Invalid volume schedule: {reason}")]
    InvalidVolumeSchedule { reason: String },

    /// Input rejected at the session boundary.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Problems with a single field of a cart line, product or address.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value outside `min..=max`.
    #[error("{field} must be in {min}..={max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two bulk tiers with the same minimum, for instance.
    #[error("{field} {value} appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of a pricing-rule operation.
pub type CoreResult<T> = Result<T, CoreError>;
