//! # API Error Type
//!
//! Unified error type for storefront commands, plus the errors of the
//! pieces that sit around the cart (config loading, order handoff).
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function  ──► Result<T, ApiError>                              │
//! │        │                                                                │
//! │        ├── ValidationError / CoreError ──────────┐                      │
//! │        ├── ConfigError ──────────────────────────┼──► ApiError ──► JSON │
//! │        └── OrderSinkError ───────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers receive both a machine-readable `code` and a human `message`:
//! ```json
//! { "code": "VALIDATION_ERROR", "message": "quantity must be positive" }
//! ```

use serde::Serialize;
use thiserror::Error;

use harvest_core::CoreError;

/// API error returned from storefront commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed (limits, empty cart)
    CartError,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Order submission service rejected or failed the order
    OrderError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartTooLarge { .. } | CoreError::EmptyCart => ApiError::cart(err.to_string()),
            CoreError::QuantityTooLarge { .. } => ApiError::validation(err.to_string()),
            CoreError::InvalidVolumeSchedule { .. } => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<harvest_core::ValidationError> for ApiError {
    fn from(err: harvest_core::ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<OrderSinkError> for ApiError {
    fn from(err: OrderSinkError) -> Self {
        match err {
            OrderSinkError::Io(e) => {
                // Log the real error, return a generic message
                tracing::error!("Order handoff I/O failed: {}", e);
                ApiError::new(ErrorCode::OrderError, "Order could not be delivered")
            }
            other => ApiError::new(ErrorCode::OrderError, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Config Error
// =============================================================================

/// Errors while loading or validating `storefront.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Pricing(#[from] CoreError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Order Sink Error
// =============================================================================

/// Failures reported by an order submission sink.
#[derive(Debug, Error)]
pub enum OrderSinkError {
    /// The service answered and refused the order.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),

    #[error("Order handoff failed: {0}")]
    Io(#[from] std::io::Error),
}
