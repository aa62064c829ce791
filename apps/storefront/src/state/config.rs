//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment Variables (highest priority)                           │
//! │     HARVEST_STORE_NAME, HARVEST_MAX_LINE_QUANTITY, ...                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/harvest-storefront/storefront.toml (Linux)               │
//! │     ~/Library/Application Support/com.harvest.storefront/ (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Valley Fresh Wholesale"
//! currency_code = "USD"
//! currency_symbol = "$"
//!
//! [limits]
//! max_cart_lines = 250
//! max_line_quantity = 10000
//!
//! [pricing]
//! volume_tiers = [
//!   { min_items = 0,  percent_bps = 0 },
//!   { min_items = 20, percent_bps = 1000 },
//!   { min_items = 40, percent_bps = 1500 },
//!   { min_items = 60, percent_bps = 2500 },
//! ]
//!
//! [shipping]
//! flat_rate_cents = 1500
//! free_shipping_threshold_cents = 25000
//! ```
//!
//! Read-only after startup, so no lock around it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use harvest_core::{
    Money, ShippingPolicy, VolumeSchedule, VolumeStep, MAX_CART_LINES, MAX_LINE_QUANTITY,
    MAX_UNIT_PRICE_CENTS,
};

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Sections
// =============================================================================

/// Store identity and currency display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Harvest Storefront".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Cart size guards applied by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSettings {
    #[serde(default = "default_max_cart_lines")]
    pub max_cart_lines: usize,

    #[serde(default = "default_max_line_quantity")]
    pub max_line_quantity: i64,
}

fn default_max_cart_lines() -> usize {
    MAX_CART_LINES
}

fn default_max_line_quantity() -> i64 {
    MAX_LINE_QUANTITY
}

impl Default for LimitSettings {
    fn default() -> Self {
        LimitSettings {
            max_cart_lines: default_max_cart_lines(),
            max_line_quantity: default_max_line_quantity(),
        }
    }
}

/// Order-wide volume discount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_volume_tiers")]
    pub volume_tiers: Vec<VolumeStep>,
}

fn default_volume_tiers() -> Vec<VolumeStep> {
    VolumeSchedule::standard().steps().to_vec()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            volume_tiers: default_volume_tiers(),
        }
    }
}

/// Delivery charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSettings {
    #[serde(default)]
    pub flat_rate_cents: i64,

    #[serde(default)]
    pub free_shipping_threshold_cents: Option<i64>,
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub limits: LimitSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub shipping: ShippingSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.limits.max_cart_lines == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_cart_lines must be greater than 0".into(),
            ));
        }

        if self.limits.max_line_quantity <= 0 {
            return Err(ConfigError::Invalid(
                "limits.max_line_quantity must be greater than 0".into(),
            ));
        }

        // Largest subtotal the limits allow must fit in i64 cents.
        let max_order_cents = i64::try_from(self.limits.max_cart_lines)
            .ok()
            .and_then(|lines| lines.checked_mul(self.limits.max_line_quantity))
            .and_then(|units| units.checked_mul(MAX_UNIT_PRICE_CENTS));
        if max_order_cents.is_none() {
            return Err(ConfigError::Invalid(
                "limits.max_cart_lines * limits.max_line_quantity is too large to price".into(),
            ));
        }

        if !(0..=MAX_UNIT_PRICE_CENTS).contains(&self.shipping.flat_rate_cents) {
            return Err(ConfigError::Invalid(format!(
                "shipping.flat_rate_cents must be in 0..={}",
                MAX_UNIT_PRICE_CENTS
            )));
        }

        if matches!(self.shipping.free_shipping_threshold_cents, Some(t) if t < 0) {
            return Err(ConfigError::Invalid(
                "shipping.free_shipping_threshold_cents must not be negative".into(),
            ));
        }

        self.volume_schedule()?;
        Ok(())
    }

    /// Applies `HARVEST_*` overrides read through `lookup`.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("HARVEST_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(code) = lookup("HARVEST_CURRENCY_CODE") {
            self.store.currency_code = code;
        }

        if let Some(value) = lookup("HARVEST_MAX_CART_LINES") {
            match value.parse::<usize>() {
                Ok(v) => self.limits.max_cart_lines = v,
                Err(_) => warn!(value = %value, "Ignoring invalid HARVEST_MAX_CART_LINES"),
            }
        }

        if let Some(value) = lookup("HARVEST_MAX_LINE_QUANTITY") {
            match value.parse::<i64>() {
                Ok(v) => self.limits.max_line_quantity = v,
                Err(_) => warn!(value = %value, "Ignoring invalid HARVEST_MAX_LINE_QUANTITY"),
            }
        }

        if let Some(value) = lookup("HARVEST_FLAT_SHIPPING_CENTS") {
            match value.parse::<i64>() {
                Ok(v) => self.shipping.flat_rate_cents = v,
                Err(_) => warn!(value = %value, "Ignoring invalid HARVEST_FLAT_SHIPPING_CENTS"),
            }
        }

        if let Some(value) = lookup("HARVEST_FREE_SHIPPING_THRESHOLD_CENTS") {
            match value.parse::<i64>() {
                Ok(v) => self.shipping.free_shipping_threshold_cents = Some(v),
                Err(_) => warn!(
                    value = %value,
                    "Ignoring invalid HARVEST_FREE_SHIPPING_THRESHOLD_CENTS"
                ),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "harvest", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured volume table as a checked schedule.
    pub fn volume_schedule(&self) -> ConfigResult<VolumeSchedule> {
        Ok(VolumeSchedule::new(self.pricing.volume_tiers.clone())?)
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy {
            flat_rate: Money::from_cents(self.shipping.flat_rate_cents),
            free_threshold: self.shipping.free_shipping_threshold_cents.map(Money::from_cents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::Percent;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.limits.max_line_quantity, MAX_LINE_QUANTITY);
        assert_eq!(config.volume_schedule().unwrap(), VolumeSchedule::standard());
        assert_eq!(config.shipping_policy(), ShippingPolicy::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            r#"
[store]
name = "Valley Fresh Wholesale"

[pricing]
volume_tiers = [
  { min_items = 0, percent_bps = 0 },
  { min_items = 100, percent_bps = 3000 },
]

[shipping]
flat_rate_cents = 1500
free_shipping_threshold_cents = 25000
"#,
        )
        .unwrap();

        let config = StorefrontConfig::load(Some(path)).unwrap();
        assert_eq!(config.store.name, "Valley Fresh Wholesale");
        assert_eq!(config.store.currency_code, "USD");
        assert_eq!(config.limits, LimitSettings::default());

        let schedule = config.volume_schedule().unwrap();
        assert_eq!(schedule.tier_for(100).percent(), Percent::from_whole(30));

        let policy = config.shipping_policy();
        assert_eq!(policy.cost_for(Money::from_cents(100)).cents(), 1500);
        assert_eq!(policy.cost_for(Money::from_cents(25000)), Money::zero());
    }

    #[test]
    fn test_load_rejects_bad_volume_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            "[pricing]\nvolume_tiers = [{ min_items = 10, percent_bps = 500 }]\n",
        )
        .unwrap();

        assert!(StorefrontConfig::load(Some(path.clone())).is_err());
        assert_eq!(
            StorefrontConfig::load_or_default(Some(path)),
            StorefrontConfig::default()
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.store, StoreSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.toml");

        let mut config = StorefrontConfig::default();
        config.shipping.flat_rate_cents = 900;
        config.save(Some(path.clone())).unwrap();

        let loaded = StorefrontConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.shipping.flat_rate_cents, 900);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("HARVEST_STORE_NAME", "Dock Sales"),
            ("HARVEST_MAX_LINE_QUANTITY", "500"),
            ("HARVEST_MAX_CART_LINES", "not-a-number"),
            ("HARVEST_FREE_SHIPPING_THRESHOLD_CENTS", "10000"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "Dock Sales");
        assert_eq!(config.limits.max_line_quantity, 500);
        assert_eq!(config.limits.max_cart_lines, MAX_CART_LINES);
        assert_eq!(config.shipping.free_shipping_threshold_cents, Some(10000));
    }

    #[test]
    fn test_validation() {
        let mut config = StorefrontConfig::default();
        config.limits.max_line_quantity = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.store.name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.shipping.flat_rate_cents = -1;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.limits.max_line_quantity = i64::MAX / 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_free_shipping_threshold_rejected() {
        let mut config = StorefrontConfig::default();
        config.shipping.free_shipping_threshold_cents = Some(-500);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.shipping.free_shipping_threshold_cents = Some(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_negative_threshold_from_env() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| {
            (key == "HARVEST_FREE_SHIPPING_THRESHOLD_CENTS").then(|| "-1".to_string())
        });
        assert_eq!(config.shipping.free_shipping_threshold_cents, Some(-1));
        assert!(config.validate().is_err());
    }
}
