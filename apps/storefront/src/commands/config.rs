//! # Config Commands
//!
//! Read access to the storefront configuration.

use serde::Serialize;
use tracing::debug;

use harvest_core::{ShippingPolicy, VolumeStep};

use crate::state::StorefrontConfig;

/// What a storefront client needs to render prices and tier hints.
///
/// The settings structs keep their snake_case TOML keys; this is the
/// camelCase view sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    pub max_cart_lines: usize,
    pub max_line_quantity: i64,
    pub volume_tiers: Vec<VolumeStepResponse>,
    pub shipping: ShippingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStepResponse {
    pub min_items: i64,
    pub percent_bps: u32,
}

impl From<&VolumeStep> for VolumeStepResponse {
    fn from(step: &VolumeStep) -> Self {
        VolumeStepResponse {
            min_items: step.min_items,
            percent_bps: step.percent_bps,
        }
    }
}

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Client startup (store name, currency formatting)
/// - Cart drawer ("add N more for X% off")
pub fn get_config(config: &StorefrontConfig) -> ConfigResponse {
    debug!("get_config command");

    ConfigResponse {
        store_name: config.store.name.clone(),
        currency_code: config.store.currency_code.clone(),
        currency_symbol: config.store.currency_symbol.clone(),
        max_cart_lines: config.limits.max_cart_lines,
        max_line_quantity: config.limits.max_line_quantity,
        volume_tiers: config
            .pricing
            .volume_tiers
            .iter()
            .map(VolumeStepResponse::from)
            .collect(),
        shipping: config.shipping_policy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_shape() {
        let mut config = StorefrontConfig::default();
        config.shipping.flat_rate_cents = 995;

        let json = serde_json::to_value(get_config(&config)).unwrap();
        assert_eq!(json["currencyCode"], "USD");
        assert_eq!(json["maxCartLines"], 250);
        assert_eq!(json["maxLineQuantity"], 10_000);
        assert_eq!(json["volumeTiers"].as_array().unwrap().len(), 4);
        assert_eq!(json["volumeTiers"][3]["minItems"], 60);
        assert_eq!(json["volumeTiers"][3]["percentBps"], 2500);
        assert_eq!(json["shipping"]["flatRate"], 995);
        assert!(json["shipping"]["freeThreshold"].is_null());

        // No snake_case keys leak from the TOML settings structs
        let text = json.to_string();
        assert!(!text.contains("currency_code"));
        assert!(!text.contains("percent_bps"));
    }
}
