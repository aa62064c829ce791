//! # Cart Scripts
//!
//! A script is a JSON array of cart actions, replayed in order against one
//! cart session. Each action produces one JSON line on the output.
//!
//! ```json
//! [
//!   { "action": "add", "id": "p1", "name": "Roma Tomatoes", "unitPriceCents": 1000, "quantity": 25,
//!     "bulkDiscounts": [{ "minQuantity": 20, "discountBps": 500 }] },
//!   { "action": "set_quantity", "id": "p1", "quantity": 40 },
//!   { "action": "show" },
//!   { "action": "checkout", "billingAddress": { "name": "Corner Bistro", "street": "12 Market St",
//!     "city": "Springfield", "postalCode": "62701" } }
//! ]
//! ```
//!
//! A failing action is reported on its own line and the script continues.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use harvest_core::{CartLine, OrderSubmission, ProductRecord};

use crate::commands::cart::{
    add_product_to_cart, add_to_cart, clear_cart, get_cart, remove_from_cart, update_cart_item,
};
use crate::commands::config::get_config;
use crate::commands::order::{submit_order, CheckoutRequest, OrderReceipt, OrderSink};
use crate::error::{ApiError, OrderSinkError};
use crate::state::{CartState, StorefrontConfig};

/// One step of a cart script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Add(CartLine),
    AddProduct {
        product: ProductRecord,
        #[serde(default)]
        quantity: Option<i64>,
    },
    SetQuantity {
        id: String,
        quantity: i64,
    },
    Remove {
        id: String,
    },
    Clear,
    Show,
    Config,
    Checkout(CheckoutRequest),
}

impl ScriptAction {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptAction::Add(_) => "add",
            ScriptAction::AddProduct { .. } => "add_product",
            ScriptAction::SetQuantity { .. } => "set_quantity",
            ScriptAction::Remove { .. } => "remove",
            ScriptAction::Clear => "clear",
            ScriptAction::Show => "show",
            ScriptAction::Config => "config",
            ScriptAction::Checkout(_) => "checkout",
        }
    }
}

/// Output line for one executed action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutput {
    pub step: usize,
    pub action: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Counts reported when a script finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Parses a script document.
pub fn parse_script(input: &str) -> Result<Vec<ScriptAction>, ApiError> {
    serde_json::from_str(input).map_err(|e| ApiError::validation(format!("Invalid script: {}", e)))
}

/// Runs `actions` against one cart session, writing a JSON line per action.
///
/// ## Errors
/// Only failures to write `out` abort the run.
pub fn run_script<S, W>(
    actions: Vec<ScriptAction>,
    cart: &CartState,
    config: &StorefrontConfig,
    sink: &mut S,
    out: &mut W,
) -> Result<ScriptSummary, ApiError>
where
    S: OrderSink + ?Sized,
    W: Write,
{
    let mut summary = ScriptSummary::default();

    for (index, action) in actions.into_iter().enumerate() {
        let step = index + 1;
        let name = action.name();
        debug!(step = step, action = name, "Running script action");

        let output = match execute(action, cart, config, sink) {
            Ok(result) => {
                summary.succeeded += 1;
                StepOutput {
                    step,
                    action: name,
                    result: Some(result),
                    error: None,
                }
            }
            Err(error) => {
                summary.failed += 1;
                StepOutput {
                    step,
                    action: name,
                    result: None,
                    error: Some(error),
                }
            }
        };

        serde_json::to_writer(&mut *out, &output)
            .map_err(|e| ApiError::internal(format!("Failed to write output: {}", e)))?;
        writeln!(out).map_err(|e| ApiError::internal(format!("Failed to write output: {}", e)))?;
    }

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Script finished"
    );
    Ok(summary)
}

fn execute<S>(
    action: ScriptAction,
    cart: &CartState,
    config: &StorefrontConfig,
    sink: &mut S,
) -> Result<serde_json::Value, ApiError>
where
    S: OrderSink + ?Sized,
{
    match action {
        ScriptAction::Add(line) => to_value(add_to_cart(cart, config, line)?),
        ScriptAction::AddProduct { product, quantity } => {
            to_value(add_product_to_cart(cart, config, &product, quantity)?)
        }
        ScriptAction::SetQuantity { id, quantity } => {
            to_value(update_cart_item(cart, config, &id, quantity)?)
        }
        ScriptAction::Remove { id } => to_value(remove_from_cart(cart, &id)),
        ScriptAction::Clear => to_value(clear_cart(cart)),
        ScriptAction::Show => to_value(get_cart(cart)),
        ScriptAction::Config => to_value(get_config(config)),
        ScriptAction::Checkout(request) => to_value(submit_order(cart, config, sink, request)?),
    }
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

// =============================================================================
// Order Outbox
// =============================================================================

/// Order sink that appends each submission as one JSON line to a writer.
///
/// The CLI points it at an outbox file; whatever delivers orders to the
/// order submission service picks them up from there.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OrderSink for JsonLinesSink<W> {
    fn submit(&mut self, order: &OrderSubmission) -> Result<OrderReceipt, OrderSinkError> {
        serde_json::to_writer(&mut self.writer, order).map_err(std::io::Error::from)?;
        writeln!(self.writer)?;
        self.writer.flush()?;

        Ok(OrderReceipt {
            order_id: order.id.clone(),
            reference: None,
        })
    }
}
