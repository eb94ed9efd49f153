//! JSON output formatting.

use anyhow::Result;
use marketcart_core::{CartEntry, CartState};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the whole cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOutput<'a> {
    pub products: &'a [CartEntry],
    pub lines: usize,
    pub total_quantity: u64,
}

/// JSON output for a single mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutput {
    pub action: String,
    pub id: String,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl MutationOutput {
    /// Creates a mutation result.
    pub fn new(action: &str, id: &str, changed: bool, quantity: Option<u32>) -> Self {
        Self {
            action: action.to_string(),
            id: id.to_string(),
            changed,
            quantity,
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the cart.
    pub fn format_cart(&self, state: &CartState) -> Result<String> {
        self.format(&CartOutput {
            products: state.entries(),
            lines: state.len(),
            total_quantity: state.total_quantity(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
