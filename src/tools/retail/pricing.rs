use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::ToolError,
    interpreter::evaluator::function::round::round_real,
    tools::{
        core::{Tool, decode_arguments},
        retail::core::{InventoryItem, NO_INVENTORY_DATA},
    },
};

/// Price elasticity of demand assumed when the caller gives none.
pub const DEFAULT_ELASTICITY: f64 = -1.2;

/// Units sold per day assumed for items without a baseline.
pub const DEFAULT_BASELINE_UNITS: f64 = 5.0;

/// Candidate prices lie within this fraction of the current price.
pub const PRICE_BAND: f64 = 0.1;

/// Number of evenly spaced candidate prices, both band edges included.
pub const GRID_POINTS: u32 = 21;

/// Items priced when the caller selects none: the most expensive ones.
const DEFAULT_SELECTION: usize = 5;

/// The outcome of optimizing the price of one item.
///
/// Money amounts other than the current price are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    /// The item.
    pub sku:               String,
    /// The price the search started from.
    pub current_price:     f64,
    /// The candidate price with the highest expected revenue.
    pub suggested_price:   f64,
    /// Expected revenue at the current price.
    #[serde(default)]
    pub revenue_baseline:  f64,
    /// Expected revenue at the suggested price.
    #[serde(default)]
    pub revenue_suggested: f64,
    /// Suggested minus baseline revenue.
    pub delta:             f64,
}

/// The model behind a set of suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// The price elasticity of demand.
    pub elasticity: f64,
    /// The searched band, e.g. `+/-10%`.
    pub band:       String,
}

/// Finds the revenue-maximizing price within [`PRICE_BAND`] of `price`.
///
/// Demand follows `q = q0 * (p / p0)^elasticity`. The candidates are
/// [`GRID_POINTS`] evenly spaced prices; the current price is kept unless a
/// candidate earns strictly more.
///
/// # Parameters
/// - `sku`: The item.
/// - `price`: The current price `p0`.
/// - `baseline_units`: Units sold at the current price, `q0`.
/// - `elasticity`: Price elasticity of demand.
///
/// # Example
/// ```
/// use calcguard::tools::retail::pricing::suggest_price;
///
/// // Elastic demand: the lowest price in the band wins.
/// let suggestion = suggest_price("SKU-1", 20.0, 5.0, -1.2);
/// assert_eq!(suggestion.suggested_price, 18.0);
/// assert_eq!(suggestion.revenue_suggested, 102.13);
/// assert_eq!(suggestion.delta, 2.13);
/// ```
#[must_use]
pub fn suggest_price(sku: &str, price: f64, baseline_units: f64, elasticity: f64) -> PriceSuggestion {
    let revenue_at = |candidate: f64| candidate * baseline_units * (candidate / price).powf(elasticity);

    let (low, high) = (price * (1.0 - PRICE_BAND), price * (1.0 + PRICE_BAND));
    let step = (high - low) / f64::from(GRID_POINTS - 1);
    let baseline = price * baseline_units;

    let mut best = (price, baseline);
    for i in 0..GRID_POINTS {
        let candidate = if i == GRID_POINTS - 1 { high } else { low + step * f64::from(i) };
        let revenue = revenue_at(candidate);
        if revenue > best.1 {
            best = (candidate, revenue);
        }
    }

    PriceSuggestion { sku:               sku.to_string(),
                      current_price:     price,
                      suggested_price:   round_real(best.0, 2),
                      revenue_baseline:  round_real(baseline, 2),
                      revenue_suggested: round_real(best.1, 2),
                      delta:             round_real(best.1 - baseline, 2), }
}

fn default_elasticity() -> f64 {
    DEFAULT_ELASTICITY
}

#[derive(Debug, Deserialize)]
struct PricingArgs {
    #[serde(default)]
    items:      Vec<InventoryItem>,
    #[serde(default)]
    skus:       Vec<String>,
    #[serde(default = "default_elasticity")]
    elasticity: f64,
}

/// The `retail_price_optimize` tool.
///
/// Takes `{"items": [...], "skus": [...], "elasticity": -1.2}`. Only items
/// with a `unit_price` are priced. Without `skus`, the five most expensive
/// items are chosen. Each item's `baseline_units` gives `q0`, at least `1`,
/// and defaults to [`DEFAULT_BASELINE_UNITS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceOptimizer;

impl Tool for PriceOptimizer {
    fn name(&self) -> &'static str {
        "retail_price_optimize"
    }

    fn description(&self) -> &'static str {
        "Suggest a price within +/-10% that maximizes revenue using a constant price elasticity. \
         Returns JSON with the suggested price and expected revenue delta per SKU."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "description": "inventory records with sku, unit_price and optional baseline_units",
                    "items": { "type": "object" }
                },
                "skus": {
                    "type": "array",
                    "description": "SKUs to price; defaults to the five most expensive items",
                    "items": { "type": "string" }
                },
                "elasticity": {
                    "type": "number",
                    "description": "price elasticity of demand, default -1.2"
                }
            },
            "required": ["items"]
        })
    }

    fn call(&self, arguments: &str) -> Result<String, ToolError> {
        let args: PricingArgs = decode_arguments(self.name(), arguments)?;
        if args.items.is_empty() {
            return Ok(NO_INVENTORY_DATA.to_string());
        }

        let selected: HashSet<&str> = if args.skus.is_empty() {
            most_expensive(&args.items, DEFAULT_SELECTION)
        } else {
            args.skus.iter().map(String::as_str).collect()
        };

        let pricing: Vec<PriceSuggestion> =
            args.items
                .iter()
                .filter(|item| selected.contains(item.sku.as_str()))
                .filter_map(|item| {
                    let price = item.unit_price?;
                    let units = item.baseline_units.map_or(DEFAULT_BASELINE_UNITS, |units| units.max(1.0));
                    Some(suggest_price(&item.sku, price, units, args.elasticity))
                })
                .collect();
        debug!("priced {} item(s) at elasticity {}", pricing.len(), args.elasticity);

        let assumptions = Assumptions { elasticity: args.elasticity,
                                        band:       format!("+/-{:.0}%", PRICE_BAND * 100.0), };
        Ok(serde_json::json!({ "pricing": pricing, "assumptions": assumptions }).to_string())
    }
}

/// The SKUs of the `count` highest-priced items; ties keep inventory order.
fn most_expensive(items: &[InventoryItem], count: usize) -> HashSet<&str> {
    let mut priced: Vec<(&str, f64)> = items.iter()
                                            .filter_map(|item| Some((item.sku.as_str(), item.unit_price?)))
                                            .collect();
    priced.sort_by(|a, b| b.1.total_cmp(&a.1));
    priced.into_iter().take(count).map(|(sku, _)| sku).collect()
}
