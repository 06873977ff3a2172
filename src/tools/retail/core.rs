use serde::{Deserialize, Serialize};

/// Reply of the retail tools when they are given no inventory.
pub const NO_INVENTORY_DATA: &str = r#"{"error":"no_inventory_data"}"#;

/// One stock-keeping unit.
///
/// Fields not named here are kept as they are, so a record passes through
/// the tools unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// The stock-keeping unit code.
    pub sku:            String,
    /// Units in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_hand:        Option<i64>,
    /// Stock level at which the item is reordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_point:  Option<i64>,
    /// Current selling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price:     Option<f64>,
    /// Typical units sold per day at the current price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_units: Option<f64>,
    /// Any other fields of the record.
    #[serde(flatten)]
    pub extra:          serde_json::Map<String, serde_json::Value>,
}

impl InventoryItem {
    /// Returns `true` when stock is at or below the reorder point.
    ///
    /// An item missing either count is never low.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        matches!((self.on_hand, self.reorder_point), (Some(on_hand), Some(reorder_point)) if on_hand <= reorder_point)
    }
}

/// Formats an amount of money with two decimals and thousands separators.
///
/// # Example
/// ```
/// use calcguard::tools::retail::core::format_money;
///
/// assert_eq!(format_money(1_234_567.891), "$1,234,567.89");
/// assert_eq!(format_money(999.999), "$1,000.00");
/// assert_eq!(format_money(-5.0), "$-5.00");
/// ```
#[must_use]
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let text = format!("{:.2}", amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("${sign}{grouped}.{cents}")
}
