use log::debug;
use serde::Deserialize;

use crate::{
    error::ToolError,
    tools::{
        core::{Tool, decode_arguments},
        retail::core::{InventoryItem, NO_INVENTORY_DATA},
    },
};

#[derive(Debug, Deserialize)]
struct InventoryArgs {
    #[serde(default)]
    items: Vec<InventoryItem>,
}

/// The `retail_inventory_status` tool.
///
/// Takes `{"items": [...]}` and answers with a JSON object holding the
/// low-stock records, the number of items and the number of low-stock items.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryStatus;

impl Tool for InventoryStatus {
    fn name(&self) -> &'static str {
        "retail_inventory_status"
    }

    fn description(&self) -> &'static str {
        "Return the low-stock items (on_hand <= reorder_point) of an inventory. Returns JSON."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "description": "inventory records with sku, on_hand and reorder_point",
                    "items": { "type": "object" }
                }
            },
            "required": ["items"]
        })
    }

    fn call(&self, arguments: &str) -> Result<String, ToolError> {
        let args: InventoryArgs = decode_arguments(self.name(), arguments)?;
        if args.items.is_empty() {
            return Ok(NO_INVENTORY_DATA.to_string());
        }

        let low_stock: Vec<&InventoryItem> = args.items.iter().filter(|item| item.is_low_stock()).collect();
        let (low_count, total_skus) = (low_stock.len(), args.items.len());
        debug!("{low_count} of {total_skus} items are low on stock");
        Ok(serde_json::json!({
               "low_stock": low_stock,
               "total_skus": total_skus,
               "low_count": low_count,
           }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_items_at_or_below_their_reorder_point() {
        let reply = InventoryStatus.call(r#"{"items": [
            {"sku": "A", "on_hand": 2, "reorder_point": 5},
            {"sku": "B", "on_hand": 9, "reorder_point": 5},
            {"sku": "C", "on_hand": 5, "reorder_point": 5, "name": "Kettle"}
        ]}"#)
                                   .unwrap();
        let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();

        assert_eq!(reply["total_skus"], 3);
        assert_eq!(reply["low_count"], 2);
        assert_eq!(reply["low_stock"][0]["sku"], "A");
        assert_eq!(reply["low_stock"][1]["name"], "Kettle");
    }

    #[test]
    fn empty_inventory_is_reported() {
        assert_eq!(InventoryStatus.call("{}").unwrap(), NO_INVENTORY_DATA);
    }
}
