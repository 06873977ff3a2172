/// Inventory records and money formatting shared by the retail tools.
pub mod core;

/// The `retail_inventory_status` tool.
///
/// Lists the items whose stock is at or below their reorder point.
pub mod inventory;

/// The `retail_price_optimize` tool.
///
/// Searches a band of prices around the current one for the best revenue
/// under a constant-elasticity demand model.
pub mod pricing;

/// The `retail_markdown_report` tool.
pub mod report;
