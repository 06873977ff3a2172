use serde::Deserialize;

use crate::{
    error::ToolError,
    interpreter::value::repr::format_real,
    tools::{
        core::{Tool, decode_arguments},
        retail::{
            core::{InventoryItem, format_money},
            pricing::{Assumptions, PriceSuggestion},
        },
    },
};

/// Title line of every report.
pub const REPORT_TITLE: &str = "# Retail Summary Report\n";

/// Body of a report without findings.
pub const NO_FINDINGS: &str = "(No findings)";

const MAX_TOP_SKUS: usize = 10;
const MAX_TOP_CATEGORIES: usize = 10;
const MAX_LOW_STOCK: usize = 15;
const MAX_PRICING: usize = 10;

/// Sales totals of a period.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Totals {
    /// Number of distinct orders.
    pub orders:  Option<i64>,
    /// Units sold.
    pub units:   Option<i64>,
    /// Revenue.
    #[serde(default)]
    pub revenue: f64,
}

/// One line of a top-sellers ranking, by SKU or by category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RankedLine {
    /// The SKU or category.
    #[serde(alias = "sku", alias = "category")]
    pub name:     String,
    /// Revenue.
    #[serde(default)]
    pub revenue:  f64,
    /// Units sold.
    #[serde(default)]
    pub quantity: f64,
}

/// Everything a report can show. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Findings {
    /// Sales totals.
    #[serde(default)]
    pub totals:         Option<Totals>,
    /// Best-selling SKUs.
    #[serde(default)]
    pub top_skus:       Vec<RankedLine>,
    /// Best-selling categories.
    #[serde(default)]
    pub top_categories: Vec<RankedLine>,
    /// Items at or below their reorder point.
    #[serde(default)]
    pub low_stock:      Vec<InventoryItem>,
    /// Price suggestions.
    #[serde(default)]
    pub pricing:        Vec<PriceSuggestion>,
    /// The model behind the price suggestions.
    #[serde(default)]
    pub assumptions:    Option<Assumptions>,
}

/// Renders findings as a markdown report.
///
/// Sections appear in a fixed order and only when they have content; long
/// lists are cut to their first entries. A report with no sections says
/// [`NO_FINDINGS`].
///
/// # Example
/// ```
/// use calcguard::tools::retail::report::{Findings, render_report};
///
/// assert_eq!(render_report(&Findings::default()), "# Retail Summary Report\n\n(No findings)");
/// ```
#[must_use]
pub fn render_report(findings: &Findings) -> String {
    let mut md = vec![REPORT_TITLE.to_string()];

    if let Some(totals) = &findings.totals {
        md.push("## Overview".to_string());
        md.push(format!("- Orders: {}", shown(totals.orders)));
        md.push(format!("- Units: {}", shown(totals.units)));
        md.push(format!("- Revenue: {}", format_money(totals.revenue)));
        md.push(String::new());
    }

    ranking(&mut md, "## Top SKUs", &findings.top_skus, MAX_TOP_SKUS);
    ranking(&mut md, "## Top Categories", &findings.top_categories, MAX_TOP_CATEGORIES);

    if !findings.low_stock.is_empty() {
        md.push("## Low Stock Alerts".to_string());
        md.extend(findings.low_stock.iter().take(MAX_LOW_STOCK).map(|item| {
                      format!("- {} (on_hand={}, ROP={})",
                              item.sku,
                              shown(item.on_hand),
                              shown(item.reorder_point))
                  }));
        md.push(String::new());
    }

    if !findings.pricing.is_empty() {
        md.push("## Pricing Suggestions".to_string());
        md.extend(findings.pricing.iter().take(MAX_PRICING).map(|s| {
                      format!("- {}: {} -> {} | ΔRev={}",
                              s.sku,
                              format_real(s.current_price),
                              format_real(s.suggested_price),
                              format_money(s.delta))
                  }));
        if let Some(assumptions) = &findings.assumptions {
            md.push(format!("Assumptions: elasticity={} within {}",
                            format_real(assumptions.elasticity),
                            assumptions.band));
        }
        md.push(String::new());
    }

    if md.len() == 1 {
        md.push(NO_FINDINGS.to_string());
    }
    md.join("\n")
}

fn ranking(md: &mut Vec<String>, heading: &str, lines: &[RankedLine], limit: usize) {
    if lines.is_empty() {
        return;
    }
    md.push(heading.to_string());
    md.extend(lines.iter().take(limit).map(|line| {
                  format!("- {}: {} | units={:.0}",
                          line.name,
                          format_money(line.revenue),
                          line.quantity.trunc())
              }));
    md.push(String::new());
}

fn shown(count: Option<i64>) -> String {
    count.map_or_else(|| "n/a".to_string(), |n| n.to_string())
}

/// The `retail_markdown_report` tool.
///
/// Takes the findings gathered by the other retail tools (`totals`,
/// `top_skus`, `top_categories`, `low_stock`, `pricing`, `assumptions`) and
/// answers with a markdown report.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReport;

impl Tool for MarkdownReport {
    fn name(&self) -> &'static str {
        "retail_markdown_report"
    }

    fn description(&self) -> &'static str {
        "Build a markdown report from gathered findings. Input keys can include totals, top_skus, \
         top_categories, low_stock, pricing and assumptions."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "totals": { "type": "object" },
                "top_skus": { "type": "array", "items": { "type": "object" } },
                "top_categories": { "type": "array", "items": { "type": "object" } },
                "low_stock": { "type": "array", "items": { "type": "object" } },
                "pricing": { "type": "array", "items": { "type": "object" } },
                "assumptions": { "type": "object" }
            }
        })
    }

    fn call(&self, arguments: &str) -> Result<String, ToolError> {
        let findings: Findings = decode_arguments(self.name(), arguments)?;
        Ok(render_report(&findings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_render_in_order() {
        let report = MarkdownReport.call(r#"{
            "totals": {"orders": 12, "units": 40, "revenue": 1234.5},
            "top_skus": [{"sku": "SKU-1", "revenue": 300, "quantity": 6.0}],
            "top_categories": [{"category": "Kitchen", "revenue": 800.25, "quantity": 21}],
            "low_stock": [{"sku": "SKU-9", "on_hand": 1, "reorder_point": 4}],
            "pricing": [{"sku": "SKU-1", "current_price": 20.0, "suggested_price": 18.0, "delta": 2.13}],
            "assumptions": {"elasticity": -1.2, "band": "+/-10%"}
        }"#)
                                   .unwrap();

        assert_eq!(report,
                   "# Retail Summary Report\n\n\
                    ## Overview\n- Orders: 12\n- Units: 40\n- Revenue: $1,234.50\n\n\
                    ## Top SKUs\n- SKU-1: $300.00 | units=6\n\n\
                    ## Top Categories\n- Kitchen: $800.25 | units=21\n\n\
                    ## Low Stock Alerts\n- SKU-9 (on_hand=1, ROP=4)\n\n\
                    ## Pricing Suggestions\n- SKU-1: 20.0 -> 18.0 | ΔRev=$2.13\n\
                    Assumptions: elasticity=-1.2 within +/-10%\n");
    }

    #[test]
    fn long_sections_are_capped() {
        let low_stock = (0..20).map(|i| InventoryItem { sku: format!("SKU-{i}"),
                                                        on_hand: Some(0),
                                                        reorder_point: Some(1),
                                                        ..InventoryItem::default() })
                               .collect();
        let top_skus = (0..12).map(|i| RankedLine { name: format!("SKU-{i}"),
                                                    ..RankedLine::default() })
                              .collect();
        let report = render_report(&Findings { low_stock,
                                               top_skus,
                                               ..Findings::default() });

        assert_eq!(report.matches("ROP=").count(), 15);
        assert_eq!(report.matches("units=").count(), 10);
    }

    #[test]
    fn empty_findings_say_so() {
        assert_eq!(MarkdownReport.call("").unwrap(), format!("{REPORT_TITLE}\n{NO_FINDINGS}"));
        assert_eq!(MarkdownReport.call(r#"{"top_skus": [], "pricing": []}"#).unwrap(),
                   format!("{REPORT_TITLE}\n{NO_FINDINGS}"));
    }

    #[test]
    fn assumptions_need_pricing() {
        let report = MarkdownReport.call(r#"{"assumptions": {"elasticity": -1.2, "band": "+/-10%"}}"#)
                                   .unwrap();
        assert!(!report.contains("Assumptions"));
    }
}
