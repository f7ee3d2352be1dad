//! # Output Rendering
//!
//! Every command result is `Serialize + Render`. With `--json` it is written
//! with `serde_json::to_string_pretty`; otherwise [`Render::render`] produces
//! plain text using the configured currency.
//!
//! Amounts are rounded for display only. The JSON output carries the exact
//! values the engine computed.

use serde::Serialize;

use crate::config::AppConfig;
use crate::error::AppResult;
use costwise_core::allocation::PortfolioAllocation;
use costwise_core::{BomLine, Category, Company, Item, OperatingCostEntry};

/// Plain-text rendering of a command result.
pub trait Render {
    fn render(&self, config: &AppConfig) -> String;
}

/// Chooses between JSON and text for one result.
#[derive(Debug, Clone, Copy)]
pub struct Output<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

impl<'a> Output<'a> {
    pub fn new(json: bool, config: &'a AppConfig) -> Self {
        Output { json, config }
    }

    pub fn emit<T: Serialize + Render>(&self, value: &T) -> AppResult<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(value.render(self.config))
        }
    }
}

/// Confirmation of an action without a richer result.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message {
            message: message.into(),
        }
    }
}

impl Render for Message {
    fn render(&self, _config: &AppConfig) -> String {
        self.message.clone()
    }
}

/// `  label:              value` line used by the detail views.
pub(crate) fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<24}{}\n", format!("{}:", label), value)
}

pub(crate) fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

// =============================================================================
// Items
// =============================================================================

impl Render for Item {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = format!("#{} {} ({})\n", self.id, self.name, self.kind);
        out.push_str(&field("Base cost", config.money(self.base_cost)));
        out.push_str(&field("Markup", self.markup));
        out.push_str(&field("Tax rate", self.tax_rate));
        out.push_str(&field("Units per package", self.units_per_package));
        out.push_str(&field("Expected units / month", self.expected_monthly_units));
        out.push_str(&field("Category", or_dash(&self.metadata.category)));
        out.push_str(&field("Company", or_dash(&self.metadata.company)));
        out.push_str(&field("Purchase link", or_dash(&self.metadata.purchase_link)));
        out.push_str(&field(
            "Last modified",
            self.updated_at.format("%Y-%m-%d %H:%M:%S"),
        ));
        out
    }
}

impl Render for Vec<Item> {
    fn render(&self, config: &AppConfig) -> String {
        if self.is_empty() {
            return "No items.".to_string();
        }

        let mut out = format!(
            "{:>5}  {:<10} {:<32} {:>12} {:>8} {:>8} {:>10}\n",
            "ID", "KIND", "NAME", "BASE COST", "MARKUP", "TAX", "UNITS/MO"
        );
        for item in self {
            out.push_str(&format!(
                "{:>5}  {:<10} {:<32} {:>12} {:>8} {:>8} {:>10}\n",
                item.id,
                item.kind.as_str(),
                item.name,
                config.money(item.base_cost),
                item.markup.to_string(),
                item.tax_rate.to_string(),
                item.expected_monthly_units
            ));
        }
        out
    }
}

// =============================================================================
// BOM lines
// =============================================================================

impl Render for BomLine {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = format!("Line #{} on item #{}: {}\n", self.id, self.parent_id, self.name);
        out.push_str(&field("Cost", config.money(self.cost)));
        if !self.description.is_empty() {
            out.push_str(&field("Derivation", &self.description));
        }
        out
    }
}

// =============================================================================
// Operating costs
// =============================================================================

impl Render for OperatingCostEntry {
    fn render(&self, config: &AppConfig) -> String {
        format!(
            "Operating cost #{}: {} {} ({})",
            self.id,
            self.name,
            config.money(self.amount),
            self.frequency
        )
    }
}

// =============================================================================
// Portfolio
// =============================================================================

impl Render for PortfolioAllocation {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = String::from("Portfolio Allocation\n");
        out.push_str(&field("Monthly operating costs", config.money(self.total_operating_costs)));
        out.push_str(&field("Total expected units", self.total_units));
        out.push_str(&field(
            "Operating cost / unit",
            config.money(self.operating_cost_per_unit()),
        ));
        out.push('\n');

        out.push_str(&format!(
            "{:>5}  {:<28} {:>8} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            "ID", "NAME", "UNITS", "SHARE %", "SHARE", "DIRECT", "PRICE", "PROFIT"
        ));
        for line in &self.items {
            out.push_str(&format!(
                "{:>5}  {:<28} {:>8} {:>8.2} {:>12} {:>12} {:>12} {:>12}\n",
                line.item_id,
                line.name,
                line.units,
                line.percentage,
                config.money(line.share),
                config.money(line.total_direct_cost),
                config.money(line.final_price),
                config.money(line.profit_per_unit)
            ));
        }
        out
    }
}

// =============================================================================
// Lookups
// =============================================================================

impl Render for Category {
    fn render(&self, _config: &AppConfig) -> String {
        format!("Category #{}: {}", self.id, self.name)
    }
}

impl Render for Vec<Category> {
    fn render(&self, _config: &AppConfig) -> String {
        if self.is_empty() {
            return "No categories.".to_string();
        }
        self.iter()
            .map(|c| match &c.description {
                Some(description) => format!("{:>5}  {}  ({})", c.id, c.name, description),
                None => format!("{:>5}  {}", c.id, c.name),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for Company {
    fn render(&self, _config: &AppConfig) -> String {
        format!("Company #{}: {}", self.id, self.name)
    }
}

impl Render for Vec<Company> {
    fn render(&self, _config: &AppConfig) -> String {
        if self.is_empty() {
            return "No companies.".to_string();
        }
        self.iter()
            .map(|c| {
                format!(
                    "{:>5}  {:<32} {:<32} {}",
                    c.id,
                    c.name,
                    or_dash(&c.website),
                    or_dash(&c.contact_info)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
