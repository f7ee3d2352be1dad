//! `costwise price <id>`
//!
//! Single-item policy: the item carries the whole monthly operating cost
//! pool, spread over its own expected monthly units.

use serde::Serialize;
use tracing::debug;

use super::item::load_item;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::report::{field, Render};
use costwise_core::pricing::{calculate_unit_price, PriceBreakdown, PriceInput};
use costwise_core::{Item, Money};
use costwise_db::Database;

/// Summary report for one item.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub item: Item,
    pub quantity: i64,
    pub monthly_operating_costs: Money,
    pub breakdown: PriceBreakdown,
    /// `profit_per_unit × expected_monthly_units`
    pub expected_monthly_profit: Money,
}

impl Render for PriceReport {
    fn render(&self, config: &AppConfig) -> String {
        let b = &self.breakdown;
        let units = self.item.expected_monthly_units;
        let mut out = format!("Summary Report: #{} {}\n", self.item.id, self.item.name);

        out.push_str("\nCost Breakdown\n");
        out.push_str(&field("Base Cost", config.money(b.base_cost)));
        out.push_str(&field("Subproducts Total", config.money(b.subproducts_cost)));
        out.push_str(&field(
            "Operating Cost per Unit",
            format!(
                "{}  ({}/month ÷ {} units)",
                config.money(b.operating_cost_per_unit),
                config.money(self.monthly_operating_costs),
                units
            ),
        ));
        out.push_str(&field("Total Direct Cost", config.money(b.total_direct_cost)));

        out.push_str("\nPricing\n");
        out.push_str(&field(
            &format!("Markup ({})", self.item.markup),
            config.money(b.markup_amount),
        ));
        out.push_str(&field("Price Before Tax", config.money(b.price_after_markup)));
        out.push_str(&field(
            &format!("Tax ({})", self.item.tax_rate),
            config.money(b.tax_amount),
        ));
        out.push_str(&field("Final Price", config.money(b.final_price_per_unit)));

        if let Some(package) = &b.package {
            out.push_str("\nPackage\n");
            out.push_str(&field("Units per Package", self.item.units_per_package));
            out.push_str(&field("Package Price", config.money(package.package_price)));
            out.push_str(&field("Cost per Unit", config.money(package.cost_per_unit)));
        }

        out.push_str("\nOperating Costs\n");
        out.push_str(&field("Monthly Operating Costs", config.money(self.monthly_operating_costs)));
        out.push_str(&field("Expected Monthly Units", units));
        out.push_str(&field("Operating Cost per Unit", config.money(b.operating_cost_per_unit)));

        out.push_str("\nProfitability\n");
        out.push_str(&field("Gross Margin", format!("{:.2}%", b.gross_margin_percent)));
        out.push_str(&field("Profit per Unit", config.money(b.profit_per_unit)));
        out.push_str(&field(
            &format!("Expected monthly profit ({} units)", units),
            config.money(self.expected_monthly_profit),
        ));

        if self.quantity != 1 {
            out.push_str("\nOrder\n");
            out.push_str(&field("Quantity", self.quantity));
            out.push_str(&field("Total Price", config.money(b.total_price)));
            out.push_str(&field("Total Profit", config.money(b.total_profit)));
        }

        out
    }
}

pub async fn price(db: &Database, id: i64, quantity: i64) -> AppResult<PriceReport> {
    let item = load_item(db, id).await?;
    let subproducts_cost = db.bom().total_for_parent(id).await?;
    let monthly_operating_costs = db.operating_costs().monthly_total().await?;

    let input = PriceInput::for_item(&item, subproducts_cost, monthly_operating_costs, quantity);
    let breakdown = calculate_unit_price(&input);
    debug!(id, final_price = %breakdown.final_price_per_unit, "Item priced");

    Ok(PriceReport {
        expected_monthly_profit: breakdown.profit_per_unit * item.expected_monthly_units,
        item,
        quantity,
        monthly_operating_costs,
        breakdown,
    })
}
