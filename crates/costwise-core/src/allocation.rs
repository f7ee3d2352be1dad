//! # Operating Cost Allocation
//!
//! Spreads the monthly operating cost pool over sold units. Two policies
//! exist and they answer different questions, so they stay separate:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SINGLE ITEM        "what if this item carried all overhead alone?"    │
//! │    per unit = monthly total ÷ item's expected units                    │
//! │                                                                         │
//! │  PORTFOLIO          "what does each selected product carry?"           │
//! │    total units = Σ expected units of the selection                     │
//! │    share       = monthly total × (units ÷ total units)                 │
//! │    per unit    = share ÷ units  ==  monthly total ÷ total units        │
//! │                                                                         │
//! │  Every product in one portfolio run pays the same per-unit charge.     │
//! │  Only its dollar share of the pool differs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One-time costs are recorded for reference and never allocated.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percent};
use crate::pricing::{calculate_unit_price, PriceInput};
use crate::types::{Item, ItemKind, OperatingCostEntry};

// =============================================================================
// Monthly Pool
// =============================================================================

/// Sums the monthly entries. One-time entries are ignored.
pub fn monthly_total(entries: &[OperatingCostEntry]) -> Money {
    entries
        .iter()
        .filter(|entry| entry.is_monthly())
        .map(|entry| entry.amount)
        .sum()
}

/// Single-item policy: the whole monthly pool divided by one item's
/// expected units. Zero when the item expects no units.
pub fn allocate_single_item(entries: &[OperatingCostEntry], expected_monthly_units: f64) -> Money {
    if expected_monthly_units > 0.0 {
        monthly_total(entries) / expected_monthly_units
    } else {
        Money::zero()
    }
}

// =============================================================================
// Portfolio Policy
// =============================================================================

/// One selected item as seen by the portfolio allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub item_id: i64,
    pub name: String,
    pub kind: ItemKind,
    pub base_cost: Money,
    pub subproducts_cost: Money,
    pub markup: Percent,
    pub tax_rate: Percent,
    pub expected_monthly_units: f64,
}

impl PortfolioItem {
    pub fn from_item(item: &Item, subproducts_cost: Money) -> Self {
        PortfolioItem {
            item_id: item.id,
            name: item.name.clone(),
            kind: item.kind,
            base_cost: item.base_cost,
            subproducts_cost,
            markup: item.markup,
            tax_rate: item.tax_rate,
            expected_monthly_units: item.expected_monthly_units,
        }
    }
}

/// Result row for one item of a portfolio run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioLine {
    pub item_id: i64,
    pub name: String,
    pub units: f64,
    /// Share of the total units, in percent.
    pub percentage: f64,
    /// Dollar share of the operating cost pool.
    pub share: Money,
    pub operating_cost_per_unit: Money,
    pub total_direct_cost: Money,
    pub final_price: Money,
    pub profit_per_unit: Money,
}

/// Result of a portfolio run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub total_units: f64,
    pub total_operating_costs: Money,
    pub items: Vec<PortfolioLine>,
}

impl PortfolioAllocation {
    /// The per-unit charge every product in this run carries.
    pub fn operating_cost_per_unit(&self) -> Money {
        self.total_operating_costs / self.total_units
    }
}

/// Portfolio policy: distributes `total_operating_costs` over the selection
/// proportionally to expected monthly units and prices every item with its
/// share.
///
/// ## Errors
/// - empty selection
/// - a component in the selection
/// - the selection expects zero units in total
pub fn allocate_portfolio(
    selection: &[PortfolioItem],
    total_operating_costs: Money,
) -> CoreResult<PortfolioAllocation> {
    if selection.is_empty() {
        return Err(CoreError::EmptyPortfolio);
    }

    if let Some(component) = selection.iter().find(|item| item.kind.is_component()) {
        return Err(ValidationError::not_allowed(
            "portfolio item",
            format!("'{}' is a component, only products can be allocated", component.name),
        )
        .into());
    }

    let total_units: f64 = selection.iter().map(|item| item.expected_monthly_units).sum();
    if total_units == 0.0 {
        return Err(CoreError::NoPortfolioUnits { total_units });
    }

    let items = selection
        .iter()
        .map(|item| {
            let units = item.expected_monthly_units;
            let fraction = units / total_units;
            let share = total_operating_costs * fraction;

            let breakdown = calculate_unit_price(&PriceInput {
                base_cost: item.base_cost,
                markup: item.markup,
                tax_rate: item.tax_rate,
                subproducts_cost: item.subproducts_cost,
                total_operating_costs: share,
                expected_monthly_units: units,
                quantity: 1,
                units_per_package: 1.0,
            });

            PortfolioLine {
                item_id: item.item_id,
                name: item.name.clone(),
                units,
                percentage: fraction * 100.0,
                share,
                operating_cost_per_unit: breakdown.operating_cost_per_unit,
                total_direct_cost: breakdown.total_direct_cost,
                final_price: breakdown.final_price_per_unit,
                profit_per_unit: breakdown.profit_per_unit,
            }
        })
        .collect();

    Ok(PortfolioAllocation {
        total_units,
        total_operating_costs,
        items,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn product(id: i64, name: &str, base: f64, units: f64) -> PortfolioItem {
        let mut item = Item::new_product(name, Money::new(base)).with_expected_monthly_units(units);
        item.id = id;
        PortfolioItem::from_item(&item, Money::zero())
    }

    fn costs() -> Vec<OperatingCostEntry> {
        vec![
            OperatingCostEntry::monthly("Rent", Money::new(800.0)),
            OperatingCostEntry::monthly("Software", Money::new(200.0)),
            OperatingCostEntry::one_time("Laser cutter", Money::new(5000.0)),
        ]
    }

    #[test]
    fn test_monthly_total_skips_one_time() {
        assert_eq!(monthly_total(&costs()), Money::new(1000.0));
        assert!(monthly_total(&[]).is_zero());
    }

    #[test]
    fn test_single_item_policy() {
        assert_eq!(allocate_single_item(&costs(), 100.0), Money::new(10.0));
        assert_eq!(allocate_single_item(&costs(), 250.0), Money::new(4.0));
        assert!(allocate_single_item(&costs(), 0.0).is_zero());
        assert!(allocate_single_item(&costs(), -3.0).is_zero());
    }

    #[test]
    fn test_portfolio_shares() {
        let selection = vec![
            product(1, "Cutting board", 12.0, 100.0),
            product(2, "Coaster set", 4.0, 300.0),
        ];
        let result = allocate_portfolio(&selection, Money::new(1000.0)).unwrap();

        assert_eq!(result.total_units, 400.0);
        assert_eq!(result.items.len(), 2);

        let board = &result.items[0];
        assert!((board.percentage - 25.0).abs() < EPS);
        assert!((board.share.amount() - 250.0).abs() < EPS);
        assert!((board.operating_cost_per_unit.amount() - 2.5).abs() < EPS);
        assert!((board.total_direct_cost.amount() - 14.5).abs() < EPS);
        assert!((board.final_price.amount() - 14.5 * 1.3 * 1.085).abs() < EPS);

        let coasters = &result.items[1];
        assert!((coasters.share.amount() - 750.0).abs() < EPS);
        assert_eq!(coasters.item_id, 2);
    }

    #[test]
    fn test_every_item_pays_the_same_per_unit_charge() {
        let selection = vec![
            product(1, "A", 1.0, 7.0),
            product(2, "B", 2.0, 13.0),
            product(3, "C", 3.0, 101.0),
        ];
        let result = allocate_portfolio(&selection, Money::new(977.0)).unwrap();
        let expected = 977.0 / 121.0;

        for line in &result.items {
            assert!((line.operating_cost_per_unit.amount() - expected).abs() < EPS);
        }
        assert!((result.operating_cost_per_unit().amount() - expected).abs() < EPS);

        let percent_sum: f64 = result.items.iter().map(|line| line.percentage).sum();
        assert!((percent_sum - 100.0).abs() < EPS);
    }

    #[test]
    fn test_zero_unit_item_gets_no_charge() {
        let selection = vec![product(1, "Seasonal", 5.0, 0.0), product(2, "Staple", 5.0, 50.0)];
        let result = allocate_portfolio(&selection, Money::new(500.0)).unwrap();

        assert!(result.items[0].operating_cost_per_unit.is_zero());
        assert_eq!(result.items[0].percentage, 0.0);
        assert!((result.items[1].operating_cost_per_unit.amount() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_portfolio_errors() {
        assert!(matches!(
            allocate_portfolio(&[], Money::new(100.0)),
            Err(CoreError::EmptyPortfolio)
        ));

        let idle = vec![product(1, "A", 1.0, 0.0), product(2, "B", 1.0, 0.0)];
        assert!(matches!(
            allocate_portfolio(&idle, Money::new(100.0)),
            Err(CoreError::NoPortfolioUnits { .. })
        ));

        let mut screws = Item::new_component("Screws", Money::new(3.0));
        screws.id = 9;
        let mixed = vec![
            product(1, "Shelf", 20.0, 10.0),
            PortfolioItem::from_item(&screws, Money::zero()),
        ];
        let err = allocate_portfolio(&mixed, Money::new(100.0)).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
