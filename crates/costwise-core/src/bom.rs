//! # Component Resolver
//!
//! Turns "use N units of item X" into a frozen [`BomLine`] on a parent item.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  source item X (+ its own BOM lines, one level only)                    │
//! │                                                                         │
//! │  total        = base_cost + Σ X's BOM line costs                        │
//! │  after markup = total × (1 + markup%)                                   │
//! │  package      = after markup × (1 + tax%)                               │
//! │  per unit     = package ÷ units_per_package   (1 when not positive)     │
//! │  line cost    = per unit × quantity needed                              │
//! │                                                                         │
//! │  Operating costs are never part of a component's price.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resulting line holds a cost, not a link. Editing X later does not
//! change lines that were already created from it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::{Money, Percent};
use crate::types::{BomLine, Item};
use crate::validation::validate_quantity_needed;

/// Source item as it looked when it was picked, with the sum of its own
/// BOM line costs.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSnapshot {
    pub item: Item,
    pub bom_total: Money,
}

impl ComponentSnapshot {
    pub fn new(item: Item, lines: &[BomLine]) -> Self {
        ComponentSnapshot {
            item,
            bom_total: bom_total(lines),
        }
    }
}

/// Every intermediate value of a component cost derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BomDerivation {
    pub base_cost: Money,
    pub bom_total: Money,
    pub total_cost: Money,
    pub markup: Percent,
    pub price_after_markup: Money,
    pub tax_rate: Percent,
    pub package_price: Money,
    pub units_per_package: f64,
    pub cost_per_unit: Money,
    pub quantity_needed: f64,
    pub line_cost: Money,
}

impl BomDerivation {
    /// True when the source is bought in packages of more than one unit.
    pub fn is_bulk(&self) -> bool {
        self.units_per_package > 1.0
    }

    fn line_name(&self, source_name: &str) -> String {
        if self.is_bulk() {
            format!("{} ({} units)", source_name, self.quantity_needed)
        } else {
            format!("{} (×{})", source_name, self.quantity_needed)
        }
    }

    fn description(&self) -> String {
        if self.is_bulk() {
            format!(
                "Base: {}, +{}% = {}, +{}% = {} package ÷ {} units = {}/unit × {} = {}",
                self.base_cost,
                self.markup.value(),
                self.price_after_markup,
                self.tax_rate.value(),
                self.package_price,
                self.units_per_package,
                self.cost_per_unit,
                self.quantity_needed,
                self.line_cost,
            )
        } else {
            format!(
                "Base: {}, Markup: {}%, Tax: {}%, Final: {} × {}",
                self.base_cost,
                self.markup.value(),
                self.tax_rate.value(),
                self.package_price,
                self.quantity_needed,
            )
        }
    }
}

/// Sums BOM line costs. Per-line tax rates are not applied.
pub fn bom_total(lines: &[BomLine]) -> Money {
    lines.iter().map(|line| line.cost).sum()
}

/// Runs the cost derivation without building a line.
pub fn derive_component_cost(
    source: &ComponentSnapshot,
    quantity_needed: f64,
) -> CoreResult<BomDerivation> {
    validate_quantity_needed(quantity_needed)?;

    let item = &source.item;
    let total_cost = item.base_cost + source.bom_total;
    let price_after_markup = total_cost * item.markup.factor();
    let package_price = price_after_markup * item.tax_rate.factor();

    let units_per_package = if item.units_per_package > 0.0 {
        item.units_per_package
    } else {
        1.0
    };
    let cost_per_unit = package_price / units_per_package;

    Ok(BomDerivation {
        base_cost: item.base_cost,
        bom_total: source.bom_total,
        total_cost,
        markup: item.markup,
        price_after_markup,
        tax_rate: item.tax_rate,
        package_price,
        units_per_package,
        cost_per_unit,
        quantity_needed,
        line_cost: cost_per_unit * quantity_needed,
    })
}

/// Builds an unsaved BOM line for `parent_id` from a source item snapshot.
///
/// ## Errors
/// - quantity not positive or not finite
/// - the source is the parent itself
/// - the source is not a component
///
/// ## Example
/// ```rust
/// use costwise_core::bom::{resolve_component_line, ComponentSnapshot};
/// use costwise_core::money::Money;
/// use costwise_core::types::Item;
///
/// let mut screws = Item::new_component("Screws", Money::new(100.0)).with_units_per_package(50.0);
/// screws.id = 3;
///
/// let line = resolve_component_line(7, &ComponentSnapshot::new(screws, &[]), 10.0).unwrap();
/// assert_eq!(line.cost, Money::new(20.0));
/// assert_eq!(line.name, "Screws (10 units)");
/// ```
pub fn resolve_component_line(
    parent_id: i64,
    source: &ComponentSnapshot,
    quantity_needed: f64,
) -> CoreResult<BomLine> {
    if !source.item.is_new() && source.item.id == parent_id {
        return Err(ValidationError::not_allowed(
            "component",
            "an item cannot be a component of itself",
        )
        .into());
    }
    if !source.item.is_component() {
        return Err(ValidationError::not_allowed(
            "component",
            format!("'{}' is a product; only components can be attached", source.item.name),
        )
        .into());
    }

    let derivation = derive_component_cost(source, quantity_needed)?;

    Ok(BomLine {
        id: 0,
        parent_id,
        name: derivation.line_name(&source.item.name),
        description: derivation.description(),
        cost: derivation.line_cost,
        tax_rate: Percent::zero(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
