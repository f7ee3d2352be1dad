//! # Domain Types
//!
//! Core domain types used throughout Costwise.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │      Item       │   │     BomLine     │   │ OperatingCostEntry   │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id (0 = new)   │◄──│  parent_id      │   │  id                  │  │
//! │  │  kind           │   │  cost (frozen)  │   │  amount              │  │
//! │  │  base_cost      │   │  description    │   │  frequency           │  │
//! │  │  markup / tax   │   │  tax_rate       │   └──────────────────────┘  │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    ItemKind     │   │  CostFrequency  │   │ Category/Company│       │
//! │  │  Product        │   │  Monthly        │   │ lookup lists    │       │
//! │  │  Component      │   │  OneTime        │   │ (metadata only) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are numeric and assigned by the record store. `0` marks a value that
//! has not been persisted yet. No type holds a reference to another entity:
//! a BOM line only remembers its owner's id and a resolved cost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Percent};
use crate::{
    DEFAULT_EXPECTED_MONTHLY_UNITS, DEFAULT_PRODUCT_MARKUP_PERCENT,
    DEFAULT_PRODUCT_TAX_RATE_PERCENT,
};

// =============================================================================
// Item Kind
// =============================================================================

/// Whether an item is sold or consumed by other items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Saleable item; takes part in portfolio allocation.
    #[default]
    Product,
    /// Material or part consumed by products through BOM lines.
    Component,
}

impl ItemKind {
    pub fn is_component(&self) -> bool {
        matches!(self, ItemKind::Component)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Product => "product",
            ItemKind::Component => "component",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(ItemKind::Product),
            "component" | "material" => Ok(ItemKind::Component),
            other => Err(format!("unknown item kind '{}'", other)),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// Descriptive metadata carried along with an item. Never read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Category name (see [`Category`]).
    pub category: Option<String>,
    /// Source / vendor name (see [`Company`]).
    pub company: Option<String>,
    /// Purchase reference, usually a shop URL.
    pub purchase_link: Option<String>,
}

/// A priceable product or component and its cost coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Record store id, `0` while unsaved.
    pub id: i64,

    pub name: String,

    pub kind: ItemKind,

    /// Own cost before BOM lines, operating costs, markup and tax.
    pub base_cost: Money,

    pub markup: Percent,

    pub tax_rate: Percent,

    /// Expected sales volume per month, used to spread operating costs.
    pub expected_monthly_units: f64,

    /// Units contained in one purchased package. `> 1` means bulk pricing.
    pub units_per_package: f64,

    #[serde(default)]
    pub metadata: ItemMetadata,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates an unsaved product with the default markup and tax rate.
    pub fn new_product(name: impl Into<String>, base_cost: Money) -> Self {
        Self::new(
            name,
            ItemKind::Product,
            base_cost,
            Percent::new(DEFAULT_PRODUCT_MARKUP_PERCENT),
            Percent::new(DEFAULT_PRODUCT_TAX_RATE_PERCENT),
        )
    }

    /// Creates an unsaved component. Components start without markup and tax.
    pub fn new_component(name: impl Into<String>, base_cost: Money) -> Self {
        Self::new(
            name,
            ItemKind::Component,
            base_cost,
            Percent::zero(),
            Percent::zero(),
        )
    }

    fn new(
        name: impl Into<String>,
        kind: ItemKind,
        base_cost: Money,
        markup: Percent,
        tax_rate: Percent,
    ) -> Self {
        let now = Utc::now();
        Item {
            id: 0,
            name: name.into(),
            kind,
            base_cost,
            markup,
            tax_rate,
            expected_monthly_units: DEFAULT_EXPECTED_MONTHLY_UNITS,
            units_per_package: 1.0,
            metadata: ItemMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the package size (builder style).
    pub fn with_units_per_package(mut self, units: f64) -> Self {
        self.units_per_package = units;
        self
    }

    /// Sets the expected monthly sales volume (builder style).
    pub fn with_expected_monthly_units(mut self, units: f64) -> Self {
        self.expected_monthly_units = units;
        self
    }

    /// Sets markup and tax rate (builder style).
    pub fn with_rates(mut self, markup: Percent, tax_rate: Percent) -> Self {
        self.markup = markup;
        self.tax_rate = tax_rate;
        self
    }

    #[inline]
    pub fn is_component(&self) -> bool {
        self.kind.is_component()
    }

    /// True until the record store has assigned an id.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// True when the item is bought in packages of more than one unit.
    #[inline]
    pub fn is_bulk(&self) -> bool {
        self.units_per_package > 1.0
    }
}

// =============================================================================
// BOM Line
// =============================================================================

/// A resolved cost contribution attached to a parent item.
///
/// `cost` is a point-in-time snapshot. Changing the item it was derived
/// from never changes an existing line; the user has to attach it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub id: i64,
    /// Owning item.
    pub parent_id: i64,
    pub name: String,
    /// Human-readable derivation trail.
    pub description: String,
    pub cost: Money,
    /// Stored with the line but not applied when lines are summed.
    pub tax_rate: Percent,
}

impl BomLine {
    /// Creates an unsaved manual cost line (e.g. packaging, labour).
    pub fn manual(parent_id: i64, name: impl Into<String>, cost: Money) -> Self {
        BomLine {
            id: 0,
            parent_id,
            name: name.into(),
            description: String::new(),
            cost,
            tax_rate: Percent::zero(),
        }
    }
}

// =============================================================================
// Operating Costs
// =============================================================================

/// How often an operating cost is incurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CostFrequency {
    /// Recurs every month; takes part in per-unit allocation.
    #[default]
    Monthly,
    /// Tracked for reference only; excluded from allocation.
    OneTime,
}

impl CostFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostFrequency::Monthly => "monthly",
            CostFrequency::OneTime => "one_time",
        }
    }
}

impl std::fmt::Display for CostFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CostFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "monthly" => Ok(CostFrequency::Monthly),
            "one_time" | "onetime" | "once" => Ok(CostFrequency::OneTime),
            other => Err(format!("unknown cost frequency '{}'", other)),
        }
    }
}

/// A shared business expense (rent, software, insurance, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCostEntry {
    pub id: i64,
    pub name: String,
    pub amount: Money,
    pub frequency: CostFrequency,
}

impl OperatingCostEntry {
    /// Creates an unsaved monthly cost.
    pub fn monthly(name: impl Into<String>, amount: Money) -> Self {
        OperatingCostEntry {
            id: 0,
            name: name.into(),
            amount,
            frequency: CostFrequency::Monthly,
        }
    }

    /// Creates an unsaved one-time cost.
    pub fn one_time(name: impl Into<String>, amount: Money) -> Self {
        OperatingCostEntry {
            frequency: CostFrequency::OneTime,
            ..Self::monthly(name, amount)
        }
    }

    #[inline]
    pub fn is_monthly(&self) -> bool {
        self.frequency == CostFrequency::Monthly
    }
}

// =============================================================================
// Lookup Lists
// =============================================================================

/// A product category used to group items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A manufacturer or vendor items are bought from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
    pub contact_info: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_defaults() {
        let item = Item::new_product("Bird house", Money::new(12.0));
        assert!(item.is_new());
        assert_eq!(item.kind, ItemKind::Product);
        assert_eq!(item.markup, Percent::new(30.0));
        assert_eq!(item.tax_rate, Percent::new(8.5));
        assert_eq!(item.expected_monthly_units, 100.0);
        assert_eq!(item.units_per_package, 1.0);
        assert!(!item.is_bulk());
    }

    #[test]
    fn test_new_component_defaults() {
        let item = Item::new_component("Screws", Money::new(4.0)).with_units_per_package(100.0);
        assert!(item.is_component());
        assert!(item.markup.is_zero());
        assert!(item.tax_rate.is_zero());
        assert!(item.is_bulk());
    }

    #[test]
    fn test_item_kind_parse() {
        assert_eq!("Product".parse::<ItemKind>(), Ok(ItemKind::Product));
        assert_eq!("material".parse::<ItemKind>(), Ok(ItemKind::Component));
        assert!("service".parse::<ItemKind>().is_err());
        assert_eq!(ItemKind::Component.to_string(), "component");
    }

    #[test]
    fn test_cost_frequency_parse() {
        assert_eq!("one-time".parse::<CostFrequency>(), Ok(CostFrequency::OneTime));
        assert_eq!("Monthly".parse::<CostFrequency>(), Ok(CostFrequency::Monthly));
        assert!("weekly".parse::<CostFrequency>().is_err());
        assert_eq!(CostFrequency::OneTime.to_string(), "one_time");
    }

    #[test]
    fn test_operating_cost_frequency() {
        assert!(OperatingCostEntry::monthly("Rent", Money::new(800.0)).is_monthly());
        let setup = OperatingCostEntry::one_time("Setup", Money::new(250.0));
        assert!(!setup.is_monthly());
        assert_eq!(setup.name, "Setup");
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new_component("Wood plank", Money::new(7.5));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "component");
        assert_eq!(json["base_cost"], 7.5);

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
