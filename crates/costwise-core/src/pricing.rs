//! # Unit Price Calculator
//!
//! Computes one item's unit price, profit and totals from its own inputs
//! plus its share of the operating costs.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Each step feeds the next. The order is part of the contract.           │
//! │                                                                         │
//! │  1. operating/unit  = total operating costs ÷ expected monthly units   │
//! │  2. direct cost     = base + BOM lines + operating/unit                │
//! │  3. after markup    = direct × (1 + markup%)                           │
//! │  4. final/unit      = after markup × (1 + tax%)                        │
//! │  5. profit/unit     = final/unit − direct cost                         │
//! │  6. totals          = per-unit figures × quantity                      │
//! │  7. package figures = final/unit × units/package   (bulk items only)   │
//! │  8. gross margin    = markup ÷ (1 + markup%) × 100                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is applied on top of the marked-up price, so the reported "profit"
//! includes the tax amount. Gross margin is `markup ÷ (1 + markup ÷ 100) × 100`,
//! so a 30% markup reports 2307.69.

use serde::{Deserialize, Serialize};

use crate::money::{Money, Percent};
use crate::types::Item;

// =============================================================================
// Input
// =============================================================================

/// Everything the calculator needs for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceInput {
    pub base_cost: Money,
    pub markup: Percent,
    pub tax_rate: Percent,
    /// Sum of the item's BOM line costs.
    pub subproducts_cost: Money,
    /// Operating cost pool assigned to this item (see [`crate::allocation`]).
    pub total_operating_costs: Money,
    pub expected_monthly_units: f64,
    pub quantity: i64,
    pub units_per_package: f64,
}

impl PriceInput {
    /// Builds an input from an item snapshot.
    ///
    /// `subproducts_cost` is the sum of the item's BOM lines and
    /// `total_operating_costs` the monthly pool the item carries alone.
    pub fn for_item(
        item: &Item,
        subproducts_cost: Money,
        total_operating_costs: Money,
        quantity: i64,
    ) -> Self {
        PriceInput {
            base_cost: item.base_cost,
            markup: item.markup,
            tax_rate: item.tax_rate,
            subproducts_cost,
            total_operating_costs,
            expected_monthly_units: item.expected_monthly_units,
            quantity,
            units_per_package: item.units_per_package,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Package-equivalent figures, reported for bulk items only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackagePricing {
    /// Price of a whole package (`final_price_per_unit × units_per_package`).
    pub package_price: Money,
    /// Price of a single unit out of the package.
    pub cost_per_unit: Money,
}

/// Full result of a unit price calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_cost: Money,
    pub subproducts_cost: Money,
    pub operating_cost_per_unit: Money,
    pub total_direct_cost: Money,
    pub markup_amount: Money,
    pub price_after_markup: Money,
    pub tax_amount: Money,
    pub final_price_per_unit: Money,
    pub profit_per_unit: Money,
    pub total_price: Money,
    pub total_profit: Money,
    /// `Some` only when `units_per_package > 1`.
    pub package: Option<PackagePricing>,
    pub gross_margin_percent: f64,
}

// =============================================================================
// Calculator
// =============================================================================

/// Calculates an item's unit price.
///
/// Pure and total: no input is rejected and no value is clamped.
///
/// ## Example
/// ```rust
/// use costwise_core::money::{Money, Percent};
/// use costwise_core::pricing::{calculate_unit_price, PriceInput};
///
/// let result = calculate_unit_price(&PriceInput {
///     base_cost: Money::new(10.0),
///     markup: Percent::new(30.0),
///     tax_rate: Percent::new(8.5),
///     subproducts_cost: Money::new(5.0),
///     total_operating_costs: Money::new(1000.0),
///     expected_monthly_units: 100.0,
///     quantity: 1,
///     units_per_package: 1.0,
/// });
///
/// assert_eq!(result.operating_cost_per_unit, Money::new(10.0));
/// assert_eq!(result.total_direct_cost, Money::new(25.0));
/// ```
pub fn calculate_unit_price(input: &PriceInput) -> PriceBreakdown {
    let operating_cost_per_unit = if input.expected_monthly_units > 0.0 {
        input.total_operating_costs / input.expected_monthly_units
    } else {
        Money::zero()
    };

    let total_direct_cost = input.base_cost + input.subproducts_cost + operating_cost_per_unit;
    let price_after_markup = total_direct_cost * input.markup.factor();
    let final_price_per_unit = price_after_markup * input.tax_rate.factor();
    let profit_per_unit = final_price_per_unit - total_direct_cost;

    let quantity = input.quantity as f64;
    let total_price = final_price_per_unit * quantity;
    let total_profit = profit_per_unit * quantity;

    // The per-unit price of a bulk item is already per unit; this only
    // reports what a whole package would go for.
    let package = (input.units_per_package > 1.0).then(|| PackagePricing {
        package_price: final_price_per_unit * input.units_per_package,
        cost_per_unit: final_price_per_unit,
    });

    PriceBreakdown {
        base_cost: input.base_cost,
        subproducts_cost: input.subproducts_cost,
        operating_cost_per_unit,
        total_direct_cost,
        markup_amount: price_after_markup - total_direct_cost,
        price_after_markup,
        tax_amount: final_price_per_unit - price_after_markup,
        final_price_per_unit,
        profit_per_unit,
        total_price,
        total_profit,
        package,
        gross_margin_percent: gross_margin_percent(input.markup),
    }
}

/// Margin expressed against the marked-up price: `m / (1 + m/100) × 100`.
pub fn gross_margin_percent(markup: Percent) -> f64 {
    markup.value() / markup.factor() * 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: Money, expected: f64) {
        assert!(
            (actual.amount() - expected).abs() < EPS,
            "expected {expected}, got {}",
            actual.amount()
        );
    }

    fn reference_input() -> PriceInput {
        PriceInput {
            base_cost: Money::new(10.0),
            markup: Percent::new(30.0),
            tax_rate: Percent::new(8.5),
            subproducts_cost: Money::new(5.0),
            total_operating_costs: Money::new(1000.0),
            expected_monthly_units: 100.0,
            quantity: 1,
            units_per_package: 1.0,
        }
    }

    #[test]
    fn test_reference_example() {
        let result = calculate_unit_price(&reference_input());

        assert_close(result.operating_cost_per_unit, 10.0);
        assert_close(result.total_direct_cost, 25.0);
        assert_close(result.price_after_markup, 32.5);
        assert_close(result.final_price_per_unit, 35.2625);
        assert_close(result.profit_per_unit, 10.2625);
        assert_close(result.markup_amount, 7.5);
        assert_close(result.tax_amount, 2.7625);
        assert!(result.package.is_none());
    }

    #[test]
    fn test_formula_holds_across_inputs() {
        let cases = [
            (0.0, 0.0, 0.0, 0.0, 1),
            (3.2, 1.1, 45.0, 19.0, 7),
            (120.0, 0.0, 0.0, 8.5, 3),
            (0.99, 14.5, 200.0, 0.0, 12),
        ];

        for (base, sub, markup, tax, quantity) in cases {
            let input = PriceInput {
                base_cost: Money::new(base),
                subproducts_cost: Money::new(sub),
                markup: Percent::new(markup),
                tax_rate: Percent::new(tax),
                total_operating_costs: Money::new(600.0),
                expected_monthly_units: 40.0,
                quantity,
                units_per_package: 1.0,
            };
            let result = calculate_unit_price(&input);

            let expected_final =
                (base + sub + 600.0 / 40.0) * (1.0 + markup / 100.0) * (1.0 + tax / 100.0);
            assert_close(result.final_price_per_unit, expected_final);
            assert_close(result.total_price, expected_final * quantity as f64);
        }
    }

    #[test]
    fn test_no_expected_units_means_no_operating_charge() {
        let mut input = reference_input();
        input.expected_monthly_units = 0.0;
        assert!(calculate_unit_price(&input).operating_cost_per_unit.is_zero());

        input.expected_monthly_units = -5.0;
        assert!(calculate_unit_price(&input).operating_cost_per_unit.is_zero());
    }

    #[test]
    fn test_totals_scale_with_quantity() {
        let mut input = reference_input();
        input.quantity = 4;
        let result = calculate_unit_price(&input);

        assert_close(result.total_price, 35.2625 * 4.0);
        assert_close(result.total_profit, 10.2625 * 4.0);

        input.quantity = 0;
        let result = calculate_unit_price(&input);
        assert!(result.total_price.is_zero());
        assert_close(result.final_price_per_unit, 35.2625);
    }

    #[test]
    fn test_bulk_item_reports_package_figures() {
        let mut input = reference_input();
        input.units_per_package = 12.0;
        let result = calculate_unit_price(&input);

        let package = result.package.expect("bulk item reports package pricing");
        assert_close(package.cost_per_unit, 35.2625);
        assert_close(package.package_price, 35.2625 * 12.0);
        // The unit price itself is not divided by the package size.
        assert_close(result.final_price_per_unit, 35.2625);
    }

    #[test]
    fn test_gross_margin_formula() {
        let result = calculate_unit_price(&reference_input());
        assert!((result.gross_margin_percent - 30.0 / 1.3 * 100.0).abs() < EPS);

        assert_eq!(gross_margin_percent(Percent::zero()), 0.0);
        assert!((gross_margin_percent(Percent::new(100.0)) - 5000.0).abs() < EPS);
    }

    #[test]
    fn test_negative_values_propagate() {
        let mut input = reference_input();
        input.base_cost = Money::new(-40.0);
        input.markup = Percent::new(-10.0);
        let result = calculate_unit_price(&input);

        assert_close(result.total_direct_cost, -25.0);
        assert_close(result.price_after_markup, -22.5);
        assert!(result.final_price_per_unit.is_negative());
    }

    #[test]
    fn test_is_deterministic() {
        let input = reference_input();
        let first = calculate_unit_price(&input);
        let second = calculate_unit_price(&input);

        assert_eq!(
            first.final_price_per_unit.amount().to_bits(),
            second.final_price_per_unit.amount().to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_for_item_copies_coefficients() {
        let item = Item::new_product("Stool", Money::new(18.0))
            .with_expected_monthly_units(40.0)
            .with_units_per_package(2.0);
        let input = PriceInput::for_item(&item, Money::new(6.0), Money::new(200.0), 3);

        assert_eq!(input.base_cost, Money::new(18.0));
        assert_eq!(input.markup, Percent::new(30.0));
        assert_eq!(input.subproducts_cost, Money::new(6.0));
        assert_eq!(input.expected_monthly_units, 40.0);
        assert_eq!(input.units_per_package, 2.0);
        assert_eq!(input.quantity, 3);
    }
}
