//! # Validation Module
//!
//! Input validation utilities for Costwise.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Type validation (is it a number?)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names present and bounded                                         │
//! │  └── Quantities / amounts positive where an operation needs it         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The price calculator and the allocators never call these checks on
//! numeric coefficients: a negative markup is the caller's business and is
//! carried through the formulas unchanged. Only inputs that make an
//! operation impossible (a zero quantity for a BOM line) are rejected by the
//! engine itself.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Item, OperatingCostEntry};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name_field(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Example
/// ```rust
/// use costwise_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Oak cutting board").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_name_field("name", name)
}

/// Validates a category or company name.
pub fn validate_lookup_name(name: &str) -> ValidationResult<()> {
    validate_name_field("name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base cost before an item is saved (zero is allowed).
pub fn validate_base_cost(cost: Money) -> ValidationResult<()> {
    if !cost.amount().is_finite() {
        return Err(ValidationError::NotFinite {
            field: "base cost".to_string(),
        });
    }

    if cost.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "base cost".to_string(),
        });
    }

    Ok(())
}

/// Validates the number of component units a parent item consumes.
///
/// ## User Workflow
/// ```text
/// bom attach --parent 7 --component 3 --quantity 2.5
///      │
///      ▼
/// validate_quantity_needed(2.5) ← THIS FUNCTION
///      │
///      ├── qty <= 0 or NaN? → Error, no line is created
///      │
///      └── OK → resolve_component_line
/// ```
pub fn validate_quantity_needed(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity needed".to_string(),
        });
    }

    if quantity <= 0.0 {
        return Err(ValidationError::must_be_positive("quantity needed"));
    }

    Ok(())
}

/// Validates a new operating cost entry: it needs a name and a positive amount.
pub fn validate_operating_cost(entry: &OperatingCostEntry) -> ValidationResult<()> {
    validate_name_field("name", &entry.name)?;

    if !entry.amount.amount().is_finite() || entry.amount.amount() <= 0.0 {
        return Err(ValidationError::must_be_positive("amount"));
    }

    Ok(())
}

/// Validates an item before it is persisted.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_base_cost(item.base_cost)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Oak cutting board").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
        assert!(validate_item_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_base_cost() {
        assert!(validate_base_cost(Money::zero()).is_ok());
        assert!(validate_base_cost(Money::new(10.99)).is_ok());
        assert!(validate_base_cost(Money::new(-0.01)).is_err());
        assert!(validate_base_cost(Money::new(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_quantity_needed() {
        assert!(validate_quantity_needed(1.0).is_ok());
        assert!(validate_quantity_needed(0.25).is_ok());

        assert!(matches!(
            validate_quantity_needed(0.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_quantity_needed(-2.0).is_err());
        assert!(validate_quantity_needed(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_operating_cost() {
        assert!(validate_operating_cost(&OperatingCostEntry::monthly("Rent", Money::new(900.0))).is_ok());
        assert!(validate_operating_cost(&OperatingCostEntry::monthly("", Money::new(900.0))).is_err());
        assert!(validate_operating_cost(&OperatingCostEntry::one_time("Setup", Money::zero())).is_err());
    }

    #[test]
    fn test_validate_item() {
        let mut item = Item::new_product("Lamp", Money::new(20.0));
        assert!(validate_item(&item).is_ok());

        item.base_cost = Money::new(-1.0);
        assert!(validate_item(&item).is_err());

        item.base_cost = Money::new(1.0);
        item.name = String::new();
        assert!(matches!(
            validate_item(&item),
            Err(ValidationError::Required { .. })
        ));
    }
}
