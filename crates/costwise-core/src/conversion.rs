//! # Kind Conversion
//!
//! Moving an item between product and component is asymmetric:
//!
//! ```text
//!   Product ──convert_to_component──► Component   markup := 0, tax := 0
//!   Component ──convert_to_product──► Product     markup := 30 if it was 0
//!                                                 tax    := 8.5 if it was 0
//! ```
//!
//! Non-zero rates survive a conversion to product untouched.

use chrono::Utc;

use crate::money::Percent;
use crate::types::{Item, ItemKind};
use crate::{DEFAULT_PRODUCT_MARKUP_PERCENT, DEFAULT_PRODUCT_TAX_RATE_PERCENT};

/// Marks the item as a component and clears its markup and tax rate.
pub fn convert_to_component(item: &mut Item) {
    item.kind = ItemKind::Component;
    item.markup = Percent::zero();
    item.tax_rate = Percent::zero();
    item.updated_at = Utc::now();
}

/// Marks the item as a product, filling in default rates that are exactly 0.
pub fn convert_to_product(item: &mut Item) {
    item.kind = ItemKind::Product;
    if item.markup.is_zero() {
        item.markup = Percent::new(DEFAULT_PRODUCT_MARKUP_PERCENT);
    }
    if item.tax_rate.is_zero() {
        item.tax_rate = Percent::new(DEFAULT_PRODUCT_TAX_RATE_PERCENT);
    }
    item.updated_at = Utc::now();
}

/// Converts `item` to `target`. Returns `false` and leaves the item
/// untouched when it already has that kind.
pub fn convert(item: &mut Item, target: ItemKind) -> bool {
    if item.kind == target {
        return false;
    }

    match target {
        ItemKind::Component => convert_to_component(item),
        ItemKind::Product => convert_to_product(item),
    }
    true
}

// =============================================================================
// Unit Tests
// =============================================================================
