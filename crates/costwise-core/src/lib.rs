//! # costwise-core: Pure Costing Engine for Costwise
//!
//! This crate is the **heart** of Costwise. It turns raw cost inputs (base
//! cost, markup, tax, bill-of-materials lines, shared operating costs,
//! package units) into a sale price, a profit figure and a cross-product
//! operating cost distribution.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Costwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    costwise CLI (apps/cli)                      │   │
//! │  │    item add ──► bom attach ──► price ──► portfolio              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ costwise-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐     │   │
//! │  │   │ pricing  │  │   bom    │  │allocation│  │ conversion │     │   │
//! │  │   │ unit     │  │ snapshot │  │ single / │  │ product ⇄  │     │   │
//! │  │   │ price    │  │ lines    │  │ portfolio│  │ component  │     │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 costwise-db (Record Store)                      │   │
//! │  │          items, BOM lines, operating costs, lookups             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, BomLine, OperatingCostEntry, ...)
//! - [`money`] - `Money` and `Percent` value types
//! - [`error`] - Domain error types
//! - [`validation`] - Caller-side input validation
//! - [`pricing`] - Unit price calculator
//! - [`bom`] - Component resolution into BOM snapshot lines
//! - [`allocation`] - Operating cost allocation policies
//! - [`conversion`] - Product ⇄ component transitions
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = bit-identical output
//! 2. **No I/O**: callers load a consistent snapshot and persist results
//! 3. **Snapshots, not references**: a BOM line stores a resolved cost
//! 4. **No clamping**: out-of-range numbers pass through unchanged
//!
//! ## Example Usage
//!
//! ```rust
//! use costwise_core::money::{Money, Percent};
//! use costwise_core::pricing::{calculate_unit_price, PriceInput};
//!
//! let input = PriceInput {
//!     base_cost: Money::new(10.0),
//!     markup: Percent::new(30.0),
//!     tax_rate: Percent::new(8.5),
//!     subproducts_cost: Money::new(5.0),
//!     total_operating_costs: Money::new(1000.0),
//!     expected_monthly_units: 100.0,
//!     quantity: 1,
//!     units_per_package: 1.0,
//! };
//!
//! let result = calculate_unit_price(&input);
//! assert!((result.final_price_per_unit.amount() - 35.2625).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod bom;
pub mod conversion;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::{Money, Percent};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Markup a new product starts with, and the value restored when a component
/// with a zero markup is converted back into a product.
pub const DEFAULT_PRODUCT_MARKUP_PERCENT: f64 = 30.0;

/// Tax rate a new product starts with, and the value restored when a
/// component with a zero tax rate is converted back into a product.
pub const DEFAULT_PRODUCT_TAX_RATE_PERCENT: f64 = 8.5;

/// Expected monthly sales volume for a freshly created item.
pub const DEFAULT_EXPECTED_MONTHLY_UNITS: f64 = 100.0;

/// Maximum length of item, category and company names.
pub const MAX_NAME_LENGTH: usize = 200;
