//! # Repository Module
//!
//! One repository per table. Each holds a clone of the pool and converts
//! between SQL rows and `costwise-core` types.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │  db.bom().total_for_parent(7)                                  │
//! │       ▼                                                                 │
//! │  BomRepository ── SQL ──► bom_lines                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Money (plain value, handed to the engine)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - products and components
//! - [`BomRepository`](bom::BomRepository) - BOM lines per parent item
//! - [`OperatingCostRepository`](operating_cost::OperatingCostRepository) - overhead pool
//! - [`CategoryRepository`](lookup::CategoryRepository) and
//!   [`CompanyRepository`](lookup::CompanyRepository) - lookup lists

pub mod bom;
pub mod item;
pub mod lookup;
pub mod operating_cost;
