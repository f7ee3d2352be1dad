//! # costwise-db: Record Store for Costwise
//!
//! SQLite persistence for everything the costing engine reads: items, their
//! BOM lines, shared operating costs and the category/company lookup lists.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Costwise Data Flow                               │
//! │                                                                         │
//! │  costwise price 7                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   costwise-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐   ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories    │   │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ items  bom_lines  │   │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ operating_costs   │   │ 001_...sql │  │   │
//! │  │   │               │    │ categories  ...   │   │            │  │   │
//! │  │   └───────────────┘    └───────────────────┘   └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  costwise-core: snapshot values in, breakdown out (no DB access)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use costwise_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("costwise.db")).await?;
//!
//! let item = db.items().get_by_id(7).await?;
//! let subtotal = db.bom().total_for_parent(7).await?;
//! let overhead = db.operating_costs().monthly_total().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::bom::BomRepository;
pub use repository::item::ItemRepository;
pub use repository::lookup::{CategoryRepository, CompanyRepository};
pub use repository::operating_cost::OperatingCostRepository;
