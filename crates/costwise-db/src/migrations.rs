//! # Database Migrations
//!
//! The schema lives in `migrations/sqlite/` at the workspace root and is
//! embedded into the binary at compile time.
//!
//! ```text
//! Database::new
//!      │
//!      ▼
//! _sqlx_migrations ── compare checksums ── apply pending files in order
//!      │
//!      └── 001_initial_schema.sql  items, bom_lines, operating_costs,
//!                                  categories, companies
//! ```
//!
//! Existing migration files are never edited; schema changes get a new
//! numbered file.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration. Safe to call on an up-to-date database.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(
        available = MIGRATOR.migrations.len(),
        "Checking for pending migrations"
    );

    MIGRATOR.run(pool).await?;

    info!("All migrations applied");
    Ok(())
}
