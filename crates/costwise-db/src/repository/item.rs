//! # Item Repository
//!
//! Products and components live in one `items` table, told apart by `kind`.
//!
//! ## Listing Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list(None)                                                            │
//! │                                                                         │
//! │   1. Bookshelf      product     modified 10:42   ┐ products first,     │
//! │   2. Cutting board  product     modified 09:15   ┘ newest first        │
//! │   3. Screws         component   modified 11:03   ┐ then components,    │
//! │   4. Oak plank      component   modified 08:30   ┘ newest first        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting an item removes its own BOM lines (cascade). Lines on other
//! items that were derived from it are snapshots and stay as they are.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use costwise_core::{Item, ItemKind, ItemMetadata, Money, Percent};

const ITEM_COLUMNS: &str = "id, name, kind, base_cost, markup, tax_rate, \
     expected_monthly_units, units_per_package, category, company, purchase_link, \
     created_at, updated_at";

const LIST_ORDER: &str =
    "ORDER BY CASE kind WHEN 'product' THEN 0 ELSE 1 END, updated_at DESC, id DESC";

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    kind: ItemKind,
    base_cost: f64,
    markup: f64,
    tax_rate: f64,
    expected_monthly_units: f64,
    units_per_package: f64,
    category: Option<String>,
    company: Option<String>,
    purchase_link: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            kind: row.kind,
            base_cost: Money::new(row.base_cost),
            markup: Percent::new(row.markup),
            tax_rate: Percent::new(row.tax_rate),
            expected_monthly_units: row.expected_monthly_units,
            units_per_package: row.units_per_package,
            metadata: ItemMetadata {
                category: row.category,
                company: row.company,
                purchase_link: row.purchase_link,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the `items` table.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - No such item
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let sql = format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS);

        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Item::from))
    }

    /// Lists items, optionally restricted to one kind.
    pub async fn list(&self, kind: Option<ItemKind>) -> DbResult<Vec<Item>> {
        let rows = match kind {
            Some(kind) => {
                let sql = format!(
                    "SELECT {} FROM items WHERE kind = ?1 {}",
                    ITEM_COLUMNS, LIST_ORDER
                );
                sqlx::query_as::<_, ItemRow>(&sql)
                    .bind(kind.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {} FROM items {}", ITEM_COLUMNS, LIST_ORDER);
                sqlx::query_as::<_, ItemRow>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(count = rows.len(), kind = ?kind, "Listed items");
        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Inserts a new item and returns it with its assigned id.
    pub async fn insert(&self, item: &Item) -> DbResult<Item> {
        debug!(name = %item.name, kind = %item.kind, "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO items (
                name, kind, base_cost, markup, tax_rate,
                expected_monthly_units, units_per_package,
                category, company, purchase_link,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&item.name)
        .bind(item.kind.as_str())
        .bind(item.base_cost.amount())
        .bind(item.markup.value())
        .bind(item.tax_rate.value())
        .bind(item.expected_monthly_units)
        .bind(item.units_per_package)
        .bind(&item.metadata.category)
        .bind(&item.metadata.company)
        .bind(&item.metadata.purchase_link)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        let mut saved = item.clone();
        saved.id = result.last_insert_rowid();
        Ok(saved)
    }

    /// Overwrites every column of an existing item and bumps `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(Item)` - The stored item
    /// * `Err(DbError::NotFound)` - No item with that id
    pub async fn update(&self, item: &Item) -> DbResult<Item> {
        debug!(id = item.id, "Updating item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                kind = ?3,
                base_cost = ?4,
                markup = ?5,
                tax_rate = ?6,
                expected_monthly_units = ?7,
                units_per_package = ?8,
                category = ?9,
                company = ?10,
                purchase_link = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.kind.as_str())
        .bind(item.base_cost.amount())
        .bind(item.markup.value())
        .bind(item.tax_rate.value())
        .bind(item.expected_monthly_units)
        .bind(item.units_per_package)
        .bind(&item.metadata.category)
        .bind(&item.metadata.company)
        .bind(&item.metadata.purchase_link)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", item.id));
        }

        let mut saved = item.clone();
        saved.updated_at = now;
        Ok(saved)
    }

    /// Inserts unsaved items (id 0) and updates the rest.
    pub async fn save(&self, item: &Item) -> DbResult<Item> {
        if item.is_new() {
            self.insert(item).await
        } else {
            self.update(item).await
        }
    }

    /// Deletes an item together with its own BOM lines.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
