//! # BOM Line Repository
//!
//! Lines are written once by `bom attach` (or as manual cost lines) and
//! never recomputed. `total_for_parent` is the subproducts cost the price
//! calculator receives.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use costwise_core::{BomLine, Money, Percent};

#[derive(Debug, sqlx::FromRow)]
struct BomLineRow {
    id: i64,
    parent_id: i64,
    name: String,
    description: String,
    cost: f64,
    tax_rate: f64,
}

impl From<BomLineRow> for BomLine {
    fn from(row: BomLineRow) -> Self {
        BomLine {
            id: row.id,
            parent_id: row.parent_id,
            name: row.name,
            description: row.description,
            cost: Money::new(row.cost),
            tax_rate: Percent::new(row.tax_rate),
        }
    }
}

/// Repository for the `bom_lines` table.
#[derive(Debug, Clone)]
pub struct BomRepository {
    pool: SqlitePool,
}

impl BomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BomRepository { pool }
    }

    /// Lines of one parent item in creation order.
    pub async fn list_for_parent(&self, parent_id: i64) -> DbResult<Vec<BomLine>> {
        let rows = sqlx::query_as::<_, BomLineRow>(
            r#"
            SELECT id, parent_id, name, description, cost, tax_rate
            FROM bom_lines
            WHERE parent_id = ?1
            ORDER BY id
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BomLine::from).collect())
    }

    /// Sum of the parent's line costs. Line tax rates are not applied.
    pub async fn total_for_parent(&self, parent_id: i64) -> DbResult<Money> {
        let total: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(cost), 0) AS REAL) FROM bom_lines WHERE parent_id = ?1",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::new(total))
    }

    /// Stores a line and returns it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - the parent item does not exist
    pub async fn insert(&self, line: &BomLine) -> DbResult<BomLine> {
        debug!(parent_id = line.parent_id, name = %line.name, cost = %line.cost, "Inserting BOM line");

        let result = sqlx::query(
            r#"
            INSERT INTO bom_lines (parent_id, name, description, cost, tax_rate, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(line.parent_id)
        .bind(&line.name)
        .bind(&line.description)
        .bind(line.cost.amount())
        .bind(line.tax_rate.value())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let mut saved = line.clone();
        saved.id = result.last_insert_rowid();
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting BOM line");

        let result = sqlx::query("DELETE FROM bom_lines WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("BOM line", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use costwise_core::{BomLine, Item, Money, Percent};

    async fn db_with_parent() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let parent = db
            .items()
            .insert(&Item::new_product("Stool", Money::new(15.0)))
            .await
            .unwrap();
        (db, parent.id)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (db, parent_id) = db_with_parent().await;

        let mut legs = BomLine::manual(parent_id, "Legs (×4)", Money::new(10.0));
        legs.description = "Base: $2.50, Markup: 0%, Tax: 0%, Final: $2.50 × 4".to_string();
        let legs = db.bom().insert(&legs).await.unwrap();
        db.bom()
            .insert(&BomLine::manual(parent_id, "Varnish", Money::new(1.75)))
            .await
            .unwrap();

        let lines = db.bom().list_for_parent(parent_id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, legs.id);
        assert_eq!(lines[0].description, legs.description);
        assert_eq!(lines[1].name, "Varnish");
    }

    #[tokio::test]
    async fn test_total_ignores_line_tax() {
        let (db, parent_id) = db_with_parent().await;
        assert!(db.bom().total_for_parent(parent_id).await.unwrap().is_zero());

        let mut taxed = BomLine::manual(parent_id, "Paint", Money::new(4.0));
        taxed.tax_rate = Percent::new(19.0);
        db.bom().insert(&taxed).await.unwrap();
        db.bom()
            .insert(&BomLine::manual(parent_id, "Box", Money::new(1.5)))
            .await
            .unwrap();

        assert_eq!(
            db.bom().total_for_parent(parent_id).await.unwrap(),
            Money::new(5.5)
        );
    }

    #[tokio::test]
    async fn test_missing_parent_is_rejected() {
        let (db, _) = db_with_parent().await;
        let orphan = BomLine::manual(777, "Orphan", Money::new(1.0));

        assert!(matches!(
            db.bom().insert(&orphan).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, parent_id) = db_with_parent().await;
        let line = db
            .bom()
            .insert(&BomLine::manual(parent_id, "Glue", Money::new(0.5)))
            .await
            .unwrap();

        db.bom().delete(line.id).await.unwrap();
        assert!(db.bom().list_for_parent(parent_id).await.unwrap().is_empty());
        assert!(matches!(
            db.bom().delete(line.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
