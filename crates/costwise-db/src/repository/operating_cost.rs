//! # Operating Cost Repository
//!
//! The shared overhead pool. Only `monthly` rows count towards
//! [`OperatingCostRepository::monthly_total`]; `one_time` rows are kept for
//! reference.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use costwise_core::{CostFrequency, Money, OperatingCostEntry};

#[derive(Debug, sqlx::FromRow)]
struct OperatingCostRow {
    id: i64,
    name: String,
    amount: f64,
    frequency: CostFrequency,
}

impl From<OperatingCostRow> for OperatingCostEntry {
    fn from(row: OperatingCostRow) -> Self {
        OperatingCostEntry {
            id: row.id,
            name: row.name,
            amount: Money::new(row.amount),
            frequency: row.frequency,
        }
    }
}

/// Repository for the `operating_costs` table.
#[derive(Debug, Clone)]
pub struct OperatingCostRepository {
    pool: SqlitePool,
}

impl OperatingCostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OperatingCostRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<OperatingCostEntry>> {
        let rows = sqlx::query_as::<_, OperatingCostRow>(
            "SELECT id, name, amount, frequency FROM operating_costs ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OperatingCostEntry::from).collect())
    }

    pub async fn insert(&self, entry: &OperatingCostEntry) -> DbResult<OperatingCostEntry> {
        debug!(name = %entry.name, amount = %entry.amount, "Inserting operating cost");

        let result = sqlx::query(
            r#"
            INSERT INTO operating_costs (name, amount, frequency, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&entry.name)
        .bind(entry.amount.amount())
        .bind(entry.frequency.as_str())
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await?;

        let mut saved = entry.clone();
        saved.id = result.last_insert_rowid();
        Ok(saved)
    }

    pub async fn update(&self, entry: &OperatingCostEntry) -> DbResult<()> {
        debug!(id = entry.id, "Updating operating cost");

        let result = sqlx::query(
            "UPDATE operating_costs SET name = ?2, amount = ?3, frequency = ?4 WHERE id = ?1",
        )
        .bind(entry.id)
        .bind(&entry.name)
        .bind(entry.amount.amount())
        .bind(entry.frequency.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Operating cost", entry.id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting operating cost");

        let result = sqlx::query("DELETE FROM operating_costs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Operating cost", id));
        }

        Ok(())
    }

    /// Sum of all monthly entries.
    pub async fn monthly_total(&self) -> DbResult<Money> {
        let total: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) FROM operating_costs WHERE frequency = 'monthly'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::new(total))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use costwise_core::allocation::monthly_total;
    use costwise_core::{CostFrequency, Money, OperatingCostEntry};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_monthly_total_matches_engine() {
        let db = test_db().await;
        let repo = db.operating_costs();

        repo.insert(&OperatingCostEntry::monthly("Rent", Money::new(800.0)))
            .await
            .unwrap();
        repo.insert(&OperatingCostEntry::monthly("Software", Money::new(49.99)))
            .await
            .unwrap();
        repo.insert(&OperatingCostEntry::one_time("Laser cutter", Money::new(4500.0)))
            .await
            .unwrap();

        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].frequency, CostFrequency::OneTime);

        let total = repo.monthly_total().await.unwrap();
        assert!((total.amount() - 849.99).abs() < 1e-9);
        assert!((total.amount() - monthly_total(&entries).amount()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_pool_totals_zero() {
        let db = test_db().await;
        assert!(db.operating_costs().monthly_total().await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = test_db().await;
        let repo = db.operating_costs();

        let mut rent = repo
            .insert(&OperatingCostEntry::monthly("Rent", Money::new(800.0)))
            .await
            .unwrap();
        rent.amount = Money::new(950.0);
        rent.frequency = CostFrequency::OneTime;
        repo.update(&rent).await.unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored[0].amount, Money::new(950.0));
        assert!(!stored[0].is_monthly());
        assert!(repo.monthly_total().await.unwrap().is_zero());

        repo.delete(rent.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(rent.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
