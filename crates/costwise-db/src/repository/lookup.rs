//! # Lookup Repositories
//!
//! Categories and companies are plain name lists. Items store the chosen
//! name as text, so removing an entry here never touches existing items.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use costwise_core::{Category, Company};

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Repository for the `categories` table.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// All categories, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories ORDER BY name COLLATE NOCASE",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// ## Errors
    /// * `DbError::UniqueViolation` - a category with that name exists
    pub async fn insert(&self, name: &str, description: Option<&str>) -> DbResult<Category> {
        debug!(name, "Inserting category");

        let result = sqlx::query(
            "INSERT INTO categories (name, description, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(name))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            description: description.map(str::to_string),
        })
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        delete_by_id(&self.pool, "categories", "Category", id).await
    }
}

// =============================================================================
// Companies
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: i64,
    name: String,
    website: Option<String>,
    contact_info: Option<String>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            website: row.website,
            contact_info: row.contact_info,
        }
    }
}

/// Repository for the `companies` table.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
}

impl CompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CompanyRepository { pool }
    }

    /// All companies, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<Company>> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, website, contact_info FROM companies ORDER BY name COLLATE NOCASE",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Company::from).collect())
    }

    /// ## Errors
    /// * `DbError::UniqueViolation` - a company with that name exists
    pub async fn insert(
        &self,
        name: &str,
        website: Option<&str>,
        contact_info: Option<&str>,
    ) -> DbResult<Company> {
        debug!(name, "Inserting company");

        let result = sqlx::query(
            "INSERT INTO companies (name, website, contact_info, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(website)
        .bind(contact_info)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(name))?;

        Ok(Company {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            website: website.map(str::to_string),
            contact_info: contact_info.map(str::to_string),
        })
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        delete_by_id(&self.pool, "companies", "Company", id).await
    }
}

// `table` is always one of the literals above, never user input.
async fn delete_by_id(pool: &SqlitePool, table: &str, entity: &str, id: i64) -> DbResult<()> {
    debug!(table, id, "Deleting lookup entry");

    let sql = format!("DELETE FROM {} WHERE id = ?1", table);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(entity, id));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_categories() {
        let db = test_db().await;
        let repo = db.categories();

        repo.insert("woodwork", None).await.unwrap();
        let kitchen = repo.insert("Kitchen", Some("Boards and utensils")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Kitchen", "woodwork"]);

        let err = repo.insert("Kitchen", None).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref value, .. } if value == "Kitchen"
        ));

        repo.delete(kitchen.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(matches!(
            repo.delete(kitchen.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_companies() {
        let db = test_db().await;
        let repo = db.companies();

        let acme = repo
            .insert("Acme Timber", Some("https://acme.example"), None)
            .await
            .unwrap();
        assert_eq!(acme.website.as_deref(), Some("https://acme.example"));

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].contact_info, None);

        assert!(matches!(
            repo.insert("Acme Timber", None, None).await,
            Err(DbError::UniqueViolation { .. })
        ));

        repo.delete(acme.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
