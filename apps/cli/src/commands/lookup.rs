//! `costwise category ...` and `costwise company ...`

use tracing::info;

use crate::error::AppResult;
use crate::report::Message;
use costwise_core::validation::validate_lookup_name;
use costwise_core::{Category, Company};
use costwise_db::Database;

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub async fn add_category(db: &Database, name: &str, description: Option<&str>) -> AppResult<Category> {
    validate_lookup_name(name)?;
    let category = db
        .categories()
        .insert(name.trim(), blank_to_none(description))
        .await?;
    info!(id = category.id, name = %category.name, "Category added");
    Ok(category)
}

pub async fn list_categories(db: &Database) -> AppResult<Vec<Category>> {
    Ok(db.categories().list().await?)
}

pub async fn remove_category(db: &Database, id: i64) -> AppResult<Message> {
    db.categories().delete(id).await?;
    Ok(Message::new(format!("Removed category #{}", id)))
}

pub async fn add_company(
    db: &Database,
    name: &str,
    website: Option<&str>,
    contact: Option<&str>,
) -> AppResult<Company> {
    validate_lookup_name(name)?;
    let company = db
        .companies()
        .insert(name.trim(), blank_to_none(website), blank_to_none(contact))
        .await?;
    info!(id = company.id, name = %company.name, "Company added");
    Ok(company)
}

pub async fn list_companies(db: &Database) -> AppResult<Vec<Company>> {
    Ok(db.companies().list().await?)
}

pub async fn remove_company(db: &Database, id: i64) -> AppResult<Message> {
    db.companies().delete(id).await?;
    Ok(Message::new(format!("Removed company #{}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_db;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_categories() {
        let db = test_db().await;
        let kitchen = add_category(&db, " Kitchen ", Some("")).await.unwrap();
        assert_eq!(kitchen.name, "Kitchen");
        assert_eq!(kitchen.description, None);

        let err = add_category(&db, "Kitchen", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "name 'Kitchen' already exists");

        assert_eq!(
            add_category(&db, "", None).await.unwrap_err().code,
            ErrorCode::ValidationError
        );

        remove_category(&db, kitchen.id).await.unwrap();
        assert!(list_categories(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_companies() {
        let db = test_db().await;
        add_company(&db, "Northwood Timber", Some("https://northwood.example"), None)
            .await
            .unwrap();
        add_company(&db, "Fastline Hardware", None, Some("orders@fastline.example"))
            .await
            .unwrap();

        let names: Vec<String> = list_companies(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Fastline Hardware", "Northwood Timber"]);

        assert_eq!(remove_company(&db, 77).await.unwrap_err().code, ErrorCode::NotFound);
    }
}
