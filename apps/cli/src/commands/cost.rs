//! `costwise cost ...`

use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::report::{field, Message, Render};
use costwise_core::allocation::{allocate_single_item, monthly_total};
use costwise_core::validation::validate_operating_cost;
use costwise_core::{CostFrequency, Money, OperatingCostEntry};
use costwise_db::Database;

pub async fn add(db: &Database, name: &str, amount: f64, frequency: CostFrequency) -> AppResult<OperatingCostEntry> {
    let entry = OperatingCostEntry {
        id: 0,
        name: name.trim().to_string(),
        amount: Money::new(amount),
        frequency,
    };
    validate_operating_cost(&entry)?;

    let saved = db.operating_costs().insert(&entry).await?;
    info!(id = saved.id, name = %saved.name, frequency = %saved.frequency, "Operating cost added");
    Ok(saved)
}

/// What the whole monthly pool costs per unit at a given volume.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PerUnitCharge {
    pub units: f64,
    pub charge: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostList {
    pub entries: Vec<OperatingCostEntry>,
    pub monthly_total: Money,
    pub per_unit: Option<PerUnitCharge>,
}

impl Render for CostList {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = String::new();
        if self.entries.is_empty() {
            out.push_str("No operating costs.\n");
        }
        for entry in &self.entries {
            out.push_str(&format!(
                "{:>5}  {:<32} {:>12}  {}\n",
                entry.id,
                entry.name,
                config.money(entry.amount),
                entry.frequency
            ));
        }
        out.push('\n');
        out.push_str(&field("Monthly total", config.money(self.monthly_total)));
        if let Some(per_unit) = &self.per_unit {
            out.push_str(&field(
                &format!("Per unit at {} units", per_unit.units),
                config.money(per_unit.charge),
            ));
        }
        out
    }
}

pub async fn list(db: &Database, units: Option<f64>) -> AppResult<CostList> {
    let entries = db.operating_costs().list().await?;
    let per_unit = units.map(|units| PerUnitCharge {
        units,
        charge: allocate_single_item(&entries, units),
    });

    Ok(CostList {
        monthly_total: monthly_total(&entries),
        entries,
        per_unit,
    })
}

pub async fn update(
    db: &Database,
    id: i64,
    name: Option<String>,
    amount: Option<f64>,
    frequency: Option<CostFrequency>,
) -> AppResult<OperatingCostEntry> {
    let mut entry = db
        .operating_costs()
        .list()
        .await?
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| AppError::not_found("Operating cost", id))?;

    if let Some(name) = name {
        entry.name = name.trim().to_string();
    }
    if let Some(amount) = amount {
        entry.amount = Money::new(amount);
    }
    if let Some(frequency) = frequency {
        entry.frequency = frequency;
    }

    validate_operating_cost(&entry)?;
    db.operating_costs().update(&entry).await?;
    info!(id, "Operating cost updated");
    Ok(entry)
}

pub async fn remove(db: &Database, id: i64) -> AppResult<Message> {
    db.operating_costs().delete(id).await?;
    Ok(Message::new(format!("Removed operating cost #{}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{assert_money, test_db};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_only_monthly_costs_count() {
        let db = test_db().await;
        add(&db, "Rent", 800.0, CostFrequency::Monthly).await.unwrap();
        add(&db, "Software", 200.0, CostFrequency::Monthly).await.unwrap();
        add(&db, "Laser cutter", 4500.0, CostFrequency::OneTime).await.unwrap();

        let costs = list(&db, Some(250.0)).await.unwrap();
        assert_eq!(costs.entries.len(), 3);
        assert_money(costs.monthly_total, 1000.0);

        let per_unit = costs.per_unit.unwrap();
        assert_money(per_unit.charge, 4.0);
    }

    #[tokio::test]
    async fn test_zero_units_charge_nothing() {
        let db = test_db().await;
        add(&db, "Rent", 800.0, CostFrequency::Monthly).await.unwrap();

        let costs = list(&db, Some(0.0)).await.unwrap();
        assert!(costs.per_unit.unwrap().charge.is_zero());
    }

    #[tokio::test]
    async fn test_add_requires_positive_amount() {
        let db = test_db().await;
        let err = add(&db, "Rent", 0.0, CostFrequency::Monthly).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list(&db, None).await.unwrap().entries.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let db = test_db().await;
        let rent = add(&db, "Rent", 800.0, CostFrequency::Monthly).await.unwrap();

        let updated = update(&db, rent.id, None, Some(950.0), None).await.unwrap();
        assert_eq!(updated.amount, Money::new(950.0));
        assert_eq!(updated.name, "Rent");

        let moved = update(&db, rent.id, None, None, Some(CostFrequency::OneTime))
            .await
            .unwrap();
        assert!(!moved.is_monthly());
        assert!(list(&db, None).await.unwrap().monthly_total.is_zero());

        assert_eq!(
            update(&db, 99, None, Some(1.0), None).await.unwrap_err().code,
            ErrorCode::NotFound
        );

        remove(&db, rent.id).await.unwrap();
        assert_eq!(remove(&db, rent.id).await.unwrap_err().code, ErrorCode::NotFound);
    }
}
